use domain_types::router_response_types::{ErrorCodeMapping, ErrorKind};

/// Top level `errorCode` of a rejected API call.
pub(super) static ERROR_CODES: ErrorCodeMapping = ErrorCodeMapping::new(&[
    ("0", ErrorKind::ProcessingError),
    ("10", ErrorKind::ConfigError),
    ("100", ErrorKind::InvalidAmount),
    ("101", ErrorKind::IncorrectNumber),
    ("103", ErrorKind::InvalidCvc),
    ("104", ErrorKind::IncorrectAddress),
    ("131", ErrorKind::IncorrectAddress),
    ("132", ErrorKind::IncorrectAddress),
    ("133", ErrorKind::IncorrectAddress),
    ("134", ErrorKind::IncorrectAddress),
    ("135", ErrorKind::IncorrectAddress),
]);

/// `refusalReasonCode` of a refused payment.
pub(super) static REFUSAL_REASON_CODES: ErrorCodeMapping = ErrorCodeMapping::new(&[
    ("2", ErrorKind::CardDeclined),
    ("3", ErrorKind::CallIssuer),
    ("4", ErrorKind::ProcessingError),
    ("5", ErrorKind::CardDeclined),
    ("6", ErrorKind::ExpiredCard),
    ("7", ErrorKind::InvalidAmount),
    ("8", ErrorKind::InvalidNumber),
    ("9", ErrorKind::ProcessingError),
    ("10", ErrorKind::UnsupportedFeature),
    ("12", ErrorKind::CardDeclined),
    ("17", ErrorKind::IncorrectPin),
    ("24", ErrorKind::IncorrectCvc),
    ("25", ErrorKind::CardDeclined),
    ("32", ErrorKind::IncorrectAddress),
]);

// Leading number of `additionalData.avsResult` to the standard AVS letter.
const AVS_CODES: &[(&str, &str)] = &[
    ("0", "R"),
    ("1", "A"),
    ("2", "N"),
    ("3", "R"),
    ("4", "E"),
    ("5", "U"),
    ("6", "Z"),
    ("7", "D"),
    ("8", "U"),
    ("9", "B"),
    ("10", "N"),
    ("11", "U"),
    ("12", "B"),
    ("13", "U"),
    ("14", "P"),
    ("15", "P"),
    ("16", "N"),
    ("17", "U"),
    ("18", "I"),
    ("19", "L"),
    ("20", "V"),
    ("21", "O"),
    ("22", "K"),
    ("23", "F"),
    ("24", "H"),
    ("25", "T"),
    ("26", "N"),
];

const CVC_CODES: &[(&str, &str)] = &[
    ("0", "P"),
    ("1", "M"),
    ("2", "N"),
    ("3", "P"),
    ("4", "S"),
    ("5", "U"),
    ("6", "P"),
];

fn translate(raw: &str, table: &'static [(&'static str, &'static str)]) -> Option<&'static str> {
    let number = raw.split_whitespace().next()?;
    table
        .iter()
        .find(|(native, _)| *native == number)
        .map(|(_, letter)| *letter)
}

/// "7 Both postal code and address match" -> "D"
pub(super) fn avs_letter(raw: &str) -> Option<&'static str> {
    translate(raw, AVS_CODES)
}

pub(super) fn cvc_letter(raw: &str) -> Option<&'static str> {
    translate(raw, CVC_CODES)
}
