use common_utils::consts::{NO_ERROR_MESSAGE, RAW_RESPONSE_KEY};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Raw reply of a processor as returned by the transport.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

impl Response {
    pub fn body_as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.response)
    }
}

/// Shared decline and failure vocabulary across processors.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    IncorrectNumber,
    InvalidNumber,
    InvalidExpiryDate,
    InvalidCvc,
    ExpiredCard,
    IncorrectCvc,
    IncorrectZip,
    IncorrectAddress,
    IncorrectPin,
    CardDeclined,
    ProcessingError,
    CallIssuer,
    PickupCard,
    ConfigError,
    TestModeLiveCard,
    UnsupportedFeature,
    InvalidAmount,
}

/// A processor error token after normalization. Tokens missing from the
/// processor's table pass through untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    Standard(ErrorKind),
    Unmapped(String),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard(kind) => write!(f, "{kind}"),
            Self::Unmapped(token) => f.write_str(token),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        Self::Standard(kind)
    }
}

/// Static table from native error tokens to [`ErrorKind`].
#[derive(Debug)]
pub struct ErrorCodeMapping {
    entries: &'static [(&'static str, ErrorKind)],
}

impl ErrorCodeMapping {
    pub const fn new(entries: &'static [(&'static str, ErrorKind)]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, token: &str) -> Option<ErrorKind> {
        self.entries
            .iter()
            .find(|(native, _)| *native == token)
            .map(|(_, kind)| *kind)
    }

    pub fn map(&self, token: &str) -> ErrorCode {
        self.lookup(token)
            .map(ErrorCode::Standard)
            .unwrap_or_else(|| ErrorCode::Unmapped(token.to_string()))
    }
}

/// How a single address component compared against the issuer's records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum MatchCode {
    #[serde(rename = "Y")]
    Match,
    #[serde(rename = "N")]
    NoMatch,
    /// The issuer does not take part in address verification
    #[serde(rename = "X")]
    Unsupported,
}

const AVS_MESSAGES: &[(char, &str)] = &[
    ('A', "Street address matches, but postal code does not match."),
    ('B', "Street address matches, but postal code not verified."),
    ('C', "Street address and postal code do not match."),
    ('D', "Street address and postal code match."),
    ('E', "AVS data is invalid or AVS is not allowed for this card type."),
    ('F', "Card member's name does not match, but billing postal code matches."),
    ('G', "Non-U.S. issuing bank does not support AVS."),
    ('H', "Card member's name does not match. Street address and postal code match."),
    ('I', "Address not verified."),
    ('J', "Card member's name, billing address, and postal code match. Shipping information verified and chargeback protection guaranteed through the Fraud Protection Program."),
    ('K', "Card member's name matches but billing address and billing postal code do not match."),
    ('L', "Card member's name and billing postal code match, but billing address does not match."),
    ('M', "Street address and postal code match."),
    ('N', "Street address and postal code do not match."),
    ('O', "Card member's name and billing address match, but billing postal code does not match."),
    ('P', "Postal code matches, but street address not verified."),
    ('Q', "Card member's name, billing address, and postal code match. Shipping information verified but chargeback protection not guaranteed."),
    ('R', "System unavailable."),
    ('S', "U.S.-issuing bank does not support AVS."),
    ('T', "Card member's name does not match, but street address matches."),
    ('U', "Address information unavailable."),
    ('V', "Card member's name, billing address, and billing postal code match."),
    ('W', "Street address does not match, but 9-digit postal code matches."),
    ('X', "Street address and 9-digit postal code match."),
    ('Y', "Street address and 5-digit postal code match."),
    ('Z', "Street address does not match, but 5-digit postal code matches."),
];

const STREET_MATCHES: &str = "ABDHJMOQTVXY";
const STREET_MISMATCHES: &str = "CKLNWZ";
const POSTAL_MATCHES: &str = "DHFJLMPQVWXYZ";
const POSTAL_MISMATCHES: &str = "ACKNO";
const AVS_UNSUPPORTED: &str = "GS";

fn match_code(code: char, matches: &str, mismatches: &str) -> Option<MatchCode> {
    if matches.contains(code) {
        Some(MatchCode::Match)
    } else if mismatches.contains(code) {
        Some(MatchCode::NoMatch)
    } else if AVS_UNSUPPORTED.contains(code) {
        Some(MatchCode::Unsupported)
    } else {
        None
    }
}

/// Address verification outcome, keyed by the standard single-letter AVS code.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AvsResult {
    code: char,
    message: Option<&'static str>,
    street_match: Option<MatchCode>,
    postal_match: Option<MatchCode>,
}

impl AvsResult {
    /// `None` for empty input; unknown letters are kept without a message.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().chars().next()?.to_ascii_uppercase();
        Some(Self {
            code,
            message: AVS_MESSAGES
                .iter()
                .find(|(letter, _)| *letter == code)
                .map(|(_, message)| *message),
            street_match: match_code(code, STREET_MATCHES, STREET_MISMATCHES),
            postal_match: match_code(code, POSTAL_MATCHES, POSTAL_MISMATCHES),
        })
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn street_match(&self) -> Option<MatchCode> {
        self.street_match
    }

    pub fn postal_match(&self) -> Option<MatchCode> {
        self.postal_match
    }
}

const CVV_MESSAGES: &[(char, &str)] = &[
    ('D', "CVV check flagged transaction as suspicious"),
    ('I', "CVV failed data validation check"),
    ('M', "CVV matches"),
    ('N', "CVV does not match"),
    ('P', "CVV not processed"),
    ('S', "CVV should have been present"),
    ('U', "CVV request unable to be processed by issuer"),
    ('X', "CVV check not supported for card"),
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CvvResult {
    code: char,
    message: Option<&'static str>,
}

impl CvvResult {
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().chars().next()?.to_ascii_uppercase();
        Some(Self {
            code,
            message: CVV_MESSAGES
                .iter()
                .find(|(letter, _)| *letter == code)
                .map(|(_, message)| *message),
        })
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }
}

/// Uniform outcome of every gateway operation.
///
/// Built once by a connector's response handler and never changed afterwards.
/// A declined or failed call has `success == false` and a non-empty message.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GatewayResponse {
    success: bool,
    message: String,
    params: Map<String, Value>,
    authorization: Option<String>,
    test: bool,
    error_code: Option<ErrorCode>,
    avs_result: Option<AvsResult>,
    cvv_result: Option<CvvResult>,
    fraud_review: bool,
    network_transaction_id: Option<String>,
    status_code: u16,
}

impl GatewayResponse {
    pub fn new(
        success: bool,
        message: impl Into<String>,
        params: Map<String, Value>,
        test: bool,
    ) -> Self {
        let message = message.into();
        let message = if !success && message.trim().is_empty() {
            NO_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            success,
            message,
            params,
            authorization: None,
            test,
            error_code: None,
            avs_result: None,
            cvv_result: None,
            fraud_review: false,
            network_transaction_id: None,
            status_code: 200,
        }
    }

    /// Failure for a body the connector could not decode. The raw body is kept
    /// in `params` under `raw_response`.
    pub fn invalid_response(
        display_name: &str,
        raw_body: &str,
        test: bool,
        status_code: u16,
    ) -> Self {
        let message = format!(
            "Invalid response received from the {display_name} API. Please contact {display_name} support if you continue to receive this message. (The raw response returned by the API was {raw_body})"
        );
        let mut params = Map::new();
        params.insert(
            RAW_RESPONSE_KEY.to_string(),
            Value::String(raw_body.to_string()),
        );
        Self::new(false, message, params, test).with_status_code(status_code)
    }

    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization.filter(|value| !value.is_empty());
        self
    }

    pub fn with_error_code(mut self, error_code: Option<ErrorCode>) -> Self {
        self.error_code = error_code;
        self
    }

    pub fn with_avs_result(mut self, avs_result: Option<AvsResult>) -> Self {
        self.avs_result = avs_result;
        self
    }

    pub fn with_cvv_result(mut self, cvv_result: Option<CvvResult>) -> Self {
        self.cvv_result = cvv_result;
        self
    }

    pub fn with_fraud_review(mut self, fraud_review: bool) -> Self {
        self.fraud_review = fraud_review;
        self
    }

    pub fn with_network_transaction_id(mut self, network_transaction_id: Option<String>) -> Self {
        self.network_transaction_id = network_transaction_id;
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn is_test(&self) -> bool {
        self.test
    }

    pub fn error_code(&self) -> Option<&ErrorCode> {
        self.error_code.as_ref()
    }

    pub fn avs_result(&self) -> Option<&AvsResult> {
        self.avs_result.as_ref()
    }

    pub fn cvv_result(&self) -> Option<&CvvResult> {
        self.cvv_result.as_ref()
    }

    pub fn is_fraud_review(&self) -> bool {
        self.fraud_review
    }

    pub fn network_transaction_id(&self) -> Option<&str> {
        self.network_transaction_id.as_deref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    static MAPPING: ErrorCodeMapping = ErrorCodeMapping::new(&[
        ("card_declined", ErrorKind::CardDeclined),
        ("expired_card", ErrorKind::ExpiredCard),
    ]);

    #[test]
    fn failure_without_message_gets_placeholder() {
        let response = GatewayResponse::new(false, "", Map::new(), true);
        assert_eq!(response.message(), "No error message");
        let response = GatewayResponse::new(true, "", Map::new(), true);
        assert_eq!(response.message(), "");
    }

    #[test]
    fn invalid_response_keeps_raw_body() {
        let response = GatewayResponse::invalid_response("Stripe", "not json", false, 200);
        assert!(!response.is_success());
        assert!(response
            .message()
            .starts_with("Invalid response received from the Stripe API."));
        assert!(response
            .message()
            .ends_with("(The raw response returned by the API was not json)"));
        assert_eq!(
            response.params().get("raw_response"),
            Some(&Value::String("not json".to_string()))
        );
    }

    #[test]
    fn error_mapping_passes_unknown_tokens_through() {
        assert_eq!(
            MAPPING.map("card_declined"),
            ErrorCode::Standard(ErrorKind::CardDeclined)
        );
        assert_eq!(
            MAPPING.map("do_not_honor"),
            ErrorCode::Unmapped("do_not_honor".to_string())
        );
        assert_eq!(MAPPING.map("expired_card").to_string(), "expired_card");
    }

    #[test]
    fn error_kind_uses_snake_case() {
        assert_eq!(ErrorKind::TestModeLiveCard.to_string(), "test_mode_live_card");
        assert_eq!(
            ErrorKind::from_str("incorrect_cvc").unwrap(),
            ErrorKind::IncorrectCvc
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::Standard(ErrorKind::CardDeclined)).unwrap(),
            r#""card_declined""#
        );
    }

    #[test]
    fn avs_codes_follow_standard_table() {
        let full = AvsResult::from_code("Y").unwrap();
        assert_eq!(full.street_match(), Some(MatchCode::Match));
        assert_eq!(full.postal_match(), Some(MatchCode::Match));
        assert_eq!(full.message(), Some("Street address and 5-digit postal code match."));

        let street_only = AvsResult::from_code("a").unwrap();
        assert_eq!(street_only.code(), 'A');
        assert_eq!(street_only.street_match(), Some(MatchCode::Match));
        assert_eq!(street_only.postal_match(), Some(MatchCode::NoMatch));

        let unsupported = AvsResult::from_code("G").unwrap();
        assert_eq!(unsupported.street_match(), Some(MatchCode::Unsupported));

        let unavailable = AvsResult::from_code("U").unwrap();
        assert_eq!(unavailable.street_match(), None);
        assert_eq!(unavailable.postal_match(), None);

        assert!(AvsResult::from_code("").is_none());
    }

    #[test]
    fn cvv_codes_follow_standard_table() {
        assert_eq!(CvvResult::from_code("M").unwrap().message(), Some("CVV matches"));
        assert_eq!(
            CvvResult::from_code("N").unwrap().message(),
            Some("CVV does not match")
        );
        assert_eq!(CvvResult::from_code("Q").unwrap().message(), None);
    }

    #[test]
    fn empty_authorization_is_dropped() {
        let response = GatewayResponse::new(true, "Approved", Map::new(), true)
            .with_authorization(Some(String::new()));
        assert_eq!(response.authorization(), None);
    }
}
