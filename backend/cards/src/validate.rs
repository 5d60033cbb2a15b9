use std::{fmt, ops::Deref, str::FromStr};

use common_enums::CardNetwork;
use hyperswitch_masking::{PeekInterface, Secret, Strategy};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::CardError;

/// Minimum limit of a card number will not be less than 8 by ISO standards
pub const MIN_CARD_NUMBER_LENGTH: usize = 12;

/// Maximum limit of a card number will not exceed 19 by ISO standards
pub const MAX_CARD_NUMBER_LENGTH: usize = 19;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

// Ordered: Discover ranges overlap the generic Maestro prefixes.
static CARD_NETWORK_PATTERNS: Lazy<Vec<(CardNetwork, Option<Regex>)>> = Lazy::new(|| {
    [
        (CardNetwork::Visa, r"^4\d{12}(\d{3})?(\d{3})?$"),
        (
            CardNetwork::Mastercard,
            r"^(5[1-5]\d{4}|222[1-9]\d{2}|22[3-9]\d{3}|2[3-6]\d{4}|27[01]\d{3}|2720\d{2})\d{10}$",
        ),
        (CardNetwork::AmericanExpress, r"^3[47]\d{13}$"),
        (
            CardNetwork::Discover,
            r"^(6011\d{12}|65\d{14}|64[4-9]\d{13}|622(12[6-9]|1[3-9]\d|[2-8]\d{2}|9[01]\d|92[0-5])\d{10})$",
        ),
        (CardNetwork::JCB, r"^35(2[89]|[3-8]\d)\d{12,15}$"),
        (CardNetwork::DinersClub, r"^3(0[0-5]|[689]\d)\d{11,16}$"),
        (CardNetwork::Maestro, r"^(5[06-8]|6\d)\d{10,17}$"),
    ]
    .into_iter()
    .map(|(network, pattern)| (network, Regex::new(pattern).ok()))
    .collect()
});

impl CardNumber {
    /// Issuer identification number, the first six digits
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect::<String>()
    }

    pub fn get_last4(&self) -> String {
        let number = self.0.peek();
        number
            .chars()
            .skip(number.len().saturating_sub(4))
            .collect::<String>()
    }

    /// Detects the card brand from the number's prefix and length.
    pub fn get_card_network(&self) -> Option<CardNetwork> {
        let number = self.0.peek();
        CARD_NETWORK_PATTERNS
            .iter()
            .find(|(_, pattern)| {
                pattern
                    .as_ref()
                    .is_some_and(|pattern| pattern.is_match(number))
            })
            .map(|(network, _)| *network)
    }
}

impl FromStr for CardNumber {
    type Err = error_stack::Report<CardError>;

    fn from_str(card_number: &str) -> Result<Self, Self::Err> {
        let digits = card_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect::<String>();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(
                CardError::InvalidCardNumber("card number contains non-digit characters").into(),
            );
        }
        if !(MIN_CARD_NUMBER_LENGTH..=MAX_CARD_NUMBER_LENGTH).contains(&digits.len()) {
            return Err(CardError::InvalidCardNumber("card number length is out of range").into());
        }
        if !luhn(&digits) {
            return Err(CardError::InvalidCardNumber("card number failed the luhn check").into());
        }

        Ok(Self(Secret::new(digits)))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = error_stack::Report<CardError>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = Secret<String, CardNumberStrategy>;

    fn deref(&self) -> &Secret<String, CardNumberStrategy> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Luhn mod 10 over an all-digit string
pub fn luhn(number: &str) -> bool {
    let mut sum = 0_u32;
    for (index, c) in number.chars().rev().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if index % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }
    sum % 10 == 0
}

pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < MIN_CARD_NUMBER_LENGTH || !val_str.is_ascii() {
            return write!(f, "{}", "*".repeat(val_str.len()));
        }

        let (head, rest) = val_str.split_at(6);
        let (middle, tail) = rest.split_at(rest.len() - 4);
        write!(f, "{}{}{}", head, "*".repeat(middle.len()), tail)
    }
}
