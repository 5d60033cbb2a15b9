pub mod validate;

use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime};

pub use crate::validate::{CardNumber, CardNumberStrategy};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardError {
    #[error("Invalid card number: {0}")]
    InvalidCardNumber(&'static str),
    #[error("Invalid card expiry month: {0}")]
    InvalidExpiryMonth(u8),
    #[error("Invalid card expiry year: {0}")]
    InvalidExpiryYear(u16),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "u8")]
pub struct CardExpirationMonth(Secret<u8>);

impl CardExpirationMonth {
    /// Zero padded month, "03"
    pub fn two_digits(&self) -> Secret<String> {
        Secret::new(format!("{:02}", self.0.peek()))
    }
}

impl TryFrom<u8> for CardExpirationMonth {
    type Error = error_stack::Report<CardError>;

    fn try_from(month: u8) -> Result<Self, Self::Error> {
        if (1..=12).contains(&month) {
            Ok(Self(Secret::new(month)))
        } else {
            Err(CardError::InvalidExpiryMonth(month).into())
        }
    }
}

impl PeekInterface<u8> for CardExpirationMonth {
    fn peek(&self) -> &u8 {
        self.0.peek()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "u16")]
pub struct CardExpirationYear(Secret<u16>);

impl CardExpirationYear {
    pub fn four_digits(&self) -> Secret<String> {
        Secret::new(self.0.peek().to_string())
    }

    pub fn two_digits(&self) -> Secret<String> {
        Secret::new(format!("{:02}", self.0.peek() % 100))
    }
}

/// Two digit years are read as 20YY.
impl TryFrom<u16> for CardExpirationYear {
    type Error = error_stack::Report<CardError>;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        match year {
            0..=99 => Ok(Self(Secret::new(2000 + year))),
            1000..=9999 => Ok(Self(Secret::new(year))),
            _ => Err(CardError::InvalidExpiryYear(year).into()),
        }
    }
}

impl PeekInterface<u16> for CardExpirationYear {
    fn peek(&self) -> &u16 {
        self.0.peek()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardExpiration {
    pub month: CardExpirationMonth,
    pub year: CardExpirationYear,
}

impl CardExpiration {
    pub fn new(month: u8, year: u16) -> Result<Self, error_stack::Report<CardError>> {
        Ok(Self {
            month: CardExpirationMonth::try_from(month)?,
            year: CardExpirationYear::try_from(year)?,
        })
    }

    /// A card stays valid through the last day of its expiry month.
    pub fn is_expired(&self) -> bool {
        let now = OffsetDateTime::now_utc();
        let current_month = u8::from(now.month());
        let current_year = now.year();
        let year = i32::from(*self.year.peek());
        (year, *self.month.peek()) < (current_year, current_month)
    }

    /// "MM/YY"
    pub fn mm_yy(&self) -> Secret<String> {
        Secret::new(format!(
            "{}/{}",
            self.month.two_digits().peek(),
            self.year.two_digits().peek()
        ))
    }

    pub fn month_name(&self) -> Option<Month> {
        Month::try_from(*self.month.peek()).ok()
    }
}
