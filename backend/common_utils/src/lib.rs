//! Utilities shared by every payment gateway adapter

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod pii;
pub mod request;
pub mod types;

// Re-export commonly used items
pub use errors::{CustomResult, ParsingError, ValidationError};
pub use pii::Email;
pub use request::{Method, Request, RequestContent};
pub use types::{
    format_amount, parse_amount, AmountConvertor, MinorUnit, MinorUnitForConnector, MoneyFormat,
    StringMajorUnit, StringMajorUnitForConnector, StringMinorUnit, StringMinorUnitForConnector,
};

/// Generate a time-ordered (time-sortable) unique identifier using the current time
#[inline]
pub fn generate_time_ordered_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::now_v7().as_simple())
}
