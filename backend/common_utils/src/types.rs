//! Amount types and the conversions between them

use std::{fmt::Display, str::FromStr};

use common_enums::enums;
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::errors::ParsingError;

/// Amount convertor trait for connector
pub trait AmountConvertor: Send {
    /// Output type for the connector
    type Output;
    /// helps in conversion of connector required amount type
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;

    /// helps in converting back connector required amount type to core minor unit
    fn convert_back(
        &self,
        amount: Self::Output,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>>;
}

/// Connector required amount type
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct StringMinorUnitForConnector;

impl AmountConvertor for StringMinorUnitForConnector {
    type Output = StringMinorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount.to_minor_unit_as_string())
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64()
    }
}

/// Connector required amount type
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct StringMajorUnitForConnector;

impl AmountConvertor for StringMajorUnitForConnector {
    type Output = StringMajorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount.to_major_unit_as_string(currency))
    }

    fn convert_back(
        &self,
        amount: StringMajorUnit,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64(currency)
    }
}

/// Connector required amount type
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MinorUnitForConnector;

impl AmountConvertor for MinorUnitForConnector {
    type Output = MinorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount)
    }
    fn convert_back(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        Ok(amount)
    }
}

/// Amount in the smallest unit of its currency. Every gateway operation takes money in this form.
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// forms a new minor default unit i.e zero
    pub fn zero() -> Self {
        Self(0)
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert the amount to its major denomination based on Currency and return String.
    /// The scale always matches the currency exponent, so 1000 USD cents becomes "10.00".
    fn to_major_unit_as_string(self, currency: enums::Currency) -> StringMajorUnit {
        let scale = u32::from(currency.number_of_digits_after_decimal_point());
        StringMajorUnit::new(Decimal::new(self.0, scale).to_string())
    }

    ///Convert minor unit to string minor unit
    fn to_minor_unit_as_string(self) -> StringMinorUnit {
        StringMinorUnit::new(self.0.to_string())
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn minor_units_per_major_unit(currency: enums::Currency) -> Decimal {
    Decimal::from(10_i64.pow(u32::from(
        currency.number_of_digits_after_decimal_point(),
    )))
}

fn decimal_to_minor_unit(
    amount_decimal: Decimal,
    currency: enums::Currency,
) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
    let amount = amount_decimal
        .checked_mul(minor_units_per_major_unit(currency))
        .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
    let amount_i64 = amount
        .round()
        .to_i64()
        .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
    Ok(MinorUnit::new(amount_i64))
}

/// Connector specific types to send
#[derive(
    Default, Debug, serde::Deserialize, serde::Serialize, Clone, PartialEq, Eq, Hash, PartialOrd,
)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    /// converts to minor unit i64 from minor unit string value
    fn to_minor_unit_as_i64(&self) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal = Decimal::from_str(&self.0).map_err(|e| {
            ParsingError::StringToDecimalConversionFailure {
                error: e.to_string(),
            }
        })?;
        if !amount_decimal.fract().is_zero() {
            return Err(ParsingError::AmountParsingError(format!(
                "{} is not a whole number of minor units",
                self.0
            ))
            .into());
        }
        let amount_i64 = amount_decimal
            .to_i64()
            .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
        Ok(MinorUnit::new(amount_i64))
    }
}

impl Display for StringMinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific types to send
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, PartialEq, Eq)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    fn to_minor_unit_as_i64(
        &self,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal = Decimal::from_str(&self.0).map_err(|e| {
            ParsingError::StringToDecimalConversionFailure {
                error: e.to_string(),
            }
        })?;
        decimal_to_minor_unit(amount_decimal, currency)
    }

    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }
}

impl Display for StringMajorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Textual money styles understood by processors
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MoneyFormat {
    /// Integer count of minor units, "1000"
    Cents,
    /// Decimal major units at the currency exponent, "10.00"
    Dollars,
}

/// Render `amount` the way a processor declaring `format` expects it.
pub fn format_amount(
    amount: MinorUnit,
    format: MoneyFormat,
    currency: enums::Currency,
) -> Result<String, error_stack::Report<ParsingError>> {
    match format {
        MoneyFormat::Cents => StringMinorUnitForConnector
            .convert(amount, currency)
            .map(|amount| amount.to_string()),
        MoneyFormat::Dollars => StringMajorUnitForConnector
            .convert(amount, currency)
            .map(|amount| amount.to_string()),
    }
}

/// Inverse of [`format_amount`].
pub fn parse_amount(
    value: &str,
    format: MoneyFormat,
    currency: enums::Currency,
) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
    match format {
        MoneyFormat::Cents => StringMinorUnitForConnector
            .convert_back(StringMinorUnit::new(value.to_string()), currency),
        MoneyFormat::Dollars => StringMajorUnitForConnector
            .convert_back(StringMajorUnit::new(value.to_string()), currency),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn major_unit_string_follows_currency_exponent() {
        let convertor = StringMajorUnitForConnector;
        let usd = convertor
            .convert(MinorUnit::new(1000), enums::Currency::USD)
            .unwrap();
        let jpy = convertor
            .convert(MinorUnit::new(1000), enums::Currency::JPY)
            .unwrap();
        let kwd = convertor
            .convert(MinorUnit::new(1005), enums::Currency::KWD)
            .unwrap();
        assert_eq!(usd.get_amount_as_string(), "10.00");
        assert_eq!(jpy.get_amount_as_string(), "1000");
        assert_eq!(kwd.get_amount_as_string(), "1.005");
    }

    #[test]
    fn string_minor_unit_rejects_garbage() {
        let err = StringMinorUnit::new("ten".to_string())
            .to_minor_unit_as_i64()
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            ParsingError::StringToDecimalConversionFailure { .. }
        ));
    }

    #[test]
    fn money_format_renders_both_styles() {
        let amount = MinorUnit::new(1000);
        assert_eq!(
            format_amount(amount, MoneyFormat::Cents, enums::Currency::USD).unwrap(),
            "1000"
        );
        assert_eq!(
            format_amount(amount, MoneyFormat::Dollars, enums::Currency::USD).unwrap(),
            "10.00"
        );
        assert_eq!(MoneyFormat::from_str("dollars").unwrap(), MoneyFormat::Dollars);
    }

    #[test]
    fn oversized_dollar_amount_is_an_error() {
        let err = parse_amount(
            "79228162514264337593543950335",
            MoneyFormat::Dollars,
            enums::Currency::USD,
        )
        .unwrap_err();
        assert!(matches!(
            err.current_context(),
            ParsingError::DecimalToI64ConversionFailure
        ));
    }

    #[test]
    fn fractional_cents_are_rejected() {
        let err = parse_amount("10.5", MoneyFormat::Cents, enums::Currency::USD).unwrap_err();
        assert!(matches!(
            err.current_context(),
            ParsingError::AmountParsingError(_)
        ));
        assert_eq!(
            parse_amount("1000", MoneyFormat::Cents, enums::Currency::USD).unwrap(),
            MinorUnit::new(1000)
        );
    }

    proptest! {
        #[test]
        fn cents_round_trip(amount in 0_i64..=i64::MAX) {
            let rendered =
                format_amount(MinorUnit::new(amount), MoneyFormat::Cents, enums::Currency::USD)
                    .unwrap();
            let parsed = parse_amount(&rendered, MoneyFormat::Cents, enums::Currency::USD).unwrap();
            prop_assert_eq!(parsed, MinorUnit::new(amount));
        }

        #[test]
        fn dollars_round_trip(amount in 0_i64..1_000_000_000_000_000) {
            for currency in [enums::Currency::USD, enums::Currency::JPY, enums::Currency::BHD] {
                let rendered =
                    format_amount(MinorUnit::new(amount), MoneyFormat::Dollars, currency).unwrap();
                let parsed = parse_amount(&rendered, MoneyFormat::Dollars, currency).unwrap();
                prop_assert_eq!(parsed, MinorUnit::new(amount));
            }
        }
    }
}
