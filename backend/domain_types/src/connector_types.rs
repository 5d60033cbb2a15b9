use std::collections::BTreeMap;

use common_enums::{CaptureMethod, CountryAlpha2, Currency};
use common_utils::{pii, types::MinorUnit};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::payment_method_data::PaymentSource;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Adyen,
    Stripe,
    Nmi,
}

/// Recognized keys of [`PaymentOptions`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OptionKey {
    OrderId,
    Currency,
    Description,
    BillingAddress,
    Ip,
    Email,
    CustomerId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<Secret<String>>,
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<CountryAlpha2>,
    pub phone: Option<Secret<String>>,
}

/// Caller supplied extras for an operation. Adapters declare which keys they
/// need per flow; only presence is checked.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOptions {
    pub order_id: Option<String>,
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub billing_address: Option<Address>,
    pub ip: Option<Secret<String, pii::IpAddress>>,
    pub email: Option<pii::Email>,
    pub customer_id: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl PaymentOptions {
    pub fn has(&self, key: OptionKey) -> bool {
        match key {
            OptionKey::OrderId => is_present(self.order_id.as_deref()),
            OptionKey::Currency => self.currency.is_some(),
            OptionKey::Description => is_present(self.description.as_deref()),
            OptionKey::BillingAddress => self.billing_address.is_some(),
            OptionKey::Ip => self
                .ip
                .as_ref()
                .is_some_and(|ip| is_present(Some(ip.peek().as_str()))),
            OptionKey::Email => self.email.is_some(),
            OptionKey::CustomerId => is_present(self.customer_id.as_deref()),
        }
    }

    /// Names of the `required` keys that are absent, in declaration order.
    pub fn missing(&self, required: &[OptionKey]) -> Vec<&'static str> {
        required
            .iter()
            .filter(|key| !self.has(**key))
            .map(|key| <&'static str>::from(*key))
            .collect()
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub amount: MinorUnit,
    pub currency: Currency,
    pub payment_source: PaymentSource,
    pub capture_method: CaptureMethod,
    pub options: PaymentOptions,
}

impl PaymentsAuthorizeData {
    pub fn is_auto_capture(&self) -> bool {
        self.capture_method == CaptureMethod::Automatic
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsCaptureData {
    pub amount_to_capture: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub refund_amount: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_transaction_id: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentMethodTokenizationData {
    pub payment_source: PaymentSource,
    pub currency: Currency,
    pub options: PaymentOptions,
}

/// Access to the caller options carried by every flow's request data.
pub trait RequestOptions {
    fn options(&self) -> &PaymentOptions;
}

macro_rules! impl_request_options {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl RequestOptions for $ty {
                fn options(&self) -> &PaymentOptions {
                    &self.options
                }
            }
        )+
    };
}

impl_request_options!(
    PaymentsAuthorizeData,
    PaymentsCaptureData,
    RefundsData,
    PaymentVoidData,
    PaymentMethodTokenizationData,
);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn connector_enum_round_trips_through_snake_case() {
        for connector in ConnectorEnum::iter() {
            let name = connector.to_string();
            assert_eq!(ConnectorEnum::from_str(&name).unwrap(), connector);
        }
        assert_eq!(ConnectorEnum::Nmi.to_string(), "nmi");
        assert!(ConnectorEnum::from_str("paypal").is_err());
    }

    #[test]
    fn missing_reports_absent_and_blank_options() {
        let options = PaymentOptions {
            order_id: Some("  ".to_string()),
            currency: Some(Currency::USD),
            ..Default::default()
        };
        assert_eq!(
            options.missing(&[OptionKey::OrderId, OptionKey::Currency, OptionKey::Email]),
            vec!["order_id", "email"]
        );
        assert!(options.missing(&[]).is_empty());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: PaymentOptions =
            serde_json::from_str(r#"{"currency":"EUR","email":"jane@example.com"}"#).unwrap();
        assert_eq!(options.currency, Some(Currency::EUR));
        assert!(options.has(OptionKey::Email));
        assert!(!options.has(OptionKey::BillingAddress));
    }
}
