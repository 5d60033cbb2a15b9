use common_enums::{CardNetwork, CountryAlpha2, Currency, CurrencyUnit};
use common_utils::errors::CustomResult;
use domain_types::{
    errors::ConnectorError,
    router_data::ConnectorAuthType,
    router_response_types::{GatewayResponse, Response},
};
use hyperswitch_masking::Maskable;

/// Properties shared by every flow of a connector.
pub trait ConnectorCommon {
    /// Name of the connector, in lowercase
    fn id(&self) -> &'static str;

    /// Human readable name, used in messages shown to merchants
    fn display_name(&self) -> &'static str;

    fn homepage_url(&self) -> &'static str;

    fn supported_countries(&self) -> &'static [CountryAlpha2];

    fn supported_card_networks(&self) -> &'static [CardNetwork];

    fn default_currency(&self) -> Currency {
        Currency::USD
    }

    /// Whether amounts are sent in major or minor units
    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// Fails with `FailedToObtainAuthType` when the credentials do not have
    /// the shape this connector expects.
    fn validate_auth_type(&self, auth_type: &ConnectorAuthType) -> CustomResult<(), ConnectorError>;

    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Turns a non-2xx reply into a failed response. Never fails itself.
    fn build_error_response(&self, res: Response, test_mode: bool) -> GatewayResponse;
}

/// Redaction of raw request/response transcripts before they are written anywhere.
pub trait ConnectorScrubbing {
    fn supports_scrubbing(&self) -> bool {
        false
    }

    fn scrub(&self, transcript: &str) -> String;
}
