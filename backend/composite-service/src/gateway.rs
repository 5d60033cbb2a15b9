use common_enums::{CaptureMethod, Currency};
use common_utils::{errors::CustomResult, types::MinorUnit};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::{Authorize, Capture, FlowIdentifier, PaymentMethodToken, Refund, Void},
    connector_types::{
        ConnectorEnum, PaymentMethodTokenizationData, PaymentOptions, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, RefundsData, RequestOptions,
    },
    errors::ConnectorError,
    payment_method_data::PaymentSource,
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::GatewayResponse,
    types::ConnectorParams,
};
use error_stack::{report, ResultExt};
use external_services::service::{execute_connector_processing_step, HttpTransport};
use interfaces::{
    api::ConnectorCommon,
    connector_integration::ConnectorIntegration,
    connector_types::ConnectorServiceTrait,
    gateway::Gateway,
    transport::ConnectorTransport,
};

use crate::configs::Config;

/// One processor account behind the uniform [`Gateway`] operations.
///
/// Credentials and the endpoint are fixed at construction. The gateway holds
/// no mutable state and can be shared across tasks.
pub struct PaymentGateway<T> {
    connector: ConnectorData,
    auth_type: ConnectorAuthType,
    base_url: String,
    test_mode: bool,
    transport: T,
}

impl<T> std::fmt::Debug for PaymentGateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGateway")
            .field("connector", &self.connector.connector_name)
            .field("base_url", &self.base_url)
            .field("test_mode", &self.test_mode)
            .finish_non_exhaustive()
    }
}

impl<T: ConnectorTransport> PaymentGateway<T> {
    /// Fails with `FailedToObtainAuthType` when the credentials do not fit the
    /// connector, or `InvalidConnectorConfig` when the selected endpoint is
    /// empty. Nothing is sent.
    pub fn new(
        connector_name: ConnectorEnum,
        auth_type: ConnectorAuthType,
        params: &ConnectorParams,
        test_mode: bool,
        transport: T,
    ) -> CustomResult<Self, ConnectorError> {
        let connector = ConnectorData::get_connector_by_name(&connector_name);
        connector.connector.validate_auth_type(&auth_type)?;

        let base_url = params.get_url(test_mode).trim();
        if base_url.is_empty() {
            return Err(report!(ConnectorError::InvalidConnectorConfig {
                config: "base_url"
            }));
        }

        tracing::debug!(connector = %connector_name, test_mode, "payment gateway created");

        Ok(Self {
            connector,
            auth_type,
            base_url: base_url.to_string(),
            test_mode,
            transport,
        })
    }

    pub fn connector_name(&self) -> ConnectorEnum {
        self.connector.connector_name
    }

    pub fn is_test(&self) -> bool {
        self.test_mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn currency(&self, options: &PaymentOptions) -> Currency {
        options
            .currency
            .unwrap_or_else(|| self.connector.connector.default_currency())
    }

    async fn execute<F, Req>(&self, request: Req) -> CustomResult<GatewayResponse, ConnectorError>
    where
        F: FlowIdentifier + Send + Sync,
        Req: RequestOptions + Send + Sync,
        (dyn ConnectorServiceTrait + Sync): ConnectorIntegration<F, Req>,
    {
        let router_data = RouterData::<F, Req>::new(
            self.auth_type.clone(),
            self.base_url.as_str(),
            self.test_mode,
            request,
        );
        execute_connector_processing_step(&self.transport, *self.connector.connector, &router_data)
            .await
    }

    async fn payment(
        &self,
        money: MinorUnit,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
        capture_method: CaptureMethod,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        ensure_not_negative(money)?;
        self.execute::<Authorize, _>(PaymentsAuthorizeData {
            amount: money,
            currency: self.currency(options),
            payment_source: payment_source.clone(),
            capture_method,
            options: options.clone(),
        })
        .await
    }
}

impl PaymentGateway<HttpTransport> {
    /// Builds a gateway over the reqwest transport from loaded settings.
    pub fn from_config(
        connector_name: ConnectorEnum,
        auth_type: ConnectorAuthType,
        config: &Config,
    ) -> CustomResult<Self, ConnectorError> {
        let transport = HttpTransport::new(config.proxy.clone()).change_context(
            ConnectorError::InvalidConnectorConfig { config: "proxy" },
        )?;
        Self::new(
            connector_name,
            auth_type,
            config.connectors.get(connector_name),
            config.test_mode,
            transport,
        )
    }
}

fn ensure_not_negative(money: MinorUnit) -> CustomResult<(), ConnectorError> {
    if money.is_negative() {
        return Err(report!(ConnectorError::InvalidDataFormat {
            field_name: "amount"
        }));
    }
    Ok(())
}

#[async_trait::async_trait]
impl<T: ConnectorTransport> Gateway for PaymentGateway<T> {
    async fn purchase(
        &self,
        money: MinorUnit,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        self.payment(money, payment_source, options, CaptureMethod::Automatic)
            .await
    }

    async fn authorize(
        &self,
        money: MinorUnit,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        self.payment(money, payment_source, options, CaptureMethod::Manual)
            .await
    }

    async fn capture(
        &self,
        money: MinorUnit,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        ensure_not_negative(money)?;
        self.execute::<Capture, _>(PaymentsCaptureData {
            amount_to_capture: money,
            currency: self.currency(options),
            connector_transaction_id: authorization.to_string(),
            options: options.clone(),
        })
        .await
    }

    async fn refund(
        &self,
        money: MinorUnit,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        ensure_not_negative(money)?;
        self.execute::<Refund, _>(RefundsData {
            refund_amount: money,
            currency: self.currency(options),
            connector_transaction_id: authorization.to_string(),
            options: options.clone(),
        })
        .await
    }

    async fn void(
        &self,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        self.execute::<Void, _>(PaymentVoidData {
            connector_transaction_id: authorization.to_string(),
            options: options.clone(),
        })
        .await
    }

    async fn store(
        &self,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        self.execute::<PaymentMethodToken, _>(PaymentMethodTokenizationData {
            payment_source: payment_source.clone(),
            currency: self.currency(options),
            options: options.clone(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::request::Request;
    use domain_types::{errors::ApiClientError, router_response_types::Response};
    use hyperswitch_masking::Secret;

    use super::*;

    struct Unreachable;

    #[async_trait::async_trait]
    impl ConnectorTransport for Unreachable {
        async fn send(
            &self,
            _request: Request,
        ) -> CustomResult<Result<Response, Response>, ApiClientError> {
            Err(report!(ApiClientError::UnexpectedState))
        }
    }

    fn stripe_key() -> ConnectorAuthType {
        ConnectorAuthType::HeaderKey {
            api_key: Secret::new("sk_test_key".to_string()),
        }
    }

    #[test]
    fn construction_validates_credentials_shape() {
        let error = PaymentGateway::new(
            ConnectorEnum::Adyen,
            stripe_key(),
            &ConnectorParams::new("https://live", "https://test"),
            true,
            Unreachable,
        )
        .unwrap_err();

        assert_eq!(*error.current_context(), ConnectorError::FailedToObtainAuthType);
    }

    #[test]
    fn construction_requires_an_endpoint_for_the_mode() {
        let params = ConnectorParams::new("https://api.stripe.com/v1", "  ");
        let error =
            PaymentGateway::new(ConnectorEnum::Stripe, stripe_key(), &params, true, Unreachable)
                .unwrap_err();
        assert_eq!(
            *error.current_context(),
            ConnectorError::InvalidConnectorConfig { config: "base_url" }
        );

        let gateway =
            PaymentGateway::new(ConnectorEnum::Stripe, stripe_key(), &params, false, Unreachable)
                .unwrap();
        assert_eq!(gateway.base_url(), "https://api.stripe.com/v1");
        assert!(!gateway.is_test());
        assert_eq!(gateway.connector_name(), ConnectorEnum::Stripe);
    }

    #[test]
    fn currency_falls_back_to_connector_default() {
        let gateway = PaymentGateway::new(
            ConnectorEnum::Stripe,
            stripe_key(),
            &ConnectorParams::new("https://live", "https://test"),
            true,
            Unreachable,
        )
        .unwrap();

        assert_eq!(gateway.currency(&PaymentOptions::default()), Currency::USD);
        let options = PaymentOptions {
            currency: Some(Currency::GBP),
            ..Default::default()
        };
        assert_eq!(gateway.currency(&options), Currency::GBP);
    }

    #[test]
    fn from_config_uses_configured_endpoints() {
        let config = Config {
            test_mode: true,
            ..Default::default()
        };
        let gateway = PaymentGateway::from_config(
            ConnectorEnum::Adyen,
            ConnectorAuthType::BodyKey {
                api_key: Secret::new("api_key".to_string()),
                key1: Secret::new("MerchantAccount".to_string()),
            },
            &config,
        )
        .unwrap();

        assert_eq!(gateway.base_url(), "https://checkout-test.adyen.com/v71");
    }
}
