use common_utils::{consts::VERIFY_AMOUNT_MINOR_UNITS, errors::CustomResult, types::MinorUnit};
use domain_types::{
    connector_types::PaymentOptions, errors::ConnectorError,
    payment_method_data::PaymentSource, router_response_types::GatewayResponse,
};

/// The uniform payment operations every gateway offers.
///
/// Declines come back as a [`GatewayResponse`] with `success == false`; an
/// `Err` means the call was rejected before sending or never got a reply.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Authorize and capture in one call
    async fn purchase(
        &self,
        money: MinorUnit,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;

    async fn authorize(
        &self,
        money: MinorUnit,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;

    async fn capture(
        &self,
        money: MinorUnit,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;

    async fn refund(
        &self,
        money: MinorUnit,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;

    async fn void(
        &self,
        authorization: &str,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;

    /// Authorizes a nominal amount and voids it straight away.
    ///
    /// The authorize response is returned as is; the void outcome is only
    /// logged. Errors raised by the authorize step are returned without a void.
    async fn verify(
        &self,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let response = self
            .authorize(
                MinorUnit::new(VERIFY_AMOUNT_MINOR_UNITS),
                payment_source,
                options,
            )
            .await?;

        let authorization = response.authorization().unwrap_or_default();
        match self.void(authorization, options).await {
            Ok(void_response) if void_response.is_success() => {
                tracing::debug!(authorization, "verification authorization voided");
            }
            Ok(void_response) => {
                tracing::warn!(
                    authorization,
                    message = void_response.message(),
                    "void after verification failed"
                );
            }
            Err(error) => {
                tracing::warn!(authorization, ?error, "void after verification errored");
            }
        }

        Ok(response)
    }

    /// Tokenizes the payment source; the billing id comes back as `authorization`
    async fn store(
        &self,
        payment_source: &PaymentSource,
        options: &PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain_types::payment_method_data::TokenData;
    use error_stack::report;
    use hyperswitch_masking::Secret;
    use serde_json::Map;

    use super::*;

    #[derive(Clone, Copy)]
    enum Outcome {
        Approve,
        Decline,
        Raise,
    }

    struct ScriptedGateway {
        authorize: Outcome,
        void: Outcome,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(authorize: Outcome, void: Outcome) -> Self {
            Self {
                authorize,
                void,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(
            &self,
            call: String,
            outcome: Outcome,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            self.calls.lock().unwrap().push(call);
            match outcome {
                Outcome::Approve => Ok(GatewayResponse::new(true, "Approved", Map::new(), true)
                    .with_authorization(Some("auth_1".to_string()))),
                Outcome::Decline => Ok(GatewayResponse::new(false, "Declined", Map::new(), true)),
                Outcome::Raise => Err(report!(ConnectorError::TransportFailure)),
            }
        }
    }

    #[async_trait::async_trait]
    impl Gateway for ScriptedGateway {
        async fn purchase(
            &self,
            _money: MinorUnit,
            _payment_source: &PaymentSource,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            unreachable!()
        }

        async fn authorize(
            &self,
            money: MinorUnit,
            _payment_source: &PaymentSource,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            self.record(format!("authorize:{money}"), self.authorize)
        }

        async fn capture(
            &self,
            _money: MinorUnit,
            _authorization: &str,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            unreachable!()
        }

        async fn refund(
            &self,
            _money: MinorUnit,
            _authorization: &str,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            unreachable!()
        }

        async fn void(
            &self,
            authorization: &str,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            self.record(format!("void:{authorization}"), self.void)
        }

        async fn store(
            &self,
            _payment_source: &PaymentSource,
            _options: &PaymentOptions,
        ) -> CustomResult<GatewayResponse, ConnectorError> {
            unreachable!()
        }
    }

    fn source() -> PaymentSource {
        PaymentSource::Token(TokenData {
            token: Secret::new("tok_visa".to_string()),
        })
    }

    #[tokio::test]
    async fn verify_voids_the_authorization() {
        let gateway = ScriptedGateway::new(Outcome::Approve, Outcome::Approve);
        let response = gateway
            .verify(&source(), &PaymentOptions::default())
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(
            *gateway.calls.lock().unwrap(),
            vec!["authorize:100".to_string(), "void:auth_1".to_string()]
        );
    }

    #[tokio::test]
    async fn verify_ignores_void_outcome() {
        for void in [Outcome::Decline, Outcome::Raise] {
            let gateway = ScriptedGateway::new(Outcome::Approve, void);
            let response = gateway
                .verify(&source(), &PaymentOptions::default())
                .await
                .unwrap();
            assert!(response.is_success());
            assert_eq!(response.authorization(), Some("auth_1"));
            assert_eq!(gateway.calls.lock().unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn verify_voids_even_after_decline() {
        let gateway = ScriptedGateway::new(Outcome::Decline, Outcome::Decline);
        let response = gateway
            .verify(&source(), &PaymentOptions::default())
            .await
            .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message(), "Declined");
        assert_eq!(
            *gateway.calls.lock().unwrap(),
            vec!["authorize:100".to_string(), "void:".to_string()]
        );
    }

    #[tokio::test]
    async fn verify_stops_when_authorize_raises() {
        let gateway = ScriptedGateway::new(Outcome::Raise, Outcome::Approve);
        let err = gateway
            .verify(&source(), &PaymentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.current_context(), &ConnectorError::TransportFailure);
        assert_eq!(gateway.calls.lock().unwrap().len(), 1);
    }
}
