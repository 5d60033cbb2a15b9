#![allow(clippy::unwrap_used, dead_code)]

use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{Arc, Mutex},
};

use cards::{CardExpiration, CardNumber};
use common_utils::{errors::CustomResult, request::Request};
use composite_service::PaymentGateway;
use domain_types::{
    connector_types::ConnectorEnum,
    errors::ApiClientError,
    payment_method_data::{Card, PaymentSource},
    router_data::ConnectorAuthType,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::report;
use hyperswitch_masking::{ExposeInterface, Secret};
use interfaces::transport::ConnectorTransport;

/// What the stub saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: String,
}

impl RecordedRequest {
    /// Whether a form body carries the exact `key=value` pair.
    pub fn has_field(&self, pair: &str) -> bool {
        self.body.split('&').any(|field| field == pair)
    }
}

/// Replays canned replies in order and records every request it is given.
/// Running out of replies behaves like a refused connection.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<VecDeque<Result<Response, Response>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status_code: u16, body: &str) -> Self {
        let response = Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code,
        };
        let reply = if (200..300).contains(&status_code) {
            Ok(response)
        } else {
            Err(response)
        };
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for StubTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            body: request
                .body
                .as_ref()
                .map(|body| body.encode().unwrap().expose())
                .unwrap_or_default(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                report!(ApiClientError::RequestNotSent("connection refused".to_string()))
            })
    }
}

pub fn adyen_auth() -> ConnectorAuthType {
    ConnectorAuthType::BodyKey {
        api_key: Secret::new("AQE_test_key".to_string()),
        key1: Secret::new("TestMerchant".to_string()),
    }
}

pub fn stripe_auth() -> ConnectorAuthType {
    ConnectorAuthType::HeaderKey {
        api_key: Secret::new("sk_test_4eC39HqLyjWDarjtT1zdp7dc".to_string()),
    }
}

pub fn nmi_auth() -> ConnectorAuthType {
    ConnectorAuthType::HeaderKey {
        api_key: Secret::new("6457Thfj624V5r7WUwc5v6a68Zsd6YEm".to_string()),
    }
}

/// Test-mode gateway over `transport`, plus a handle for inspecting what it sent.
pub fn gateway(
    connector: ConnectorEnum,
    auth_type: ConnectorAuthType,
    transport: StubTransport,
) -> (PaymentGateway<Arc<StubTransport>>, Arc<StubTransport>) {
    let transport = Arc::new(transport);
    let gateway = PaymentGateway::new(
        connector,
        auth_type,
        Connectors::default().get(connector),
        true,
        Arc::clone(&transport),
    )
    .unwrap();
    (gateway, transport)
}

pub fn visa() -> PaymentSource {
    PaymentSource::Card(Card {
        card_number: CardNumber::from_str("4111111111111111").unwrap(),
        card_expiration: CardExpiration::new(3, 2030).unwrap(),
        card_holder_first_name: Some(Secret::new("Jane".to_string())),
        card_holder_last_name: Some(Secret::new("Doe".to_string())),
        card_cvc: Some(Secret::new("737".to_string())),
        card_network: None,
    })
}
