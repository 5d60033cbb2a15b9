use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{
    connector_flow::FlowIdentifier,
    connector_types::RequestOptions,
    errors::{ApiClientError, ConnectorError},
    router_data::RouterData,
    router_response_types::{GatewayResponse, Response},
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::ExposeInterface;
use interfaces::{
    api::ConnectorScrubbing, connector_integration::ConnectorIntegration,
    transport::ConnectorTransport,
};
use reqwest::Client;

/// Runs one flow of one connector: checks the caller options, validates,
/// builds the request, sends it and normalizes the reply.
///
/// Processor declines come back as `Ok` with an unsuccessful response. `Err`
/// is returned only when nothing was sent or no reply was received.
#[tracing::instrument(
    name = "connector_call",
    skip_all,
    fields(connector = connector.id(), flow = %F::NAME, status_code = tracing::field::Empty)
)]
pub async fn execute_connector_processing_step<F, Req, C, T>(
    transport: &T,
    connector: &C,
    router_data: &RouterData<F, Req>,
) -> CustomResult<GatewayResponse, ConnectorError>
where
    F: FlowIdentifier + Send + Sync,
    Req: RequestOptions + Send + Sync,
    C: ConnectorIntegration<F, Req> + ConnectorScrubbing + ?Sized,
    T: ConnectorTransport + ?Sized,
{
    let missing = router_data
        .request
        .options()
        .missing(connector.required_options());
    if !missing.is_empty() {
        tracing::warn!(?missing, "required options are absent");
        return Err(report!(ConnectorError::MissingRequiredFields {
            field_names: missing
        }));
    }

    connector.validate_request(router_data)?;
    let request = connector.build_request(router_data)?;

    tracing::info!(
        method = %request.method,
        url = %request.url,
        body = %request
            .body
            .as_ref()
            .map(RequestContent::masked_value)
            .unwrap_or_default(),
        "sending request to connector"
    );

    let wire_body = request
        .body
        .as_ref()
        .map(RequestContent::encode)
        .transpose()
        .change_context(ConnectorError::RequestEncodingFailed)
        .inspect_err(|error| tracing::error!(?error, "unable to encode connector request body"))?;
    let raw_request = wire_body
        .filter(|_| connector.supports_scrubbing() && tracing::enabled!(tracing::Level::DEBUG))
        .map(|body| body.expose());

    let response = transport
        .send(request)
        .await
        .change_context(ConnectorError::TransportFailure)
        .inspect_err(|error| tracing::error!(?error, "no response received from connector"))?;

    let (Ok(res) | Err(res)) = &response;
    tracing::Span::current().record("status_code", res.status_code);
    tracing::info!(status_code = res.status_code, "received response from connector");
    if let Some(raw_request) = raw_request {
        let transcript = format!("{raw_request}\n{}", res.body_as_str());
        tracing::debug!(transcript = %connector.scrub(&transcript), "connector transcript");
    }

    let gateway_response = match response {
        Ok(res) => connector.handle_response(router_data, res),
        Err(res) => connector.get_error_response(router_data, res),
    };
    tracing::info!(
        success = gateway_response.is_success(),
        message = gateway_response.message(),
        "connector call completed"
    );

    Ok(gateway_response)
}

/// reqwest backed [`ConnectorTransport`].
///
/// Clients are built once and reused. Redirects are never followed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    proxy: Proxy,
    client: Client,
    proxied_client: Option<Client>,
}

impl HttpTransport {
    pub fn new(proxy: Proxy) -> CustomResult<Self, ApiClientError> {
        let client = build_client(&proxy, true)?;
        let proxied_client = if proxy.is_proxy_configured(false) {
            Some(build_client(&proxy, false)?)
        } else {
            None
        };

        Ok(Self {
            proxy,
            client,
            proxied_client,
        })
    }

    fn client_for(&self, url: &str) -> &Client {
        match &self.proxied_client {
            Some(client) if !self.proxy.should_bypass(url) => client,
            _ => &self.client,
        }
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let url =
            reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlParsingFailed)?;
        let client = self.client_for(&request.url);
        let headers = request.headers.construct_header_map()?;

        let builder = client.request(to_reqwest_method(request.method), url);
        let builder = match request.body {
            Some(RequestContent::Json(payload)) => builder.json(&payload),
            Some(RequestContent::FormUrlEncoded(payload)) => builder.form(&payload),
            Some(RequestContent::RawBytes(bytes)) => builder.body(bytes),
            None => builder,
        }
        .headers(headers);

        let response = builder.send().await.map_err(|error| {
            tracing::error!(%error, "unable to send request to connector");
            if error.is_timeout() {
                report!(ApiClientError::RequestTimeoutReceived)
            } else {
                report!(ApiClientError::RequestNotSent(error.to_string()))
            }
        })?;

        handle_response(response).await
    }
}

fn build_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    get_client_builder(proxy_config, should_bypass_proxy)?
        .build()
        .change_context(ApiClientError::ClientConstructionFailed)
        .inspect_err(|error| tracing::error!(?error, "failed to construct http client"))
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(
            proxy_config
                .idle_pool_connection_timeout
                .map(Duration::from_secs),
        );

    if let Some(timeout) = proxy_config.request_timeout_secs {
        client_builder = client_builder.timeout(Duration::from_secs(timeout));
    }

    if should_bypass_proxy {
        return Ok(client_builder.no_proxy());
    }

    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|error| tracing::error!(?error, "https proxy configuration error"))?,
        );
    }

    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|error| tracing::error!(?error, "http proxy configuration error"))?,
        );
    }

    Ok(client_builder)
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

async fn handle_response(
    response: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = response.status().as_u16();
    let headers = Some(response.headers().to_owned());

    let classify: fn(Response) -> Result<Response, Response> = match status_code {
        200..=299 => Ok,
        400..=599 => Err,
        _ => {
            tracing::warn!(status_code, "unexpected response status from connector");
            return Err(report!(ApiClientError::UnexpectedServerResponse(status_code)));
        }
    };

    let response = response
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;

    Ok(classify(Response {
        headers,
        response,
        status_code,
    }))
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use cards::{CardExpiration, CardNumber};
    use common_enums::{CaptureMethod, CardNetwork, CountryAlpha2, Currency};
    use common_utils::types::MinorUnit;
    use connector_integration::connectors::{Adyen, Stripe};
    use domain_types::{
        connector_flow::{Authorize, PaymentMethodToken},
        connector_types::{PaymentMethodTokenizationData, PaymentOptions, PaymentsAuthorizeData},
        payment_method_data::{Card, PaymentSource},
        router_data::ConnectorAuthType,
    };
    use hyperswitch_masking::{Mask, Secret};
    use interfaces::api::ConnectorCommon;

    use super::*;

    struct StubTransport {
        calls: AtomicUsize,
        reply: Mutex<Option<Result<Response, Response>>>,
    }

    impl StubTransport {
        fn replying(reply: Option<Result<Response, Response>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Mutex::new(reply),
            }
        }
    }

    #[async_trait::async_trait]
    impl ConnectorTransport for StubTransport {
        async fn send(
            &self,
            _request: Request,
        ) -> CustomResult<Result<Response, Response>, ApiClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| {
                    report!(ApiClientError::RequestNotSent("connection refused".to_string()))
                })
        }
    }

    fn response(body: &str, status_code: u16) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code,
        }
    }

    fn card() -> PaymentSource {
        PaymentSource::Card(Card {
            card_number: CardNumber::from_str("4242424242424242").unwrap(),
            card_expiration: CardExpiration::new(12, 2030).unwrap(),
            card_holder_first_name: None,
            card_holder_last_name: None,
            card_cvc: Some(Secret::new("123".to_string())),
            card_network: None,
        })
    }

    fn stripe_authorize() -> RouterData<Authorize, PaymentsAuthorizeData> {
        RouterData::new(
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("sk_test_key".to_string()),
            },
            "https://api.stripe.com/v1",
            true,
            PaymentsAuthorizeData {
                amount: MinorUnit::new(1000),
                currency: Currency::USD,
                payment_source: card(),
                capture_method: CaptureMethod::Automatic,
                options: PaymentOptions::default(),
            },
        )
    }

    #[tokio::test]
    async fn processing_step_normalizes_success_reply() {
        let transport = StubTransport::replying(Some(Ok(response(
            r#"{"id":"pi_1","status":"succeeded"}"#,
            200,
        ))));
        let result =
            execute_connector_processing_step(&transport, Stripe::new(), &stripe_authorize())
                .await
                .unwrap();

        assert!(result.is_success());
        assert_eq!(result.authorization(), Some("pi_1"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn processing_step_routes_error_replies() {
        let transport = StubTransport::replying(Some(Err(response(
            r#"{"error":{"code":"card_declined","message":"Your card was declined."}}"#,
            402,
        ))));
        let result =
            execute_connector_processing_step(&transport, Stripe::new(), &stripe_authorize())
                .await
                .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.message(), "Your card was declined.");
        assert_eq!(result.status_code(), 402);
    }

    #[tokio::test]
    async fn processing_step_reports_transport_failure() {
        let transport = StubTransport::replying(None);
        let error =
            execute_connector_processing_step(&transport, Stripe::new(), &stripe_authorize())
                .await
                .unwrap_err();

        assert_eq!(*error.current_context(), ConnectorError::TransportFailure);
        assert!(error.downcast_ref::<ApiClientError>().is_some());
    }

    struct NestedFormConnector;

    #[derive(serde::Serialize)]
    struct NestedFormBody {
        amount: i64,
        billing: BillingFields,
    }

    #[derive(serde::Serialize)]
    struct BillingFields {
        zip: String,
    }

    impl ConnectorCommon for NestedFormConnector {
        fn id(&self) -> &'static str {
            "nested_form"
        }

        fn display_name(&self) -> &'static str {
            "Nested Form"
        }

        fn homepage_url(&self) -> &'static str {
            "https://nested-form.test"
        }

        fn supported_countries(&self) -> &'static [CountryAlpha2] {
            &[]
        }

        fn supported_card_networks(&self) -> &'static [CardNetwork] {
            &[]
        }

        fn validate_auth_type(
            &self,
            _auth_type: &ConnectorAuthType,
        ) -> CustomResult<(), ConnectorError> {
            Ok(())
        }

        fn build_error_response(&self, res: Response, test_mode: bool) -> GatewayResponse {
            GatewayResponse::invalid_response(
                self.display_name(),
                &res.body_as_str(),
                test_mode,
                res.status_code,
            )
        }
    }

    impl ConnectorIntegration<Authorize, PaymentsAuthorizeData> for NestedFormConnector {
        fn get_url(
            &self,
            _req: &RouterData<Authorize, PaymentsAuthorizeData>,
        ) -> CustomResult<String, ConnectorError> {
            Ok("https://nested-form.test/payments".to_string())
        }

        fn get_request_body(
            &self,
            req: &RouterData<Authorize, PaymentsAuthorizeData>,
        ) -> CustomResult<Option<RequestContent>, ConnectorError> {
            Ok(Some(RequestContent::FormUrlEncoded(Box::new(NestedFormBody {
                amount: req.request.amount.0,
                billing: BillingFields {
                    zip: "10001".to_string(),
                },
            }))))
        }

        fn handle_response(
            &self,
            req: &RouterData<Authorize, PaymentsAuthorizeData>,
            res: Response,
        ) -> GatewayResponse {
            self.build_error_response(res, req.test_mode)
        }
    }

    impl ConnectorScrubbing for NestedFormConnector {
        fn scrub(&self, transcript: &str) -> String {
            transcript.to_string()
        }
    }

    #[tokio::test]
    async fn processing_step_rejects_unencodable_bodies_before_sending() {
        let transport = StubTransport::replying(None);
        let error = execute_connector_processing_step(
            &transport,
            &NestedFormConnector,
            &stripe_authorize(),
        )
        .await
        .unwrap_err();

        assert_eq!(*error.current_context(), ConnectorError::RequestEncodingFailed);
        assert!(error.downcast_ref::<common_utils::errors::ParsingError>().is_some());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn processing_step_checks_required_options_before_sending() {
        let transport = StubTransport::replying(None);
        let router_data = RouterData::<PaymentMethodToken, _>::new(
            ConnectorAuthType::BodyKey {
                api_key: Secret::new("api_key".to_string()),
                key1: Secret::new("MerchantAccount".to_string()),
            },
            "https://checkout-test.adyen.com/v71",
            true,
            PaymentMethodTokenizationData {
                payment_source: card(),
                currency: Currency::EUR,
                options: PaymentOptions::default(),
            },
        );
        let error = execute_connector_processing_step(&transport, Adyen::new(), &router_data)
            .await
            .unwrap_err();

        assert_eq!(
            *error.current_context(),
            ConnectorError::MissingRequiredFields {
                field_names: vec!["customer_id"]
            }
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn header_map_keeps_masked_values() {
        let mut headers = Headers::new();
        headers.insert((
            "Authorization".to_string(),
            "Bearer sk_test_key".to_string().into_masked(),
        ));
        headers.insert(("Content-Type".to_string(), "application/json".to_string().into()));

        let header_map = headers.construct_header_map().unwrap();
        assert_eq!(header_map["authorization"], "Bearer sk_test_key");
        assert_eq!(header_map["content-type"], "application/json");
    }

    #[test]
    fn header_map_rejects_invalid_names() {
        let mut headers = Headers::new();
        headers.insert(("bad header".to_string(), "value".to_string().into()));

        let error = headers.construct_header_map().unwrap_err();
        assert_eq!(
            *error.current_context(),
            ApiClientError::HeaderMapConstructionFailed
        );
    }

    #[test]
    fn bypassed_urls_use_the_direct_client() {
        let transport = HttpTransport::new(Proxy {
            https_url: Some("http://proxy.internal:3128".to_string()),
            request_timeout_secs: Some(30),
            bypass_proxy_urls: vec!["https://api.stripe.com".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert!(transport.proxied_client.is_some());
        assert!(std::ptr::eq(
            transport.client_for("https://api.stripe.com/v1/payment_intents"),
            &transport.client
        ));
        assert!(!std::ptr::eq(
            transport.client_for("https://secure.nmi.com/api/transact.php"),
            &transport.client
        ));
    }

    #[tokio::test]
    async fn malformed_urls_are_rejected_before_sending() {
        let transport = HttpTransport::new(Proxy::default()).unwrap();
        let error = transport
            .send(Request::new(Method::Post, "not a url"))
            .await
            .unwrap_err();

        assert_eq!(*error.current_context(), ApiClientError::UrlParsingFailed);
    }
}
