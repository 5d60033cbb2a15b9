use common_enums::Currency;
use common_utils::{
    consts::SCRUBBED, errors::ParsingError, ext_traits::ByteSliceExt, types::AmountConvertor,
    MinorUnit,
};
use domain_types::{
    errors,
    payment_method_data::PaymentSource,
    router_data::RouterData,
    router_response_types::{GatewayResponse, Response},
};
use error_stack::{report, Report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::types::ResponseRouterData;

type Error = Report<errors::ConnectorError>;

pub fn missing_field_err(field_name: &'static str) -> Error {
    report!(errors::ConnectorError::MissingRequiredField { field_name })
}

/// Copies one credential value out of the configured auth type. Empty or
/// whitespace-only values count as missing.
pub fn non_blank_credential(
    value: &Secret<String>,
) -> Result<Secret<String>, errors::ConnectorError> {
    if value.peek().trim().is_empty() {
        return Err(errors::ConnectorError::FailedToObtainAuthType);
    }
    Ok(value.to_owned())
}

/// Appends `segments` to `base_url` as percent-encoded path segments.
pub fn join_url_segments(base_url: &str, segments: &[&str]) -> Result<String, Error> {
    let mut url = url::Url::parse(base_url).change_context(
        errors::ConnectorError::InvalidConnectorConfig { config: "base_url" },
    )?;
    url.path_segments_mut()
        .map_err(|()| {
            report!(errors::ConnectorError::InvalidConnectorConfig { config: "base_url" })
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

pub fn payment_source_not_supported(
    source: &PaymentSource,
    flow: &str,
    connector: &'static str,
) -> Error {
    report!(errors::ConnectorError::NotSupported {
        message: format!("{} {flow}", source.name()),
        connector,
    })
}

pub fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
    currency: Currency,
) -> Result<T, Error> {
    amount_convertor
        .convert(amount, currency)
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

/// Top level fields of a JSON object body; anything else yields an empty map.
pub fn json_params(body: &[u8]) -> Map<String, Value> {
    serde_json::from_slice::<Map<String, Value>>(body).unwrap_or_default()
}

/// Pairs of a form-urlencoded body as string values.
pub fn form_params(body: &[u8]) -> Map<String, Value> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Failure for a reply body that does not decode into what the connector sends.
pub fn invalid_response(
    display_name: &str,
    res: &Response,
    test_mode: bool,
    error: &Report<ParsingError>,
) -> GatewayResponse {
    tracing::warn!(
        connector = display_name,
        status_code = res.status_code,
        ?error,
        "undecodable connector response"
    );
    GatewayResponse::invalid_response(display_name, &res.body_as_str(), test_mode, res.status_code)
}

/// Decodes a JSON reply. `Err` carries the ready-made invalid-response failure.
pub fn decode_json<'a, T, F, Req>(
    display_name: &str,
    req: &'a RouterData<F, Req>,
    res: &Response,
    type_name: &'static str,
) -> Result<ResponseRouterData<T, &'a RouterData<F, Req>>, GatewayResponse>
where
    T: DeserializeOwned,
{
    res.response
        .parse_struct::<T>(type_name)
        .map(|response| ResponseRouterData {
            response,
            router_data: req,
            http_code: res.status_code,
            params: json_params(&res.response),
        })
        .map_err(|error| invalid_response(display_name, res, req.test_mode, &error))
}

/// Form-urlencoded counterpart of [`decode_json`].
pub fn decode_form<'a, T, F, Req>(
    display_name: &str,
    req: &'a RouterData<F, Req>,
    res: &Response,
    type_name: &'static str,
) -> Result<ResponseRouterData<T, &'a RouterData<F, Req>>, GatewayResponse>
where
    T: DeserializeOwned,
{
    res.response
        .parse_form::<T>(type_name)
        .map(|response| ResponseRouterData {
            response,
            router_data: req,
            http_code: res.status_code,
            params: form_params(&res.response),
        })
        .map_err(|error| invalid_response(display_name, res, req.test_mode, &error))
}

/// Compiles scrub patterns. Each pattern's first capture group is kept and
/// everything matched after it is replaced.
pub fn compile_scrub_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(error) => {
                tracing::error!(pattern, %error, "invalid scrub pattern");
                None
            }
        })
        .collect()
}

pub fn scrub_transcript(transcript: &str, patterns: &[Regex]) -> String {
    let replacement = format!("${{1}}{SCRUBBED}");
    patterns
        .iter()
        .fold(transcript.to_string(), |text, pattern| {
            pattern
                .replace_all(&text, replacement.as_str())
                .into_owned()
        })
}

#[cfg(test)]
mod tests {
    use common_utils::consts::RAW_RESPONSE_KEY;
    use domain_types::router_data::ConnectorAuthType;

    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Reply {
        status: String,
    }

    fn response(body: &'static [u8]) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from_static(body),
            status_code: 200,
        }
    }

    #[test]
    fn decode_json_keeps_request_and_params() {
        let req =
            RouterData::<(), ()>::new(ConnectorAuthType::NoKey, "https://example.test", true, ());
        let body = response(br#"{"status":"ok","id":"1"}"#);
        let decoded = decode_json::<Reply, _, _>("Example", &req, &body, "Reply").unwrap();
        assert_eq!(decoded.response.status, "ok");
        assert_eq!(decoded.params.len(), 2);
        assert_eq!(decoded.http_code, 200);
    }

    #[test]
    fn undecodable_body_becomes_invalid_response() {
        let req =
            RouterData::<(), ()>::new(ConnectorAuthType::NoKey, "https://example.test", false, ());
        let failure = decode_json::<Reply, _, _>("Example", &req, &response(b"not json"), "Reply")
            .unwrap_err();
        assert!(!failure.is_success());
        assert!(failure
            .message()
            .starts_with("Invalid response received from the Example API."));
        assert_eq!(failure.params().get(RAW_RESPONSE_KEY), Some(&Value::from("not json")));

        let failure = decode_form::<Reply, _, _>("Example", &req, &response(b"other=1"), "Reply")
            .unwrap_err();
        assert!(!failure.is_success());
    }

    #[test]
    fn params_from_json_and_form() {
        let json = json_params(br#"{"resultCode":"Authorised","pspReference":"881"}"#);
        assert_eq!(json.get("resultCode"), Some(&Value::from("Authorised")));
        assert!(json_params(b"not json").is_empty());
        assert!(json_params(b"[1,2]").is_empty());

        let form = form_params(b"response=1&responsetext=SUCCESS&transactionid=42");
        assert_eq!(form.get("transactionid"), Some(&Value::from("42")));
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        for value in ["", "   ", "\t\n"] {
            assert_eq!(
                non_blank_credential(&Secret::new(value.to_string())).unwrap_err(),
                errors::ConnectorError::FailedToObtainAuthType
            );
        }
        let key = non_blank_credential(&Secret::new("sk_test_key".to_string())).unwrap();
        assert_eq!(key.peek(), "sk_test_key");
    }

    #[test]
    fn url_segments_are_percent_encoded() {
        assert_eq!(
            join_url_segments(
                "https://api.stripe.com/v1/",
                &["payment_intents", "pi 1/x?y#z", "capture"]
            )
            .unwrap(),
            "https://api.stripe.com/v1/payment_intents/pi%201%2Fx%3Fy%23z/capture"
        );
        for base_url in ["not a url", "mailto:ops@example.com"] {
            assert_eq!(
                join_url_segments(base_url, &["payments"]).unwrap_err().current_context(),
                &errors::ConnectorError::InvalidConnectorConfig { config: "base_url" }
            );
        }
    }

    #[test]
    fn scrub_keeps_prefix() {
        let patterns = compile_scrub_patterns(&[r"(ccnumber=)\d+", r"(cvv=)\d+", r"(unclosed"]);
        assert_eq!(patterns.len(), 2);
        assert_eq!(
            scrub_transcript("ccnumber=4111111111111111&cvv=123&amount=1.00", &patterns),
            "ccnumber=[FILTERED]&cvv=[FILTERED]&amount=1.00"
        );
    }
}
