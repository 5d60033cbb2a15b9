#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use cards::{CardExpiration, CardNumber};
use common_enums::{CaptureMethod, Currency};
use common_utils::types::MinorUnit;
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken},
    connector_types::{
        PaymentMethodTokenizationData, PaymentOptions, PaymentsAuthorizeData, PaymentsCaptureData,
    },
    errors::ConnectorError,
    payment_method_data::{Card, PaymentSource, StoredCredential},
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{ErrorCode, ErrorKind, Response},
};
use hyperswitch_masking::{ExposeInterface, Maskable, PeekInterface, Secret};
use interfaces::{api::ConnectorScrubbing, connector_integration::ConnectorIntegration};
use serde_json::Value;

use super::Adyen;

const BASE_URL: &str = "https://checkout-test.adyen.com/v71";

fn auth() -> ConnectorAuthType {
    ConnectorAuthType::BodyKey {
        api_key: Secret::new("AQE_test_key".to_string()),
        key1: Secret::new("TestMerchant".to_string()),
    }
}

fn card() -> PaymentSource {
    PaymentSource::Card(Card {
        card_number: CardNumber::from_str("4111111111111111").unwrap(),
        card_expiration: CardExpiration::new(3, 2030).unwrap(),
        card_holder_first_name: Some(Secret::new("Jane".to_string())),
        card_holder_last_name: Some(Secret::new("Doe".to_string())),
        card_cvc: Some(Secret::new("737".to_string())),
        card_network: None,
    })
}

fn authorize_data(
    payment_source: PaymentSource,
    capture_method: CaptureMethod,
    options: PaymentOptions,
) -> RouterData<Authorize, PaymentsAuthorizeData> {
    RouterData::new(
        auth(),
        BASE_URL,
        true,
        PaymentsAuthorizeData {
            amount: MinorUnit::new(1000),
            currency: Currency::USD,
            payment_source,
            capture_method,
            options,
        },
    )
}

fn body_json<F, Req>(req: &RouterData<F, Req>) -> Value
where
    Adyen: ConnectorIntegration<F, Req>,
{
    let request = Adyen::new().build_request(req).unwrap();
    let body = request.body.unwrap().encode().unwrap().expose();
    serde_json::from_str(&body).unwrap()
}

fn response(body: &str, status_code: u16) -> Response {
    Response {
        headers: None,
        response: bytes::Bytes::from(body.to_string()),
        status_code,
    }
}

#[test]
fn test_adyen_authorize_request_creation() {
    let options = PaymentOptions {
        order_id: Some("order-42".to_string()),
        ..Default::default()
    };
    let req = authorize_data(card(), CaptureMethod::Automatic, options);
    let request = Adyen::new().build_request(&req).unwrap();

    assert_eq!(request.url, format!("{BASE_URL}/payments"));
    match request.header("x-api-key").unwrap() {
        Maskable::Masked(secret) => assert_eq!(secret.peek(), "AQE_test_key"),
        Maskable::Normal(_) => panic!("api key must be masked"),
    }

    let body = body_json(&req);
    assert_eq!(body["amount"]["value"], 1000);
    assert_eq!(body["amount"]["currency"], "USD");
    assert_eq!(body["merchantAccount"], "TestMerchant");
    assert_eq!(body["reference"], "order-42");
    assert_eq!(body["shopperInteraction"], "Ecommerce");
    assert_eq!(body["paymentMethod"]["type"], "scheme");
    assert_eq!(body["paymentMethod"]["number"], "4111111111111111");
    assert_eq!(body["paymentMethod"]["expiryMonth"], "03");
    assert_eq!(body["paymentMethod"]["expiryYear"], "2030");
    assert_eq!(body["paymentMethod"]["holderName"], "Jane Doe");
    assert_eq!(body["paymentMethod"]["brand"], "visa");
    assert!(body.get("additionalData").is_none());
    assert!(body.get("billingAddress").is_none());
}

#[test]
fn test_adyen_manual_capture_and_generated_reference() {
    let req = authorize_data(card(), CaptureMethod::Manual, PaymentOptions::default());
    let body = body_json(&req);

    assert_eq!(body["additionalData"]["manualCapture"], "true");
    assert!(body["reference"].as_str().unwrap().starts_with("ref_"));
}

#[test]
fn test_adyen_basic_auth_header() {
    let mut req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    req.connector_auth_type = ConnectorAuthType::SignatureKey {
        api_key: Secret::new("ws_user".to_string()),
        key1: Secret::new("TestMerchant".to_string()),
        api_secret: Secret::new("secret".to_string()),
    };
    let request = Adyen::new().build_request(&req).unwrap();

    match request.header("Authorization").unwrap() {
        Maskable::Masked(secret) => assert_eq!(secret.peek(), "Basic d3NfdXNlcjpzZWNyZXQ="),
        Maskable::Normal(_) => panic!("credentials must be masked"),
    }
    assert!(request.header("X-API-Key").is_none());
}

#[test]
fn test_adyen_rejects_header_key_auth() {
    let mut req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    req.connector_auth_type = ConnectorAuthType::HeaderKey {
        api_key: Secret::new("key".to_string()),
    };
    let error = Adyen::new().build_request(&req).unwrap_err();
    assert_eq!(*error.current_context(), ConnectorError::FailedToObtainAuthType);
}

#[test]
fn test_adyen_stored_credential_needs_shopper_reference() {
    let stored = |customer_reference: Option<&str>| {
        PaymentSource::StoredCredential(StoredCredential {
            billing_id: Secret::new("8415995487234100".to_string()),
            customer_reference: customer_reference.map(str::to_string),
        })
    };

    let req = authorize_data(stored(None), CaptureMethod::Automatic, PaymentOptions::default());
    let error = Adyen::new().build_request(&req).unwrap_err();
    assert_eq!(
        *error.current_context(),
        ConnectorError::MissingRequiredField {
            field_name: "customer_id"
        }
    );

    let req = authorize_data(
        stored(Some("shopper-7")),
        CaptureMethod::Automatic,
        PaymentOptions::default(),
    );
    let body = body_json(&req);
    assert_eq!(body["paymentMethod"]["storedPaymentMethodId"], "8415995487234100");
    assert_eq!(body["shopperReference"], "shopper-7");
    assert_eq!(body["shopperInteraction"], "ContAuth");
    assert_eq!(body["recurringProcessingModel"], "UnscheduledCardOnFile");
}

#[test]
fn test_adyen_billing_address_requires_country() {
    let mut options = PaymentOptions {
        billing_address: Some(domain_types::connector_types::Address {
            line1: Some(Secret::new("1 Main St".to_string())),
            city: Some("Amsterdam".to_string()),
            zip: Some(Secret::new("1011".to_string())),
            ..Default::default()
        }),
        ..Default::default()
    };
    let body = body_json(&authorize_data(card(), CaptureMethod::Automatic, options.clone()));
    assert!(body.get("billingAddress").is_none());

    if let Some(address) = options.billing_address.as_mut() {
        address.country = Some(common_enums::CountryAlpha2::NL);
    }
    let body = body_json(&authorize_data(card(), CaptureMethod::Automatic, options));
    assert_eq!(body["billingAddress"]["country"], "NL");
    assert_eq!(body["billingAddress"]["houseNumberOrName"], "N/A");
    assert_eq!(body["billingAddress"]["street"], "1 Main St");
}

#[test]
fn test_adyen_authorised_response() {
    let req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    let res = response(
        r#"{
            "pspReference": "881539337152396J",
            "resultCode": "Authorised",
            "additionalData": {
                "avsResult": "7 Both postal code and address match",
                "cvcResult": "1 Matches",
                "fraudManualReview": "false",
                "networkTxReference": "MCC123456789"
            }
        }"#,
        200,
    );
    let response = Adyen::new().handle_response(&req, res);

    assert!(response.is_success());
    assert_eq!(response.message(), "Authorised");
    assert_eq!(response.authorization(), Some("881539337152396J"));
    assert_eq!(response.avs_result().unwrap().code(), 'D');
    assert_eq!(response.cvv_result().unwrap().code(), 'M');
    assert!(!response.is_fraud_review());
    assert_eq!(response.network_transaction_id(), Some("MCC123456789"));
    assert!(response.error_code().is_none());
    assert!(response.is_test());
}

#[test]
fn test_adyen_refused_response_maps_refusal_code() {
    let req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    let res = response(
        r#"{"pspReference":"881","resultCode":"Refused","refusalReason":"Expired Card","refusalReasonCode":"6"}"#,
        200,
    );
    let response = Adyen::new().handle_response(&req, res);

    assert!(!response.is_success());
    assert_eq!(response.message(), "Expired Card");
    assert_eq!(
        response.error_code(),
        Some(&ErrorCode::Standard(ErrorKind::ExpiredCard))
    );
}

#[test]
fn test_adyen_unparseable_response() {
    let req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    let response = Adyen::new().handle_response(&req, response("not json", 200));

    assert!(!response.is_success());
    assert!(response
        .message()
        .starts_with("Invalid response received from the Adyen API."));
    assert_eq!(response.params()["raw_response"], "not json");
}

#[test]
fn test_adyen_capture_received() {
    let req = RouterData::<Capture, PaymentsCaptureData>::new(
        auth(),
        BASE_URL,
        false,
        PaymentsCaptureData {
            amount_to_capture: MinorUnit::new(500),
            currency: Currency::EUR,
            connector_transaction_id: "881539337152396J".to_string(),
            options: PaymentOptions::default(),
        },
    );
    let request = Adyen::new().build_request(&req).unwrap();
    assert_eq!(
        request.url,
        format!("{BASE_URL}/payments/881539337152396J/captures")
    );
    assert_eq!(body_json(&req)["amount"]["value"], 500);

    let res = response(
        r#"{"merchantAccount":"TestMerchant","paymentPspReference":"881539337152396J","pspReference":"991","reference":"ref","status":"received"}"#,
        201,
    );
    let response = Adyen::new().handle_response(&req, res);
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some("991"));
    assert_eq!(response.status_code(), 201);
    assert!(!response.is_test());
}

#[test]
fn test_adyen_error_response_mapping() {
    let req = authorize_data(card(), CaptureMethod::Automatic, PaymentOptions::default());
    let known = Adyen::new().get_error_response(
        &req,
        response(
            r#"{"status":422,"errorCode":"101","message":"Invalid card number","errorType":"validation"}"#,
            422,
        ),
    );
    assert!(!known.is_success());
    assert_eq!(known.message(), "Invalid card number");
    assert_eq!(
        known.error_code(),
        Some(&ErrorCode::Standard(ErrorKind::IncorrectNumber))
    );
    assert_eq!(known.status_code(), 422);

    let unknown = Adyen::new().get_error_response(
        &req,
        response(r#"{"status":403,"errorCode":"905","errorType":"security"}"#, 403),
    );
    assert_eq!(
        unknown.error_code(),
        Some(&ErrorCode::Unmapped("905".to_string()))
    );
    assert_eq!(unknown.message(), "No error message");
}

#[test]
fn test_adyen_store_returns_stored_payment_method_id() {
    let req = RouterData::<PaymentMethodToken, PaymentMethodTokenizationData>::new(
        auth(),
        BASE_URL,
        true,
        PaymentMethodTokenizationData {
            payment_source: card(),
            currency: Currency::USD,
            options: PaymentOptions {
                customer_id: Some("shopper-7".to_string()),
                ..Default::default()
            },
        },
    );
    let body = body_json(&req);
    assert_eq!(body["amount"]["value"], 0);
    assert_eq!(body["storePaymentMethod"], true);
    assert_eq!(body["shopperReference"], "shopper-7");
    assert_eq!(body["recurringProcessingModel"], "CardOnFile");

    let res = response(
        r#"{"pspReference":"881","resultCode":"Authorised","additionalData":{"tokenization.storedPaymentMethodId":"M5N7TQ4TG5PFWR50"}}"#,
        200,
    );
    let response = Adyen::new().handle_response(&req, res);
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some("M5N7TQ4TG5PFWR50"));
}

#[test]
fn test_adyen_store_without_stored_reference_fails() {
    let req = RouterData::<PaymentMethodToken, PaymentMethodTokenizationData>::new(
        auth(),
        BASE_URL,
        true,
        PaymentMethodTokenizationData {
            payment_source: card(),
            currency: Currency::USD,
            options: PaymentOptions {
                customer_id: Some("shopper-7".to_string()),
                ..Default::default()
            },
        },
    );

    let res = response(r#"{"pspReference":"882","resultCode":"Authorised"}"#, 200);
    let missing = Adyen::new().handle_response(&req, res);
    assert!(!missing.is_success());
    assert!(!missing.message().is_empty());
    assert_eq!(missing.authorization(), None);

    let legacy = response(
        r#"{"pspReference":"883","resultCode":"Authorised","additionalData":{"recurring.recurringDetailReference":"8415995487234100"}}"#,
        200,
    );
    let legacy = Adyen::new().handle_response(&req, legacy);
    assert!(legacy.is_success());
    assert_eq!(legacy.authorization(), Some("8415995487234100"));
}

#[test]
fn test_adyen_scrub() {
    let transcript = r#"X-API-Key: AQE_test_key
{"paymentMethod":{"type":"scheme","number":"4111111111111111","cvc":"737"},"merchantAccount":"TestMerchant"}"#;
    let scrubbed = Adyen::new().scrub(transcript);

    assert!(!scrubbed.contains("4111111111111111"));
    assert!(!scrubbed.contains("737"));
    assert!(!scrubbed.contains("AQE_test_key"));
    assert!(scrubbed.contains(r#""number":"[FILTERED]""#));
    assert!(scrubbed.contains("TestMerchant"));
}
