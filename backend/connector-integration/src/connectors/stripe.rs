pub mod transformers;

use common_enums::{CardNetwork, CountryAlpha2, CurrencyUnit};
use common_utils::{
    errors::CustomResult,
    ext_traits::ByteSliceExt,
    request::RequestContent,
    types::{AmountConvertor, MinorUnit, MinorUnitForConnector},
};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
    errors::ConnectorError,
    payment_method_data::PaymentSource,
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{GatewayResponse, Response},
};
use error_stack::ResultExt;
use hyperswitch_masking::{Mask, Maskable, PeekInterface};
use interfaces::{
    api::{ConnectorCommon, ConnectorScrubbing},
    connector_integration::ConnectorIntegration,
    connector_types::{
        ConnectorServiceTrait, PaymentAuthorize, PaymentCapture, PaymentToken, PaymentVoid,
        RefundExecute,
    },
};
use once_cell::sync::Lazy;
use regex::Regex;
use transformers::{
    self as stripe, auth_headers, CancelRequest, CaptureRequest, PaymentIntentRequest,
    PaymentIntentResponse, RefundRequest, RefundResponse, StripePaymentMethodRequest,
    StripePaymentMethodResponse, StripeRouterData,
};

use crate::utils;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

static SCRUB_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    utils::compile_scrub_patterns(&[
        r"(number(?:%5D|\])=)[^&\s]*",
        r"(cvc(?:%5D|\])=)[^&\s]*",
        r"(?i)(authorization:\s*bearer\s+)\S+",
        r"(sk_(?:test|live)_)[0-9a-zA-Z]+",
    ])
});

#[derive(Clone)]
pub struct Stripe {
    amount_converter: &'static (dyn AmountConvertor<Output = MinorUnit> + Sync),
}

impl Stripe {
    pub const fn new() -> &'static Self {
        &Self {
            amount_converter: &MinorUnitForConnector,
        }
    }

    fn build_headers<F, Req>(
        &self,
        req: &RouterData<F, Req>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let mut header = vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )];
        let mut api_key = self.get_auth_header(&req.connector_auth_type)?;
        header.append(&mut api_key);
        Ok(header)
    }
}

impl ConnectorServiceTrait for Stripe {}
impl PaymentAuthorize for Stripe {}
impl PaymentCapture for Stripe {}
impl RefundExecute for Stripe {}
impl PaymentVoid for Stripe {}
impl PaymentToken for Stripe {}

impl ConnectorCommon for Stripe {
    fn id(&self) -> &'static str {
        "stripe"
    }

    fn display_name(&self) -> &'static str {
        "Stripe"
    }

    fn homepage_url(&self) -> &'static str {
        "https://stripe.com/"
    }

    fn supported_countries(&self) -> &'static [CountryAlpha2] {
        use CountryAlpha2::*;
        &[
            AE, AT, AU, BE, BG, BR, CA, CH, CY, CZ, DE, DK, EE, ES, FI, FR, GB, GI, GR, HK, HR,
            HU, IE, IN, IT, JP, LI, LT, LU, LV, MT, MX, MY, NL, NO, NZ, PL, PT, RO, SE, SG, SI,
            SK, TH, US,
        ]
    }

    fn supported_card_networks(&self) -> &'static [CardNetwork] {
        &[
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::AmericanExpress,
            CardNetwork::Discover,
            CardNetwork::JCB,
            CardNetwork::DinersClub,
        ]
    }

    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn validate_auth_type(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<(), ConnectorError> {
        stripe::StripeAuthType::try_from(auth_type)?;
        Ok(())
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let auth = stripe::StripeAuthType::try_from(auth_type)
            .change_context(ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![
            (
                headers::AUTHORIZATION.to_string(),
                format!("Bearer {}", auth.api_key.peek()).into_masked(),
            ),
            (
                auth_headers::STRIPE_API_VERSION.to_string(),
                auth_headers::STRIPE_VERSION.to_string().into(),
            ),
        ])
    }

    fn build_error_response(&self, res: Response, test_mode: bool) -> GatewayResponse {
        match res.response.parse_struct::<stripe::ErrorResponse>("ErrorResponse") {
            Ok(response) => response.error.into_gateway_response(
                utils::json_params(&res.response),
                test_mode,
                res.status_code,
            ),
            Err(error) => utils::invalid_response(self.display_name(), &res, test_mode, &error),
        }
    }
}

impl ConnectorScrubbing for Stripe {
    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        utils::scrub_transcript(transcript, &SCRUB_PATTERNS)
    }
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData> for Stripe {
    fn validate_request(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<(), ConnectorError> {
        match &req.request.payment_source {
            source @ PaymentSource::BankAccount(_) => Err(utils::payment_source_not_supported(
                source,
                "authorize",
                self.display_name(),
            )),
            PaymentSource::Card(_)
            | PaymentSource::Token(_)
            | PaymentSource::StoredCredential(_) => Ok(()),
        }
    }

    fn get_headers(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(format!("{}/payment_intents", req.base_url))
    }

    fn get_request_body(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount =
            utils::convert_amount(self.amount_converter, req.request.amount, req.request.currency)?;
        let connector_req = PaymentIntentRequest::try_from(StripeRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<PaymentIntentResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "PaymentIntentResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Capture, PaymentsCaptureData> for Stripe {
    fn get_headers(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
    ) -> CustomResult<String, ConnectorError> {
        utils::join_url_segments(
            &req.base_url,
            &["payment_intents", req.request.connector_transaction_id.as_str(), "capture"],
        )
    }

    fn get_request_body(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.amount_to_capture,
            req.request.currency,
        )?;
        let connector_req = CaptureRequest::try_from(StripeRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<PaymentIntentResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "PaymentIntentResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Refund, RefundsData> for Stripe {
    fn get_headers(
        &self,
        req: &RouterData<Refund, RefundsData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterData<Refund, RefundsData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(format!("{}/refunds", req.base_url))
    }

    fn get_request_body(
        &self,
        req: &RouterData<Refund, RefundsData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.refund_amount,
            req.request.currency,
        )?;
        let connector_req = RefundRequest::try_from(StripeRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Refund, RefundsData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<RefundResponse, _, _>(self.display_name(), req, &res, "RefundResponse")
            .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Void, PaymentVoidData> for Stripe {
    fn get_headers(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<String, ConnectorError> {
        utils::join_url_segments(
            &req.base_url,
            &["payment_intents", req.request.connector_transaction_id.as_str(), "cancel"],
        )
    }

    fn get_request_body(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = CancelRequest::try_from(req)?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<PaymentIntentResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "PaymentIntentResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<PaymentMethodToken, PaymentMethodTokenizationData> for Stripe {
    fn validate_request(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<(), ConnectorError> {
        match &req.request.payment_source {
            PaymentSource::Card(_) => Ok(()),
            source => Err(utils::payment_source_not_supported(
                source,
                "store",
                self.display_name(),
            )),
        }
    }

    fn get_headers(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(format!("{}/payment_methods", req.base_url))
    }

    fn get_request_body(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = StripePaymentMethodRequest::try_from(req)?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<StripePaymentMethodResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "StripePaymentMethodResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}
