mod constants;
#[cfg(test)]
mod test;
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
        OptionKey, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
    errors::ConnectorError,
    payment_method_data::PaymentSource,
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{GatewayResponse, Response},
};
use error_stack::ResultExt;
use hyperswitch_masking::Maskable;
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
    self as adyen, AdyenCancelRequest, AdyenCaptureRequest, AdyenModificationResponse,
    AdyenPaymentRequest, AdyenPaymentResponse, AdyenRefundRequest, AdyenRouterData,
};

use crate::utils;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const X_API_KEY: &str = "X-API-Key";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

static SCRUB_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    utils::compile_scrub_patterns(&[
        r#"("number"\s*:\s*")[^"]*"#,
        r#"("cvc"\s*:\s*")[^"]*"#,
        r#"("bankAccountNumber"\s*:\s*")[^"]*"#,
        r#"("bankLocationId"\s*:\s*")[^"]*"#,
        r"(?i)(x-api-key:\s*)\S+",
        r"(?i)(authorization:\s*basic\s+)\S+",
    ])
});

#[derive(Clone)]
pub struct Adyen {
    amount_converter: &'static (dyn AmountConvertor<Output = MinorUnit> + Sync),
}

impl Adyen {
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

impl ConnectorServiceTrait for Adyen {}
impl PaymentAuthorize for Adyen {}
impl PaymentCapture for Adyen {}
impl RefundExecute for Adyen {}
impl PaymentVoid for Adyen {}
impl PaymentToken for Adyen {}

impl ConnectorCommon for Adyen {
    fn id(&self) -> &'static str {
        "adyen"
    }

    fn display_name(&self) -> &'static str {
        "Adyen"
    }

    fn homepage_url(&self) -> &'static str {
        "https://www.adyen.com/"
    }

    fn supported_countries(&self) -> &'static [CountryAlpha2] {
        use CountryAlpha2::*;
        &[
            AT, AU, BE, BG, BR, CA, CH, CY, CZ, DE, DK, EE, ES, FI, FR, GB, GI, GR, HK, HR, HU,
            IE, IS, IT, JP, LI, LT, LU, LV, MC, MT, MX, MY, NL, NO, NZ, PL, PT, RO, SE, SG, SI,
            SK, US,
        ]
    }

    fn supported_card_networks(&self) -> &'static [CardNetwork] {
        &[
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::AmericanExpress,
            CardNetwork::Discover,
            CardNetwork::DinersClub,
            CardNetwork::JCB,
            CardNetwork::Maestro,
        ]
    }

    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn validate_auth_type(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<(), ConnectorError> {
        adyen::AdyenAuthType::try_from(auth_type)?;
        Ok(())
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let auth = adyen::AdyenAuthType::try_from(auth_type)
            .change_context(ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![auth.auth_header()])
    }

    fn build_error_response(&self, res: Response, test_mode: bool) -> GatewayResponse {
        let response: adyen::AdyenErrorResponse = match res
            .response
            .parse_struct("AdyenErrorResponse")
        {
            Ok(response) => response,
            Err(error) => {
                return utils::invalid_response(self.display_name(), &res, test_mode, &error)
            }
        };

        let error_code = response
            .error_code
            .as_deref()
            .map(|code| constants::ERROR_CODES.map(code));
        GatewayResponse::new(
            false,
            response.message.unwrap_or_default(),
            utils::json_params(&res.response),
            test_mode,
        )
        .with_authorization(response.psp_reference)
        .with_error_code(error_code)
        .with_status_code(res.status_code)
    }
}

impl ConnectorScrubbing for Adyen {
    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        utils::scrub_transcript(transcript, &SCRUB_PATTERNS)
    }
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData> for Adyen {
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
        Ok(format!("{}/payments", req.base_url))
    }

    fn get_request_body(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount =
            utils::convert_amount(self.amount_converter, req.request.amount, req.request.currency)?;
        let connector_req = AdyenPaymentRequest::try_from(AdyenRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<AdyenPaymentResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "AdyenPaymentResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Capture, PaymentsCaptureData> for Adyen {
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
            &["payments", req.request.connector_transaction_id.as_str(), "captures"],
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
        let connector_req = AdyenCaptureRequest::try_from(AdyenRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<AdyenModificationResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "AdyenCaptureResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Refund, RefundsData> for Adyen {
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
        utils::join_url_segments(
            &req.base_url,
            &["payments", req.request.connector_transaction_id.as_str(), "refunds"],
        )
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
        let connector_req = AdyenRefundRequest::try_from(AdyenRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Refund, RefundsData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<AdyenModificationResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "AdyenRefundResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<Void, PaymentVoidData> for Adyen {
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
            &["payments", req.request.connector_transaction_id.as_str(), "cancels"],
        )
    }

    fn get_request_body(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = AdyenCancelRequest::try_from(req)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<AdyenModificationResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "AdyenCancelResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorIntegration<PaymentMethodToken, PaymentMethodTokenizationData> for Adyen {
    fn required_options(&self) -> &'static [OptionKey] {
        &[OptionKey::CustomerId]
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
        Ok(format!("{}/payments", req.base_url))
    }

    fn validate_request(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<(), ConnectorError> {
        match &req.request.payment_source {
            PaymentSource::Card(_) | PaymentSource::BankAccount(_) => Ok(()),
            source => Err(utils::payment_source_not_supported(
                source,
                "store",
                self.display_name(),
            )),
        }
    }

    fn get_request_body(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = AdyenPaymentRequest::try_from(req)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_json::<AdyenPaymentResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "AdyenStoreResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}
