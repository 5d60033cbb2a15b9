pub mod transformers;

use common_enums::{CardNetwork, CountryAlpha2, CurrencyUnit};
use common_utils::{
    errors::CustomResult,
    ext_traits::ByteSliceExt,
    request::RequestContent,
    types::{AmountConvertor, StringMajorUnit, StringMajorUnitForConnector},
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
    self as nmi, NmiFollowUpRequest, NmiPaymentsRequest, NmiPaymentsResponse, NmiRouterData,
    NmiVaultRequest, NmiVaultResponse, NmiVoidRequest,
};

use crate::utils;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

static SCRUB_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    utils::compile_scrub_patterns(&[
        r"(\bsecurity_key=)[^&\s]*",
        r"(\bccnumber=)[^&\s]*",
        r"(\bcvv=)[^&\s]*",
        r"(\bcheckaba=)[^&\s]*",
        r"(\bcheckaccount=)[^&\s]*",
    ])
});

#[derive(Clone)]
pub struct Nmi {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMajorUnit> + Sync),
}

impl Nmi {
    pub const fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMajorUnitForConnector,
        }
    }

    /// The key travels in the body, so only the content type goes in the headers.
    fn build_headers(&self) -> Vec<(String, Maskable<String>)> {
        vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )]
    }

    fn handle_transact_response<F, Req>(
        &self,
        req: &RouterData<F, Req>,
        res: &Response,
    ) -> GatewayResponse {
        utils::decode_form::<NmiPaymentsResponse, _, _>(
            self.display_name(),
            req,
            res,
            "NmiPaymentsResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}

impl ConnectorServiceTrait for Nmi {}
impl PaymentAuthorize for Nmi {}
impl PaymentCapture for Nmi {}
impl RefundExecute for Nmi {}
impl PaymentVoid for Nmi {}
impl PaymentToken for Nmi {}

impl ConnectorCommon for Nmi {
    fn id(&self) -> &'static str {
        "nmi"
    }

    fn display_name(&self) -> &'static str {
        "NMI"
    }

    fn homepage_url(&self) -> &'static str {
        "https://nmi.com/"
    }

    fn supported_countries(&self) -> &'static [CountryAlpha2] {
        &[CountryAlpha2::US]
    }

    fn supported_card_networks(&self) -> &'static [CardNetwork] {
        &[
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::AmericanExpress,
            CardNetwork::Discover,
        ]
    }

    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Base
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn validate_auth_type(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<(), ConnectorError> {
        nmi::NmiAuthType::try_from(auth_type)?;
        Ok(())
    }

    fn build_error_response(&self, res: Response, test_mode: bool) -> GatewayResponse {
        match res
            .response
            .parse_form::<NmiPaymentsResponse>("NmiPaymentsResponse")
        {
            Ok(response) if !response.is_approved() => {
                let authorization = response.transactionid.clone();
                response.into_gateway_response(
                    authorization,
                    utils::form_params(&res.response),
                    test_mode,
                    res.status_code,
                )
            }
            // an approval on a non-2xx reply cannot be trusted
            Ok(_) => GatewayResponse::invalid_response(
                self.display_name(),
                &res.body_as_str(),
                test_mode,
                res.status_code,
            ),
            Err(error) => utils::invalid_response(self.display_name(), &res, test_mode, &error),
        }
    }
}

impl ConnectorScrubbing for Nmi {
    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        utils::scrub_transcript(transcript, &SCRUB_PATTERNS)
    }
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData> for Nmi {
    fn get_headers(
        &self,
        _req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(req.base_url.clone())
    }

    fn get_request_body(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount =
            utils::convert_amount(self.amount_converter, req.request.amount, req.request.currency)?;
        let connector_req = NmiPaymentsRequest::try_from(NmiRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Authorize, PaymentsAuthorizeData>,
        res: Response,
    ) -> GatewayResponse {
        self.handle_transact_response(req, &res)
    }
}

impl ConnectorIntegration<Capture, PaymentsCaptureData> for Nmi {
    fn get_headers(
        &self,
        _req: &RouterData<Capture, PaymentsCaptureData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(req.base_url.clone())
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
        let connector_req = NmiFollowUpRequest::try_from(NmiRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Capture, PaymentsCaptureData>,
        res: Response,
    ) -> GatewayResponse {
        self.handle_transact_response(req, &res)
    }
}

impl ConnectorIntegration<Refund, RefundsData> for Nmi {
    fn get_headers(
        &self,
        _req: &RouterData<Refund, RefundsData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterData<Refund, RefundsData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(req.base_url.clone())
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
        let connector_req = NmiFollowUpRequest::try_from(NmiRouterData::from((amount, req)))?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Refund, RefundsData>,
        res: Response,
    ) -> GatewayResponse {
        self.handle_transact_response(req, &res)
    }
}

impl ConnectorIntegration<Void, PaymentVoidData> for Nmi {
    fn get_headers(
        &self,
        _req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(req.base_url.clone())
    }

    fn get_request_body(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = NmiVoidRequest::try_from(req)?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<Void, PaymentVoidData>,
        res: Response,
    ) -> GatewayResponse {
        self.handle_transact_response(req, &res)
    }
}

impl ConnectorIntegration<PaymentMethodToken, PaymentMethodTokenizationData> for Nmi {
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

    fn get_headers(
        &self,
        _req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(req.base_url.clone())
    }

    fn get_request_body(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = NmiVaultRequest::try_from(req)?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        req: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        res: Response,
    ) -> GatewayResponse {
        utils::decode_form::<NmiVaultResponse, _, _>(
            self.display_name(),
            req,
            &res,
            "NmiVaultResponse",
        )
        .map_or_else(|invalid| invalid, GatewayResponse::from)
    }
}
