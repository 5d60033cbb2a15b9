use std::collections::BTreeMap;

use common_enums::{CaptureMethod, CountryAlpha2};
use common_utils::{pii::Email, types::MinorUnit};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        PaymentMethodTokenizationData, PaymentOptions, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
    errors,
    payment_method_data::{Card, PaymentSource},
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{
        AvsResult, CvvResult, ErrorCode, ErrorCodeMapping, ErrorKind, GatewayResponse,
    },
};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

pub mod auth_headers {
    pub const STRIPE_API_VERSION: &str = "stripe-version";
    pub const STRIPE_VERSION: &str = "2022-11-15";
}

static ERROR_CODES: ErrorCodeMapping = ErrorCodeMapping::new(&[
    ("incorrect_number", ErrorKind::IncorrectNumber),
    ("invalid_number", ErrorKind::InvalidNumber),
    ("invalid_expiry_month", ErrorKind::InvalidExpiryDate),
    ("invalid_expiry_year", ErrorKind::InvalidExpiryDate),
    ("invalid_cvc", ErrorKind::InvalidCvc),
    ("expired_card", ErrorKind::ExpiredCard),
    ("incorrect_cvc", ErrorKind::IncorrectCvc),
    ("incorrect_zip", ErrorKind::IncorrectZip),
    ("card_declined", ErrorKind::CardDeclined),
    ("call_issuer", ErrorKind::CallIssuer),
    ("processing_error", ErrorKind::ProcessingError),
    ("incorrect_pin", ErrorKind::IncorrectPin),
    ("test_mode_live_card", ErrorKind::TestModeLiveCard),
    ("pickup_card", ErrorKind::PickupCard),
    ("amount_too_small", ErrorKind::InvalidAmount),
    ("amount_too_large", ErrorKind::InvalidAmount),
]);

const CARD_DECLINED: &str = "card_declined";

pub struct StripeRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for StripeRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct StripeAuthType {
    pub(super) api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for StripeAuthType {
    type Error = errors::ConnectorError;
    fn try_from(item: &ConnectorAuthType) -> Result<Self, Self::Error> {
        if let ConnectorAuthType::HeaderKey { api_key } = item {
            Ok(Self {
                api_key: utils::non_blank_credential(api_key)?,
            })
        } else {
            Err(errors::ConnectorError::FailedToObtainAuthType)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeCaptureMethod {
    Manual,
    Automatic,
}

impl From<CaptureMethod> for StripeCaptureMethod {
    fn from(capture_method: CaptureMethod) -> Self {
        match capture_method {
            CaptureMethod::Automatic => Self::Automatic,
            CaptureMethod::Manual => Self::Manual,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StripePaymentMethodType {
    Card,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandableObjects {
    LatestCharge,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct StripeBillingAddress {
    #[serde(rename = "payment_method_data[billing_details][email]")]
    pub email: Option<Email>,
    #[serde(rename = "payment_method_data[billing_details][address][country]")]
    pub country: Option<CountryAlpha2>,
    #[serde(rename = "payment_method_data[billing_details][name]")]
    pub name: Option<Secret<String>>,
    #[serde(rename = "payment_method_data[billing_details][address][city]")]
    pub city: Option<String>,
    #[serde(rename = "payment_method_data[billing_details][address][line1]")]
    pub address_line1: Option<Secret<String>>,
    #[serde(rename = "payment_method_data[billing_details][address][line2]")]
    pub address_line2: Option<Secret<String>>,
    #[serde(rename = "payment_method_data[billing_details][address][postal_code]")]
    pub zip_code: Option<Secret<String>>,
    #[serde(rename = "payment_method_data[billing_details][address][state]")]
    pub state: Option<Secret<String>>,
    #[serde(rename = "payment_method_data[billing_details][phone]")]
    pub phone: Option<Secret<String>>,
}

impl StripeBillingAddress {
    fn new(card: &Card, options: &PaymentOptions) -> Self {
        let address = options.billing_address.clone().unwrap_or_default();
        Self {
            email: options.email.clone(),
            country: address.country,
            name: Some(address.name.unwrap_or_else(|| card.get_card_holder_name())),
            city: address.city,
            address_line1: address.line1,
            address_line2: address.line2,
            zip_code: address.zip,
            state: address.state,
            phone: address.phone,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct StripeCardData {
    #[serde(rename = "payment_method_data[type]")]
    pub payment_method_data_type: StripePaymentMethodType,
    #[serde(rename = "payment_method_data[card][number]")]
    pub payment_method_data_card_number: cards::CardNumber,
    #[serde(rename = "payment_method_data[card][exp_month]")]
    pub payment_method_data_card_exp_month: Secret<String>,
    #[serde(rename = "payment_method_data[card][exp_year]")]
    pub payment_method_data_card_exp_year: Secret<String>,
    #[serde(rename = "payment_method_data[card][cvc]")]
    pub payment_method_data_card_cvc: Option<Secret<String>>,
    #[serde(flatten)]
    pub billing: StripeBillingAddress,
}

/// A payment method Stripe already holds, optionally tied to a customer.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct StripeSavedPaymentMethod {
    pub payment_method: Secret<String>,
    pub customer: Option<String>,
}

#[derive(Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StripePaymentMethodData {
    Card(Box<StripeCardData>),
    Saved(StripeSavedPaymentMethod),
}

fn get_payment_method_data(
    payment_source: &PaymentSource,
    options: &PaymentOptions,
    flow: &str,
) -> Result<StripePaymentMethodData, Error> {
    match payment_source {
        PaymentSource::Card(card) => Ok(StripePaymentMethodData::Card(Box::new(StripeCardData {
            payment_method_data_type: StripePaymentMethodType::Card,
            payment_method_data_card_number: card.card_number.clone(),
            payment_method_data_card_exp_month: card.card_expiration.month.two_digits(),
            payment_method_data_card_exp_year: card.card_expiration.year.four_digits(),
            payment_method_data_card_cvc: card.card_cvc.clone(),
            billing: StripeBillingAddress::new(card, options),
        }))),
        PaymentSource::Token(token) => Ok(StripePaymentMethodData::Saved(
            StripeSavedPaymentMethod {
                payment_method: token.token.clone(),
                customer: options.customer_id.clone(),
            },
        )),
        PaymentSource::StoredCredential(stored) => Ok(StripePaymentMethodData::Saved(
            StripeSavedPaymentMethod {
                payment_method: stored.billing_id.clone(),
                customer: stored
                    .customer_reference
                    .clone()
                    .or_else(|| options.customer_id.clone()),
            },
        )),
        source @ PaymentSource::BankAccount(_) => Err(utils::payment_source_not_supported(
            source, flow, "Stripe",
        )),
    }
}

fn get_metadata(options: &PaymentOptions) -> BTreeMap<String, String> {
    options
        .order_id
        .iter()
        .map(|order_id| ("order_id", order_id))
        .chain(
            options
                .metadata
                .iter()
                .map(|(key, value)| (key.as_str(), value)),
        )
        .map(|(key, value)| (format!("metadata[{key}]"), value.clone()))
        .collect()
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct PaymentIntentRequest {
    pub amount: MinorUnit,
    pub currency: String,
    pub confirm: bool,
    pub capture_method: StripeCaptureMethod,
    pub description: Option<String>,
    pub receipt_email: Option<Email>,
    #[serde(flatten)]
    pub meta_data: BTreeMap<String, String>,
    #[serde(flatten)]
    pub payment_data: StripePaymentMethodData,
    #[serde(rename = "expand[0]")]
    pub expand: ExpandableObjects,
}

impl TryFrom<StripeRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>>
    for PaymentIntentRequest
{
    type Error = Error;
    fn try_from(
        item: StripeRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let payment_data =
            get_payment_method_data(&request.payment_source, &request.options, "authorize")?;

        Ok(Self {
            amount: item.amount,
            currency: request.currency.to_string().to_lowercase(),
            confirm: true,
            capture_method: StripeCaptureMethod::from(request.capture_method),
            description: request.options.description.clone(),
            receipt_email: request.options.email.clone(),
            meta_data: get_metadata(&request.options),
            payment_data,
            expand: ExpandableObjects::LatestCharge,
        })
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct CaptureRequest {
    /// Amount to capture, in minor units
    amount_to_capture: MinorUnit,
    #[serde(rename = "expand[0]")]
    expand: ExpandableObjects,
}

impl TryFrom<StripeRouterData<&RouterData<Capture, PaymentsCaptureData>>> for CaptureRequest {
    type Error = Error;
    fn try_from(
        item: StripeRouterData<&RouterData<Capture, PaymentsCaptureData>>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            amount_to_capture: item.amount,
            expand: ExpandableObjects::LatestCharge,
        })
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct CancelRequest {
    cancellation_reason: Option<String>,
}

impl TryFrom<&RouterData<Void, PaymentVoidData>> for CancelRequest {
    type Error = Error;
    fn try_from(item: &RouterData<Void, PaymentVoidData>) -> Result<Self, Self::Error> {
        Ok(Self {
            cancellation_reason: item.request.options.description.clone(),
        })
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct RefundRequest {
    pub amount: Option<MinorUnit>,
    pub payment_intent: String,
    #[serde(flatten)]
    pub meta_data: BTreeMap<String, String>,
}

impl TryFrom<StripeRouterData<&RouterData<Refund, RefundsData>>> for RefundRequest {
    type Error = Error;
    fn try_from(
        item: StripeRouterData<&RouterData<Refund, RefundsData>>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Some(item.amount),
            payment_intent: item.router_data.request.connector_transaction_id.clone(),
            meta_data: get_metadata(&item.router_data.request.options),
        })
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct StripeBillingAddressCardToken {
    #[serde(rename = "billing_details[name]")]
    pub name: Option<Secret<String>>,
    #[serde(rename = "billing_details[email]")]
    pub email: Option<Email>,
    #[serde(rename = "billing_details[phone]")]
    pub phone: Option<Secret<String>>,
    #[serde(rename = "billing_details[address][line1]")]
    pub address_line1: Option<Secret<String>>,
    #[serde(rename = "billing_details[address][line2]")]
    pub address_line2: Option<Secret<String>>,
    #[serde(rename = "billing_details[address][postal_code]")]
    pub zip_code: Option<Secret<String>>,
    #[serde(rename = "billing_details[address][country]")]
    pub country: Option<CountryAlpha2>,
}

/// Body of `/payment_methods`; Stripe keeps the card and returns a `pm_` id.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct StripePaymentMethodRequest {
    #[serde(rename = "type")]
    pub payment_method_type: StripePaymentMethodType,
    #[serde(rename = "card[number]")]
    pub token_card_number: cards::CardNumber,
    #[serde(rename = "card[exp_month]")]
    pub token_card_exp_month: Secret<String>,
    #[serde(rename = "card[exp_year]")]
    pub token_card_exp_year: Secret<String>,
    #[serde(rename = "card[cvc]")]
    pub token_card_cvc: Option<Secret<String>>,
    #[serde(flatten)]
    pub billing: StripeBillingAddressCardToken,
    #[serde(flatten)]
    pub meta_data: BTreeMap<String, String>,
}

impl TryFrom<&RouterData<PaymentMethodToken, PaymentMethodTokenizationData>>
    for StripePaymentMethodRequest
{
    type Error = Error;
    fn try_from(
        item: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> Result<Self, Self::Error> {
        let options = &item.request.options;
        let card = match &item.request.payment_source {
            PaymentSource::Card(card) => card,
            source => {
                return Err(utils::payment_source_not_supported(source, "store", "Stripe"))
            }
        };
        let address = options.billing_address.clone().unwrap_or_default();

        Ok(Self {
            payment_method_type: StripePaymentMethodType::Card,
            token_card_number: card.card_number.clone(),
            token_card_exp_month: card.card_expiration.month.two_digits(),
            token_card_exp_year: card.card_expiration.year.four_digits(),
            token_card_cvc: card.card_cvc.clone(),
            billing: StripeBillingAddressCardToken {
                name: Some(address.name.unwrap_or_else(|| card.get_card_holder_name())),
                email: options.email.clone(),
                phone: address.phone,
                address_line1: address.line1,
                address_line2: address.line2,
                zip_code: address.zip,
                country: address.country,
            },
            meta_data: get_metadata(options),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StripePaymentStatus {
    Succeeded,
    Failed,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    Canceled,
    RequiresCapture,
    Pending,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ErrorDetails {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub param: Option<String>,
    pub decline_code: Option<String>,
    pub payment_intent: Option<PaymentIntentErrorResponse>,
    pub charge: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PaymentIntentErrorResponse {
    pub id: String,
}

#[derive(Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

impl ErrorDetails {
    /// Issuer decline codes are more specific than `card_declined`, when known.
    pub fn error_code(&self) -> Option<ErrorCode> {
        let code = self.code.as_deref()?;
        let decline_code = (code == CARD_DECLINED)
            .then_some(self.decline_code.as_deref())
            .flatten()
            .and_then(|decline_code| ERROR_CODES.lookup(decline_code));
        Some(decline_code.map_or_else(|| ERROR_CODES.map(code), ErrorCode::Standard))
    }

    pub fn into_gateway_response(
        self,
        params: Map<String, Value>,
        test_mode: bool,
        http_code: u16,
    ) -> GatewayResponse {
        let error_code = self.error_code();
        GatewayResponse::new(
            false,
            self.message.unwrap_or_default(),
            params,
            test_mode,
        )
        .with_authorization(self.payment_intent.map(|payment_intent| payment_intent.id))
        .with_error_code(error_code)
        .with_status_code(http_code)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct StripeChecks {
    pub address_line1_check: Option<String>,
    pub address_postal_code_check: Option<String>,
    pub cvc_check: Option<String>,
}

impl StripeChecks {
    fn avs_result(&self) -> Option<AvsResult> {
        let code = match (
            self.address_line1_check.as_deref()?,
            self.address_postal_code_check.as_deref()?,
        ) {
            ("pass", "pass") => "Y",
            ("pass", "fail") => "A",
            ("pass", "unchecked") => "B",
            ("fail", "pass") => "Z",
            ("fail", "fail") => "N",
            ("unchecked", "pass") => "P",
            ("unchecked", "unchecked") => "I",
            _ => return None,
        };
        AvsResult::from_code(code)
    }

    fn cvv_result(&self) -> Option<CvvResult> {
        let code = match self.cvc_check.as_deref()? {
            "pass" => "M",
            "fail" => "N",
            "unchecked" => "P",
            _ => return None,
        };
        CvvResult::from_code(code)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct StripeAdditionalCardDetails {
    pub checks: Option<StripeChecks>,
    pub network_transaction_id: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct StripePaymentMethodDetailsResponse {
    pub card: Option<StripeAdditionalCardDetails>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct StripeOutcome {
    #[serde(rename = "type")]
    pub outcome_type: Option<String>,
    pub network_status: Option<String>,
    pub reason: Option<String>,
    pub seller_message: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StripeCharge {
    pub id: String,
    pub outcome: Option<StripeOutcome>,
    pub payment_method_details: Option<StripePaymentMethodDetailsResponse>,
}

/// `latest_charge` is an id unless it was expanded in the request.
#[derive(Debug, Eq, PartialEq, Deserialize, Clone, Serialize)]
#[serde(untagged)]
pub enum StripeChargeEnum {
    ChargeId(String),
    ChargeObject(Box<StripeCharge>),
}

impl StripeChargeEnum {
    fn charge(&self) -> Option<&StripeCharge> {
        match self {
            Self::ChargeId(_) => None,
            Self::ChargeObject(charge) => Some(charge),
        }
    }

    fn card_details(&self) -> Option<&StripeAdditionalCardDetails> {
        self.charge()?.payment_method_details.as_ref()?.card.as_ref()
    }
}

#[derive(Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PaymentIntentResponse {
    pub id: Option<String>,
    pub status: Option<StripePaymentStatus>,
    pub amount: Option<MinorUnit>,
    pub latest_charge: Option<StripeChargeEnum>,
    pub last_payment_error: Option<ErrorDetails>,
    pub error: Option<ErrorDetails>,
}

impl PaymentIntentResponse {
    fn into_gateway_response(
        self,
        accepted: &[StripePaymentStatus],
        params: Map<String, Value>,
        test_mode: bool,
        http_code: u16,
    ) -> GatewayResponse {
        if let Some(error) = self.error {
            return error.into_gateway_response(params, test_mode, http_code);
        }

        let success = self.status.is_some_and(|status| accepted.contains(&status));
        let message = match (&self.last_payment_error, self.status) {
            _ if success => "Transaction approved".to_string(),
            (Some(error), _) if error.message.is_some() => {
                error.message.clone().unwrap_or_default()
            }
            (_, Some(status)) => format!("Payment intent status is {status}"),
            (_, None) => String::new(),
        };
        let error_code = if success {
            None
        } else {
            self.last_payment_error
                .as_ref()
                .and_then(ErrorDetails::error_code)
        };
        let card_details = self
            .latest_charge
            .as_ref()
            .and_then(StripeChargeEnum::card_details);
        let checks = card_details.and_then(|details| details.checks.as_ref());
        let fraud_review = self
            .latest_charge
            .as_ref()
            .and_then(StripeChargeEnum::charge)
            .and_then(|charge| charge.outcome.as_ref())
            .and_then(|outcome| outcome.outcome_type.as_deref())
            .is_some_and(|outcome_type| outcome_type == "manual_review");

        GatewayResponse::new(success, message, params, test_mode)
            .with_authorization(self.id)
            .with_error_code(error_code)
            .with_avs_result(checks.and_then(StripeChecks::avs_result))
            .with_cvv_result(checks.and_then(StripeChecks::cvv_result))
            .with_fraud_review(fraud_review)
            .with_network_transaction_id(
                card_details.and_then(|details| details.network_transaction_id.clone()),
            )
            .with_status_code(http_code)
    }
}

impl From<ResponseRouterData<PaymentIntentResponse, &RouterData<Authorize, PaymentsAuthorizeData>>>
    for GatewayResponse
{
    fn from(
        item: ResponseRouterData<
            PaymentIntentResponse,
            &RouterData<Authorize, PaymentsAuthorizeData>,
        >,
    ) -> Self {
        item.response.into_gateway_response(
            &[
                StripePaymentStatus::Succeeded,
                StripePaymentStatus::RequiresCapture,
                StripePaymentStatus::Processing,
            ],
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

impl From<ResponseRouterData<PaymentIntentResponse, &RouterData<Capture, PaymentsCaptureData>>>
    for GatewayResponse
{
    fn from(
        item: ResponseRouterData<PaymentIntentResponse, &RouterData<Capture, PaymentsCaptureData>>,
    ) -> Self {
        item.response.into_gateway_response(
            &[
                StripePaymentStatus::Succeeded,
                StripePaymentStatus::Processing,
            ],
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

impl From<ResponseRouterData<PaymentIntentResponse, &RouterData<Void, PaymentVoidData>>>
    for GatewayResponse
{
    fn from(
        item: ResponseRouterData<PaymentIntentResponse, &RouterData<Void, PaymentVoidData>>,
    ) -> Self {
        item.response.into_gateway_response(
            &[StripePaymentStatus::Canceled],
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundStatus {
    Succeeded,
    Failed,
    Pending,
    RequiresAction,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct RefundResponse {
    pub id: Option<String>,
    pub status: Option<RefundStatus>,
    pub amount: Option<MinorUnit>,
    pub failure_reason: Option<String>,
    pub error: Option<ErrorDetails>,
}

impl From<ResponseRouterData<RefundResponse, &RouterData<Refund, RefundsData>>>
    for GatewayResponse
{
    fn from(item: ResponseRouterData<RefundResponse, &RouterData<Refund, RefundsData>>) -> Self {
        let test_mode = item.router_data.test_mode;
        let response = item.response;
        if let Some(error) = response.error {
            return error.into_gateway_response(item.params, test_mode, item.http_code);
        }

        let success = matches!(
            response.status,
            Some(RefundStatus::Succeeded | RefundStatus::Pending)
        );
        let message = if success {
            "Transaction approved".to_string()
        } else {
            response
                .failure_reason
                .or_else(|| response.status.map(|status| format!("Refund status is {status}")))
                .unwrap_or_default()
        };

        GatewayResponse::new(success, message, item.params, test_mode)
            .with_authorization(response.id)
            .with_status_code(item.http_code)
    }
}

#[derive(Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct StripePaymentMethodResponse {
    pub id: Option<String>,
    pub card: Option<StripeAdditionalCardDetails>,
    pub error: Option<ErrorDetails>,
}

impl
    From<
        ResponseRouterData<
            StripePaymentMethodResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    > for GatewayResponse
{
    fn from(
        item: ResponseRouterData<
            StripePaymentMethodResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    ) -> Self {
        let test_mode = item.router_data.test_mode;
        let response = item.response;
        if let Some(error) = response.error {
            return error.into_gateway_response(item.params, test_mode, item.http_code);
        }

        let success = response.id.as_deref().is_some_and(|id| !id.is_empty());
        let message = if success {
            "Transaction approved"
        } else {
            "Payment method id missing from response"
        };
        let checks = response.card.as_ref().and_then(|card| card.checks.as_ref());

        GatewayResponse::new(success, message, item.params, test_mode)
            .with_authorization(response.id.clone())
            .with_avs_result(checks.and_then(StripeChecks::avs_result))
            .with_cvv_result(checks.and_then(StripeChecks::cvv_result))
            .with_status_code(item.http_code)
    }
}
