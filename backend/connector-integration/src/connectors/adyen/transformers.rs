use base64::Engine;
use common_enums::{BankAccountType, CardNetwork, CountryAlpha2, Currency};
use common_utils::{consts::BASE64_ENGINE, generate_time_ordered_id, pii, types::MinorUnit};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        PaymentMethodTokenizationData, PaymentOptions, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
    errors,
    payment_method_data::{BankAccount, Card, PaymentSource},
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{AvsResult, CvvResult, ErrorCode, GatewayResponse},
};
use hyperswitch_masking::{Mask, Maskable, PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use super::{constants, headers};
use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

pub struct AdyenRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for AdyenRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct AdyenAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) merchant_account: Secret<String>,
    /// Password of a web service user; switches the connector to basic auth
    pub(super) api_secret: Option<Secret<String>>,
}

impl TryFrom<&ConnectorAuthType> for AdyenAuthType {
    type Error = errors::ConnectorError;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                api_key: utils::non_blank_credential(api_key)?,
                merchant_account: utils::non_blank_credential(key1)?,
                api_secret: None,
            }),
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                api_key: utils::non_blank_credential(api_key)?,
                merchant_account: utils::non_blank_credential(key1)?,
                api_secret: Some(utils::non_blank_credential(api_secret)?),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType),
        }
    }
}

impl AdyenAuthType {
    pub(super) fn auth_header(&self) -> (String, Maskable<String>) {
        match &self.api_secret {
            Some(api_secret) => {
                let credentials = format!("{}:{}", self.api_key.peek(), api_secret.peek());
                (
                    headers::AUTHORIZATION.to_string(),
                    format!("Basic {}", BASE64_ENGINE.encode(credentials)).into_masked(),
                )
            }
            None => (
                headers::X_API_KEY.to_string(),
                self.api_key.clone().into_masked(),
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Amount {
    pub currency: Currency,
    pub value: MinorUnit,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    MC,
    Amex,
    Jcb,
    Diners,
    Discover,
    Maestro,
}

impl From<CardNetwork> for CardBrand {
    fn from(network: CardNetwork) -> Self {
        match network {
            CardNetwork::Visa => Self::Visa,
            CardNetwork::Mastercard => Self::MC,
            CardNetwork::AmericanExpress => Self::Amex,
            CardNetwork::JCB => Self::Jcb,
            CardNetwork::DinersClub => Self::Diners,
            CardNetwork::Discover => Self::Discover,
            CardNetwork::Maestro => Self::Maestro,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodType {
    Scheme,
    Ach,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCard {
    #[serde(rename = "type")]
    payment_method_type: PaymentMethodType,
    number: cards::CardNumber,
    expiry_month: Secret<String>,
    expiry_year: Secret<String>,
    cvc: Option<Secret<String>>,
    holder_name: Secret<String>,
    brand: Option<CardBrand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchDirectDebitData {
    #[serde(rename = "type")]
    payment_method_type: PaymentMethodType,
    bank_account_number: Secret<String>,
    bank_location_id: Secret<String>,
    owner_name: Secret<String>,
    bank_account_type: BankAccountType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenStoredPaymentMethod {
    #[serde(rename = "type")]
    payment_method_type: PaymentMethodType,
    stored_payment_method_id: Secret<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AdyenPaymentMethod {
    AdyenCard(Box<AdyenCard>),
    AchDirectDebit(Box<AchDirectDebitData>),
    StoredPaymentMethod(Box<AdyenStoredPaymentMethod>),
}

impl From<&Card> for AdyenCard {
    fn from(card: &Card) -> Self {
        Self {
            payment_method_type: PaymentMethodType::Scheme,
            number: card.card_number.clone(),
            expiry_month: card.card_expiration.month.two_digits(),
            expiry_year: card.card_expiration.year.four_digits(),
            cvc: card.card_cvc.clone(),
            holder_name: card.get_card_holder_name(),
            brand: card.get_card_network().map(CardBrand::from),
        }
    }
}

impl From<&BankAccount> for AchDirectDebitData {
    fn from(bank_account: &BankAccount) -> Self {
        Self {
            payment_method_type: PaymentMethodType::Ach,
            bank_account_number: bank_account.account_number.clone(),
            bank_location_id: bank_account.routing_number.clone(),
            owner_name: bank_account.holder_name.clone(),
            bank_account_type: bank_account.account_type,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum AdyenShopperInteraction {
    Ecommerce,
    ContAuth,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum AdyenRecurringModel {
    CardOnFile,
    UnscheduledCardOnFile,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    city: Option<String>,
    country: CountryAlpha2,
    house_number_or_name: Secret<String>,
    postal_code: Option<Secret<String>>,
    state_or_province: Option<Secret<String>>,
    street: Option<Secret<String>>,
}

/// Adyen rejects an address without a country, so none is sent then.
fn get_address_info(options: &PaymentOptions) -> Option<Address> {
    let address = options.billing_address.as_ref()?;
    Some(Address {
        city: address.city.clone(),
        country: address.country?,
        house_number_or_name: address
            .line2
            .clone()
            .unwrap_or_else(|| Secret::new("N/A".to_string())),
        postal_code: address.zip.clone(),
        state_or_province: address.state.clone(),
        street: address.line1.clone(),
    })
}

#[derive(Default, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    manual_capture: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentRequest {
    amount: Amount,
    merchant_account: Secret<String>,
    payment_method: AdyenPaymentMethod,
    reference: String,
    shopper_interaction: AdyenShopperInteraction,
    recurring_processing_model: Option<AdyenRecurringModel>,
    additional_data: Option<AdditionalData>,
    shopper_reference: Option<String>,
    store_payment_method: Option<bool>,
    #[serde(rename = "shopperIP")]
    shopper_ip: Option<Secret<String, pii::IpAddress>>,
    shopper_email: Option<pii::Email>,
    shopper_statement: Option<String>,
    billing_address: Option<Address>,
}

fn get_reference(options: &PaymentOptions) -> String {
    options
        .order_id
        .clone()
        .filter(|order_id| !order_id.trim().is_empty())
        .unwrap_or_else(|| generate_time_ordered_id("ref"))
}

struct PaymentMethodDetails {
    payment_method: AdyenPaymentMethod,
    shopper_interaction: AdyenShopperInteraction,
    recurring_processing_model: Option<AdyenRecurringModel>,
    shopper_reference: Option<String>,
}

fn get_payment_method_details(
    payment_source: &PaymentSource,
    options: &PaymentOptions,
) -> Result<PaymentMethodDetails, Error> {
    match payment_source {
        PaymentSource::Card(card) => Ok(PaymentMethodDetails {
            payment_method: AdyenPaymentMethod::AdyenCard(Box::new(AdyenCard::from(card))),
            shopper_interaction: AdyenShopperInteraction::Ecommerce,
            recurring_processing_model: None,
            shopper_reference: options.customer_id.clone(),
        }),
        PaymentSource::BankAccount(bank_account) => Ok(PaymentMethodDetails {
            payment_method: AdyenPaymentMethod::AchDirectDebit(Box::new(
                AchDirectDebitData::from(bank_account),
            )),
            shopper_interaction: AdyenShopperInteraction::Ecommerce,
            recurring_processing_model: None,
            shopper_reference: options.customer_id.clone(),
        }),
        PaymentSource::Token(token) => {
            stored_payment_method(token.token.clone(), options.customer_id.clone())
        }
        PaymentSource::StoredCredential(stored) => stored_payment_method(
            stored.billing_id.clone(),
            stored
                .customer_reference
                .clone()
                .or_else(|| options.customer_id.clone()),
        ),
    }
}

// Stored details are only usable together with the shopper they were stored for.
fn stored_payment_method(
    stored_payment_method_id: Secret<String>,
    shopper_reference: Option<String>,
) -> Result<PaymentMethodDetails, Error> {
    let shopper_reference = shopper_reference
        .filter(|reference| !reference.trim().is_empty())
        .ok_or_else(|| utils::missing_field_err("customer_id"))?;
    Ok(PaymentMethodDetails {
        payment_method: AdyenPaymentMethod::StoredPaymentMethod(Box::new(
            AdyenStoredPaymentMethod {
                payment_method_type: PaymentMethodType::Scheme,
                stored_payment_method_id,
            },
        )),
        shopper_interaction: AdyenShopperInteraction::ContAuth,
        recurring_processing_model: Some(AdyenRecurringModel::UnscheduledCardOnFile),
        shopper_reference: Some(shopper_reference),
    })
}

impl TryFrom<AdyenRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>>
    for AdyenPaymentRequest
{
    type Error = Error;
    fn try_from(
        item: AdyenRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let details = get_payment_method_details(&request.payment_source, &request.options)?;
        let additional_data = (!request.is_auto_capture()).then(|| AdditionalData {
            manual_capture: Some("true".to_string()),
        });

        Ok(Self {
            amount: Amount {
                currency: request.currency,
                value: item.amount,
            },
            merchant_account: auth_type.merchant_account,
            payment_method: details.payment_method,
            reference: get_reference(&request.options),
            shopper_interaction: details.shopper_interaction,
            recurring_processing_model: details.recurring_processing_model,
            additional_data,
            shopper_reference: details.shopper_reference,
            store_payment_method: None,
            shopper_ip: request.options.ip.clone(),
            shopper_email: request.options.email.clone(),
            shopper_statement: request.options.description.clone(),
            billing_address: get_address_info(&request.options),
        })
    }
}

/// Storing is a zero value authorisation that asks Adyen to keep the details.
impl TryFrom<&RouterData<PaymentMethodToken, PaymentMethodTokenizationData>>
    for AdyenPaymentRequest
{
    type Error = Error;
    fn try_from(
        item: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.connector_auth_type)?;
        let request = &item.request;
        let payment_method = match &request.payment_source {
            PaymentSource::Card(card) => {
                AdyenPaymentMethod::AdyenCard(Box::new(AdyenCard::from(card)))
            }
            PaymentSource::BankAccount(bank_account) => AdyenPaymentMethod::AchDirectDebit(
                Box::new(AchDirectDebitData::from(bank_account)),
            ),
            source @ (PaymentSource::Token(_) | PaymentSource::StoredCredential(_)) => {
                return Err(utils::payment_source_not_supported(source, "store", "Adyen"))
            }
        };
        let shopper_reference = request
            .options
            .customer_id
            .clone()
            .ok_or_else(|| utils::missing_field_err("customer_id"))?;

        Ok(Self {
            amount: Amount {
                currency: request.currency,
                value: MinorUnit::zero(),
            },
            merchant_account: auth_type.merchant_account,
            payment_method,
            reference: get_reference(&request.options),
            shopper_interaction: AdyenShopperInteraction::Ecommerce,
            recurring_processing_model: Some(AdyenRecurringModel::CardOnFile),
            additional_data: None,
            shopper_reference: Some(shopper_reference),
            store_payment_method: Some(true),
            shopper_ip: request.options.ip.clone(),
            shopper_email: request.options.email.clone(),
            shopper_statement: None,
            billing_address: get_address_info(&request.options),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCaptureRequest {
    merchant_account: Secret<String>,
    amount: Amount,
    reference: String,
}

impl TryFrom<AdyenRouterData<&RouterData<Capture, PaymentsCaptureData>>> for AdyenCaptureRequest {
    type Error = Error;
    fn try_from(
        item: AdyenRouterData<&RouterData<Capture, PaymentsCaptureData>>,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth_type.merchant_account,
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            reference: get_reference(&item.router_data.request.options),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenRefundRequest {
    merchant_account: Secret<String>,
    amount: Amount,
    reference: String,
}

impl TryFrom<AdyenRouterData<&RouterData<Refund, RefundsData>>> for AdyenRefundRequest {
    type Error = Error;
    fn try_from(
        item: AdyenRouterData<&RouterData<Refund, RefundsData>>,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth_type.merchant_account,
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            reference: get_reference(&item.router_data.request.options),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCancelRequest {
    merchant_account: Secret<String>,
    reference: String,
}

impl TryFrom<&RouterData<Void, PaymentVoidData>> for AdyenCancelRequest {
    type Error = Error;
    fn try_from(item: &RouterData<Void, PaymentVoidData>) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth_type.merchant_account,
            reference: get_reference(&item.request.options),
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, strum::Display)]
pub enum AdyenStatus {
    AuthenticationFinished,
    AuthenticationNotRequired,
    Authorised,
    Cancelled,
    ChallengeShopper,
    Error,
    IdentifyShopper,
    Pending,
    PresentToShopper,
    Received,
    RedirectShopper,
    Refused,
    #[serde(other)]
    Unknown,
}

impl AdyenStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Authorised | Self::Received | Self::Pending)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdyenAdditionalDataResponse {
    #[serde(rename = "avsResult")]
    avs_result: Option<String>,
    #[serde(rename = "cvcResult")]
    cvc_result: Option<String>,
    #[serde(rename = "fraudManualReview")]
    fraud_manual_review: Option<String>,
    #[serde(rename = "networkTxReference")]
    network_tx_reference: Option<String>,
    #[serde(rename = "tokenization.storedPaymentMethodId")]
    stored_payment_method_id: Option<String>,
    #[serde(rename = "recurring.recurringDetailReference")]
    recurring_detail_reference: Option<String>,
}

/// Reply of `/payments`. Declines arrive as 200 with `resultCode: Refused`;
/// rejected calls carry a top level `errorCode` instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentResponse {
    psp_reference: Option<String>,
    result_code: Option<AdyenStatus>,
    refusal_reason: Option<String>,
    refusal_reason_code: Option<String>,
    additional_data: Option<AdyenAdditionalDataResponse>,
    error_code: Option<String>,
    message: Option<String>,
}

impl AdyenPaymentResponse {
    fn is_success(&self) -> bool {
        self.error_code.is_none() && self.result_code.is_some_and(AdyenStatus::is_success)
    }

    fn message(&self) -> String {
        self.refusal_reason
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.result_code.map(|status| status.to_string()))
            .unwrap_or_default()
    }

    fn error_code(&self) -> Option<ErrorCode> {
        if self.is_success() {
            return None;
        }
        match (&self.error_code, &self.refusal_reason_code) {
            (Some(code), _) => Some(constants::ERROR_CODES.map(code)),
            (None, Some(code)) => Some(constants::REFUSAL_REASON_CODES.map(code)),
            (None, None) => None,
        }
    }

    fn into_gateway_response(
        self,
        authorization: Option<String>,
        params: serde_json::Map<String, serde_json::Value>,
        test_mode: bool,
        http_code: u16,
    ) -> GatewayResponse {
        let additional_data = self.additional_data.as_ref();
        let avs_result = additional_data
            .and_then(|data| data.avs_result.as_deref())
            .and_then(constants::avs_letter)
            .and_then(AvsResult::from_code);
        let cvv_result = additional_data
            .and_then(|data| data.cvc_result.as_deref())
            .and_then(constants::cvc_letter)
            .and_then(CvvResult::from_code);
        let fraud_review = additional_data
            .and_then(|data| data.fraud_manual_review.as_deref())
            .is_some_and(|review| review.eq_ignore_ascii_case("true"));
        let network_transaction_id =
            additional_data.and_then(|data| data.network_tx_reference.clone());

        GatewayResponse::new(self.is_success(), self.message(), params, test_mode)
            .with_authorization(authorization)
            .with_error_code(self.error_code())
            .with_avs_result(avs_result)
            .with_cvv_result(cvv_result)
            .with_fraud_review(fraud_review)
            .with_network_transaction_id(network_transaction_id)
            .with_status_code(http_code)
    }
}

impl From<ResponseRouterData<AdyenPaymentResponse, &RouterData<Authorize, PaymentsAuthorizeData>>>
    for GatewayResponse
{
    fn from(
        item: ResponseRouterData<
            AdyenPaymentResponse,
            &RouterData<Authorize, PaymentsAuthorizeData>,
        >,
    ) -> Self {
        let authorization = item.response.psp_reference.clone();
        item.response.into_gateway_response(
            authorization,
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

impl
    From<
        ResponseRouterData<
            AdyenPaymentResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    > for GatewayResponse
{
    fn from(
        item: ResponseRouterData<
            AdyenPaymentResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    ) -> Self {
        let authorization = item.response.additional_data.as_ref().and_then(|data| {
            data.stored_payment_method_id
                .clone()
                .or_else(|| data.recurring_detail_reference.clone())
        });
        if authorization.is_none() && item.response.is_success() {
            return GatewayResponse::new(
                false,
                "Adyen did not return a stored payment method reference",
                item.params,
                item.router_data.test_mode,
            )
            .with_status_code(item.http_code);
        }
        item.response.into_gateway_response(
            authorization,
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

/// Reply of the capture, refund and cancel endpoints. Adyen only acknowledges
/// the modification here; the outcome arrives later by notification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenModificationResponse {
    psp_reference: Option<String>,
    payment_psp_reference: Option<String>,
    status: Option<String>,
    error_code: Option<String>,
    message: Option<String>,
}

impl<F, Req> From<ResponseRouterData<AdyenModificationResponse, &RouterData<F, Req>>>
    for GatewayResponse
{
    fn from(item: ResponseRouterData<AdyenModificationResponse, &RouterData<F, Req>>) -> Self {
        let response = item.response;
        let success = response.error_code.is_none()
            && response
                .status
                .as_deref()
                .is_some_and(|status| status.eq_ignore_ascii_case("received"));
        let message = response
            .message
            .clone()
            .or_else(|| response.status.clone())
            .unwrap_or_default();
        let error_code = response
            .error_code
            .as_deref()
            .map(|code| constants::ERROR_CODES.map(code));

        GatewayResponse::new(success, message, item.params, item.router_data.test_mode)
            .with_authorization(response.psp_reference.or(response.payment_psp_reference))
            .with_error_code(error_code)
            .with_status_code(item.http_code)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenErrorResponse {
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub message: Option<String>,
    pub error_type: Option<String>,
    pub psp_reference: Option<String>,
}
