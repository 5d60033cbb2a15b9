use std::collections::BTreeMap;

use common_enums::{BankAccountType, BankHolderType, CaptureMethod, CountryAlpha2, Currency};
use common_utils::{pii, types::StringMajorUnit};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        PaymentMethodTokenizationData, PaymentOptions, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
    errors,
    payment_method_data::{BankAccount, Card, PaymentSource},
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::{
        AvsResult, CvvResult, ErrorCodeMapping, ErrorKind, GatewayResponse,
    },
};
use error_stack::report;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

const APPROVED: &str = "1";

static ERROR_CODES: ErrorCodeMapping = ErrorCodeMapping::new(&[
    ("200", ErrorKind::CardDeclined),
    ("201", ErrorKind::CardDeclined),
    ("202", ErrorKind::CardDeclined),
    ("203", ErrorKind::CardDeclined),
    ("204", ErrorKind::CardDeclined),
    ("220", ErrorKind::InvalidNumber),
    ("221", ErrorKind::InvalidNumber),
    ("222", ErrorKind::InvalidNumber),
    ("223", ErrorKind::ExpiredCard),
    ("224", ErrorKind::InvalidExpiryDate),
    ("225", ErrorKind::IncorrectCvc),
    ("250", ErrorKind::PickupCard),
    ("251", ErrorKind::PickupCard),
    ("252", ErrorKind::PickupCard),
    ("253", ErrorKind::PickupCard),
    ("260", ErrorKind::CallIssuer),
    ("300", ErrorKind::ProcessingError),
    ("400", ErrorKind::ProcessingError),
    ("410", ErrorKind::ConfigError),
    ("411", ErrorKind::ConfigError),
    ("420", ErrorKind::ProcessingError),
    ("430", ErrorKind::ProcessingError),
    ("440", ErrorKind::ProcessingError),
    ("441", ErrorKind::ProcessingError),
    ("460", ErrorKind::UnsupportedFeature),
    ("461", ErrorKind::InvalidNumber),
]);

pub struct NmiRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> From<(StringMajorUnit, T)> for NmiRouterData<T> {
    fn from((amount, router_data): (StringMajorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

/// NMI takes its key in the body, so any key-only credential will do.
#[derive(Debug, Clone)]
pub struct NmiAuthType {
    pub api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for NmiAuthType {
    type Error = Error;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key }
            | ConnectorAuthType::BodyKey { api_key, .. } => Ok(Self {
                api_key: utils::non_blank_credential(api_key)?,
            }),
            _ => Err(report!(errors::ConnectorError::FailedToObtainAuthType)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Auth,
    Sale,
    Capture,
    Refund,
    Void,
}

impl From<CaptureMethod> for TransactionType {
    fn from(capture_method: CaptureMethod) -> Self {
        match capture_method {
            CaptureMethod::Automatic => Self::Sale,
            CaptureMethod::Manual => Self::Auth,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Check,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerVaultAction {
    AddCustomer,
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct CardData {
    ccnumber: cards::CardNumber,
    /// MMYY
    ccexp: Secret<String>,
    cvv: Option<Secret<String>>,
    first_name: Option<Secret<String>>,
    last_name: Option<Secret<String>>,
}

impl From<&Card> for CardData {
    fn from(card: &Card) -> Self {
        Self {
            ccnumber: card.card_number.clone(),
            ccexp: Secret::new(format!(
                "{}{}",
                card.card_expiration.month.two_digits().peek(),
                card.card_expiration.year.two_digits().peek()
            )),
            cvv: card.card_cvc.clone(),
            first_name: card.card_holder_first_name.clone(),
            last_name: card.card_holder_last_name.clone(),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct CheckData {
    payment: PaymentType,
    checkname: Secret<String>,
    checkaba: Secret<String>,
    checkaccount: Secret<String>,
    account_holder_type: BankHolderType,
    account_type: BankAccountType,
}

impl From<&BankAccount> for CheckData {
    fn from(account: &BankAccount) -> Self {
        Self {
            payment: PaymentType::Check,
            checkname: account.holder_name.clone(),
            checkaba: account.routing_number.clone(),
            checkaccount: account.account_number.clone(),
            account_holder_type: account.holder_type,
            account_type: account.account_type,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct VaultData {
    customer_vault_id: Secret<String>,
}

#[derive(Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NmiPaymentMethod {
    Card(Box<CardData>),
    Check(Box<CheckData>),
    Vault(VaultData),
}

impl From<&PaymentSource> for NmiPaymentMethod {
    fn from(payment_source: &PaymentSource) -> Self {
        match payment_source {
            PaymentSource::Card(card) => Self::Card(Box::new(CardData::from(card))),
            PaymentSource::BankAccount(account) => Self::Check(Box::new(CheckData::from(account))),
            PaymentSource::Token(token) => Self::Vault(VaultData {
                customer_vault_id: token.token.clone(),
            }),
            PaymentSource::StoredCredential(stored) => Self::Vault(VaultData {
                customer_vault_id: stored.billing_id.clone(),
            }),
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize)]
pub struct NmiBillingAddress {
    address1: Option<Secret<String>>,
    address2: Option<Secret<String>>,
    city: Option<String>,
    state: Option<Secret<String>>,
    zip: Option<Secret<String>>,
    country: Option<CountryAlpha2>,
    phone: Option<Secret<String>>,
    email: Option<pii::Email>,
}

impl From<&PaymentOptions> for NmiBillingAddress {
    fn from(options: &PaymentOptions) -> Self {
        let address = options.billing_address.clone().unwrap_or_default();
        Self {
            address1: address.line1,
            address2: address.line2,
            city: address.city,
            state: address.state,
            zip: address.zip,
            country: address.country,
            phone: address.phone,
            email: options.email.clone(),
        }
    }
}

/// `merchant_defined_field_N=key=value`, numbered from 1 in key order.
fn merchant_defined_fields(options: &PaymentOptions) -> BTreeMap<String, String> {
    options
        .metadata
        .iter()
        .enumerate()
        .map(|(index, (key, value))| {
            (
                format!("merchant_defined_field_{}", index + 1),
                format!("{key}={value}"),
            )
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct NmiPaymentsRequest {
    security_key: Secret<String>,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: StringMajorUnit,
    currency: Currency,
    orderid: Option<String>,
    order_description: Option<String>,
    ipaddress: Option<Secret<String, pii::IpAddress>>,
    #[serde(flatten)]
    payment_method: NmiPaymentMethod,
    #[serde(flatten)]
    billing: NmiBillingAddress,
    #[serde(flatten)]
    merchant_defined_field: BTreeMap<String, String>,
}

impl TryFrom<NmiRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>> for NmiPaymentsRequest {
    type Error = Error;

    fn try_from(
        item: NmiRouterData<&RouterData<Authorize, PaymentsAuthorizeData>>,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let auth = NmiAuthType::try_from(&router_data.connector_auth_type)?;
        let request = &router_data.request;

        Ok(Self {
            security_key: auth.api_key,
            transaction_type: TransactionType::from(request.capture_method),
            amount: item.amount,
            currency: request.currency,
            orderid: request.options.order_id.clone(),
            order_description: request.options.description.clone(),
            ipaddress: request.options.ip.clone(),
            payment_method: NmiPaymentMethod::from(&request.payment_source),
            billing: NmiBillingAddress::from(&request.options),
            merchant_defined_field: merchant_defined_fields(&request.options),
        })
    }
}

/// Body shared by capture and refund: both reference the original transaction.
#[derive(Debug, Serialize)]
pub struct NmiFollowUpRequest {
    security_key: Secret<String>,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    transactionid: String,
    amount: StringMajorUnit,
    orderid: Option<String>,
}

impl TryFrom<NmiRouterData<&RouterData<Capture, PaymentsCaptureData>>> for NmiFollowUpRequest {
    type Error = Error;

    fn try_from(
        item: NmiRouterData<&RouterData<Capture, PaymentsCaptureData>>,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let auth = NmiAuthType::try_from(&router_data.connector_auth_type)?;

        Ok(Self {
            security_key: auth.api_key,
            transaction_type: TransactionType::Capture,
            transactionid: router_data.request.connector_transaction_id.clone(),
            amount: item.amount,
            orderid: router_data.request.options.order_id.clone(),
        })
    }
}

impl TryFrom<NmiRouterData<&RouterData<Refund, RefundsData>>> for NmiFollowUpRequest {
    type Error = Error;

    fn try_from(
        item: NmiRouterData<&RouterData<Refund, RefundsData>>,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let auth = NmiAuthType::try_from(&router_data.connector_auth_type)?;

        Ok(Self {
            security_key: auth.api_key,
            transaction_type: TransactionType::Refund,
            transactionid: router_data.request.connector_transaction_id.clone(),
            amount: item.amount,
            orderid: router_data.request.options.order_id.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NmiVoidRequest {
    security_key: Secret<String>,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    transactionid: String,
}

impl TryFrom<&RouterData<Void, PaymentVoidData>> for NmiVoidRequest {
    type Error = Error;

    fn try_from(item: &RouterData<Void, PaymentVoidData>) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            security_key: auth.api_key,
            transaction_type: TransactionType::Void,
            transactionid: item.request.connector_transaction_id.clone(),
        })
    }
}

/// Adds the payment source to the customer vault without charging it.
#[derive(Debug, Serialize)]
pub struct NmiVaultRequest {
    security_key: Secret<String>,
    customer_vault: CustomerVaultAction,
    currency: Currency,
    #[serde(flatten)]
    payment_method: NmiPaymentMethod,
    #[serde(flatten)]
    billing: NmiBillingAddress,
}

impl TryFrom<&RouterData<PaymentMethodToken, PaymentMethodTokenizationData>> for NmiVaultRequest {
    type Error = Error;

    fn try_from(
        item: &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
    ) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.connector_auth_type)?;
        let payment_method = match &item.request.payment_source {
            source @ (PaymentSource::Card(_) | PaymentSource::BankAccount(_)) => {
                NmiPaymentMethod::from(source)
            }
            source => return Err(utils::payment_source_not_supported(source, "store", "NMI")),
        };

        Ok(Self {
            security_key: auth.api_key,
            customer_vault: CustomerVaultAction::AddCustomer,
            currency: item.request.currency,
            payment_method,
            billing: NmiBillingAddress::from(&item.request.options),
        })
    }
}

/// Reply of `transact.php`. `response` is 1 (approved), 2 (declined) or 3 (error).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NmiPaymentsResponse {
    pub response: String,
    pub responsetext: Option<String>,
    pub authcode: Option<String>,
    pub transactionid: Option<String>,
    pub avsresponse: Option<String>,
    pub cvvresponse: Option<String>,
    pub orderid: Option<String>,
    pub response_code: Option<String>,
    pub customer_vault_id: Option<String>,
}

impl NmiPaymentsResponse {
    pub(super) fn is_approved(&self) -> bool {
        self.response == APPROVED
    }

    pub(super) fn into_gateway_response(
        self,
        authorization: Option<String>,
        params: serde_json::Map<String, serde_json::Value>,
        test_mode: bool,
        http_code: u16,
    ) -> GatewayResponse {
        let success = self.is_approved();
        let message = self.responsetext.unwrap_or_default();
        let error_code = (!success)
            .then_some(self.response_code.as_deref())
            .flatten()
            .filter(|code| !code.is_empty())
            .map(|code| ERROR_CODES.map(code));

        GatewayResponse::new(success, message, params, test_mode)
            .with_authorization(authorization.filter(|id| !id.is_empty()))
            .with_error_code(error_code)
            .with_avs_result(self.avsresponse.as_deref().and_then(AvsResult::from_code))
            .with_cvv_result(self.cvvresponse.as_deref().and_then(CvvResult::from_code))
            .with_status_code(http_code)
    }
}

impl<F, Req> From<ResponseRouterData<NmiPaymentsResponse, &RouterData<F, Req>>>
    for GatewayResponse
{
    fn from(item: ResponseRouterData<NmiPaymentsResponse, &RouterData<F, Req>>) -> Self {
        let authorization = item.response.transactionid.clone();
        item.response.into_gateway_response(
            authorization,
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}

/// Vault replies carry the same fields; the billing id is the vault id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NmiVaultResponse(pub NmiPaymentsResponse);

impl
    From<
        ResponseRouterData<
            NmiVaultResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    > for GatewayResponse
{
    fn from(
        item: ResponseRouterData<
            NmiVaultResponse,
            &RouterData<PaymentMethodToken, PaymentMethodTokenizationData>,
        >,
    ) -> Self {
        let NmiVaultResponse(response) = item.response;
        let authorization = response.customer_vault_id.clone();
        response.into_gateway_response(
            authorization,
            item.params,
            item.router_data.test_mode,
            item.http_code,
        )
    }
}
