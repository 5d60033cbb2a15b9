use domain_types::{
    connector_flow,
    connector_types::{
        PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, RefundsData,
    },
};

use crate::{
    api::{ConnectorCommon, ConnectorScrubbing},
    connector_integration::ConnectorIntegration,
};

pub trait ConnectorServiceTrait:
    ConnectorCommon
    + ConnectorScrubbing
    + PaymentAuthorize
    + PaymentCapture
    + RefundExecute
    + PaymentVoid
    + PaymentToken
    + Send
    + Sync
{
}

pub type BoxedConnector = Box<&'static (dyn ConnectorServiceTrait + Sync)>;

pub trait PaymentAuthorize:
    ConnectorIntegration<connector_flow::Authorize, PaymentsAuthorizeData>
{
}

pub trait PaymentCapture: ConnectorIntegration<connector_flow::Capture, PaymentsCaptureData> {}

pub trait RefundExecute: ConnectorIntegration<connector_flow::Refund, RefundsData> {}

pub trait PaymentVoid: ConnectorIntegration<connector_flow::Void, PaymentVoidData> {}

pub trait PaymentToken:
    ConnectorIntegration<connector_flow::PaymentMethodToken, PaymentMethodTokenizationData>
{
}
