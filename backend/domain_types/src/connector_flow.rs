//! Marker types naming each single-call operation a connector implements.

/// Reserve funds; also used for purchases with automatic capture
#[derive(Debug, Clone)]
pub struct Authorize;

#[derive(Debug, Clone)]
pub struct Capture;

#[derive(Debug, Clone)]
pub struct Refund;

#[derive(Debug, Clone)]
pub struct Void;

/// Tokenize a payment source for later use
#[derive(Debug, Clone)]
pub struct PaymentMethodToken;

#[derive(strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FlowName {
    Authorize,
    Capture,
    Refund,
    Void,
    PaymentMethodToken,
}

/// Ties a flow marker to its name for logging.
pub trait FlowIdentifier {
    const NAME: FlowName;
}

impl FlowIdentifier for Authorize {
    const NAME: FlowName = FlowName::Authorize;
}

impl FlowIdentifier for Capture {
    const NAME: FlowName = FlowName::Capture;
}

impl FlowIdentifier for Refund {
    const NAME: FlowName = FlowName::Refund;
}

impl FlowIdentifier for Void {
    const NAME: FlowName = FlowName::Void;
}

impl FlowIdentifier for PaymentMethodToken {
    const NAME: FlowName = FlowName::PaymentMethodToken;
}
