/// Broad class of a raised [`ConnectorError`], used by callers to decide how to react.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// Credentials or endpoint settings are unusable; fix the setup, not the call
    Configuration,
    /// The call arguments were rejected before anything was sent
    Validation,
    /// The request could not be delivered or no reply came back
    Transport,
    Internal,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Invalid connector configuration: {config}")]
    InvalidConnectorConfig { config: &'static str },
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Missing required fields: {field_names:?}")]
    MissingRequiredFields { field_names: Vec<&'static str> },
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("Failed to convert amount to the connector's format")]
    AmountConversionFailed,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to reach the connector")]
    TransportFailure,
}

impl ConnectorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FailedToObtainAuthType | Self::InvalidConnectorConfig { .. } => {
                ErrorCategory::Configuration
            }
            Self::MissingRequiredField { .. }
            | Self::MissingRequiredFields { .. }
            | Self::InvalidDataFormat { .. }
            | Self::NotSupported { .. }
            | Self::AmountConversionFailed => ErrorCategory::Validation,
            Self::TransportFailure => ErrorCategory::Transport,
            Self::RequestEncodingFailed => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL parsing failed")]
    UrlParsingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Unexpected state reached/Invariants conflicted")]
    UnexpectedState,
    #[error("Server responded with unexpected status code {0}")]
    UnexpectedServerResponse(u16),
}
