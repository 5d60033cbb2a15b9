//! Commonly used constants

/// Message used when a processor reply carries no message of its own
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Key under which the undecodable body is echoed back in response params
pub const RAW_RESPONSE_KEY: &str = "raw_response";

/// Amount authorized, and then voided, by a card verification
pub const VERIFY_AMOUNT_MINOR_UNITS: i64 = 100;

/// Placeholder used for a card holder name the caller did not provide
pub const DEFAULT_CARD_HOLDER_NAME: &str = "Card Holder";

/// Replacement text written over sensitive values when scrubbing transcripts
pub const SCRUBBED: &str = "[FILTERED]";

/// Prefix for environment variables that override file configuration
pub const ENV_PREFIX: &str = "PAYMENT_GATEWAY";

pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;
