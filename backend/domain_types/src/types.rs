use serde::{Deserialize, Serialize};

use crate::connector_types::ConnectorEnum;

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
#[serde(default)]
pub struct Connectors {
    pub adyen: ConnectorParams,
    pub stripe: ConnectorParams,
    pub nmi: ConnectorParams,
}

impl Default for Connectors {
    fn default() -> Self {
        Self {
            adyen: ConnectorParams::new(
                "https://checkout-live.adyen.com/v71",
                "https://checkout-test.adyen.com/v71",
            ),
            stripe: ConnectorParams::new("https://api.stripe.com/v1", "https://api.stripe.com/v1"),
            nmi: ConnectorParams::new(
                "https://secure.nmi.com/api/transact.php",
                "https://secure.nmi.com/api/transact.php",
            ),
        }
    }
}

impl Connectors {
    pub fn get(&self, connector: ConnectorEnum) -> &ConnectorParams {
        match connector {
            ConnectorEnum::Adyen => &self.adyen,
            ConnectorEnum::Stripe => &self.stripe,
            ConnectorEnum::Nmi => &self.nmi,
        }
    }
}

/// Endpoint pair of one processor. The gateway's test flag picks one of them.
#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub test_url: String,
}

impl ConnectorParams {
    pub fn new(live_url: impl Into<String>, test_url: impl Into<String>) -> Self {
        Self {
            live_url: live_url.into(),
            test_url: test_url.into(),
        }
    }

    pub fn get_url(&self, test_mode: bool) -> &str {
        if test_mode {
            &self.test_url
        } else {
            &self.live_url
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn is_proxy_configured(&self, should_bypass_proxy: bool) -> bool {
        !should_bypass_proxy && (self.http_url.is_some() || self.https_url.is_some())
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|bypass| url.starts_with(bypass.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selects_endpoint() {
        let connectors = Connectors::default();
        assert_eq!(
            connectors.get(ConnectorEnum::Adyen).get_url(true),
            "https://checkout-test.adyen.com/v71"
        );
        assert_eq!(
            connectors.get(ConnectorEnum::Adyen).get_url(false),
            "https://checkout-live.adyen.com/v71"
        );
    }

    #[test]
    fn proxy_bypass_by_prefix() {
        let proxy = Proxy {
            https_url: Some("https://proxy.internal:3128".to_string()),
            bypass_proxy_urls: vec!["https://api.stripe.com".to_string()],
            ..Default::default()
        };
        assert!(proxy.should_bypass("https://api.stripe.com/v1/refunds"));
        assert!(!proxy.should_bypass("https://secure.nmi.com/api/transact.php"));
        assert!(proxy.is_proxy_configured(false));
        assert!(!proxy.is_proxy_configured(true));
    }
}
