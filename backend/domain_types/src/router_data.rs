use std::marker::PhantomData;

use hyperswitch_masking::Secret;

/// Credentials of one processor account. The variant is the shape the
/// connector expects; the meaning of each key is connector specific.
#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    #[default]
    NoKey,
}

/// Everything one connector call needs: credentials, the resolved endpoint,
/// the test flag, and the flow specific request data.
#[derive(Debug, Clone)]
pub struct RouterData<Flow, Request> {
    pub flow: PhantomData<Flow>,
    pub connector_auth_type: ConnectorAuthType,
    pub base_url: String,
    pub test_mode: bool,
    pub request: Request,
}

impl<Flow, Request> RouterData<Flow, Request> {
    pub fn new(
        connector_auth_type: ConnectorAuthType,
        base_url: impl Into<String>,
        test_mode: bool,
        request: Request,
    ) -> Self {
        Self {
            flow: PhantomData,
            connector_auth_type,
            base_url: base_url.into(),
            test_mode,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::PeekInterface;

    use super::*;

    #[test]
    fn auth_type_deserializes_from_tagged_json() {
        let auth: ConnectorAuthType = serde_json::from_str(
            r#"{"auth_type":"BodyKey","api_key":"AQE_key","key1":"MerchantAccount"}"#,
        )
        .unwrap();
        match auth {
            ConnectorAuthType::BodyKey { api_key, key1 } => {
                assert_eq!(api_key.peek(), "AQE_key");
                assert_eq!(key1.peek(), "MerchantAccount");
            }
            other => panic!("unexpected auth type {other:?}"),
        }
    }

    #[test]
    fn auth_type_debug_hides_keys() {
        let auth = ConnectorAuthType::HeaderKey {
            api_key: Secret::new("sk_test_secret".to_string()),
        };
        assert!(!format!("{auth:?}").contains("sk_test_secret"));
    }
}
