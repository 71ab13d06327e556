// ── Per-account connection configuration ──
//
// Describes how to reach one account's backend host. The host is
// derived deterministically from the account name; tests override it
// to point at a local mock.

use secrecy::SecretString;
use url::Url;

use lmsync_api::TransportConfig;

use crate::error::CoreError;

/// Connection settings for a single account.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Tenant namespace; determines the backend host.
    pub account: String,
    /// API token access id.
    pub access_id: String,
    /// API token access key.
    pub access_key: SecretString,
    /// Host override (tests and on-prem endpoints); `None` derives
    /// `https://{account}.logicmonitor.com`.
    pub endpoint: Option<Url>,
    /// Transport tuning (TLS mode, timeout).
    pub transport: TransportConfig,
}

impl AccountConfig {
    pub fn new(
        account: impl Into<String>,
        access_id: impl Into<String>,
        access_key: SecretString,
    ) -> Self {
        Self {
            account: account.into(),
            access_id: access_id.into(),
            access_key,
            endpoint: None,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// The backend host root for this account.
    pub fn host(&self) -> Result<Url, CoreError> {
        match &self.endpoint {
            Some(url) => Ok(url.clone()),
            None => {
                let derived = format!("https://{}.logicmonitor.com", self.account);
                derived
                    .parse()
                    .map_err(|_| CoreError::Validation {
                        field: "account".into(),
                        reason: format!("'{}' does not form a valid host", self.account),
                    })
            }
        }
    }
}
