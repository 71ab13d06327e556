// ── Connection registry ──
//
// One signed client per distinct account, opened once before any
// resource is processed and shared (sequentially) by every resource of
// that account for the rest of the run. An explicit pool object rather
// than process-global state; ownership passes into the orchestrator.

use std::collections::HashMap;

use tracing::debug;

use lmsync_api::{ApiClient, ApiToken};

use crate::config::AccountConfig;
use crate::error::CoreError;

/// Holds the open connections for a reconciliation run.
///
/// Not safe for parallel mutation of a single account's client; the
/// engine awaits every call before issuing the next.
pub struct ConnectionPool {
    clients: HashMap<String, ApiClient>,
}

impl ConnectionPool {
    /// Open one connection per distinct account, skipping duplicates.
    pub fn open_all(accounts: &[AccountConfig]) -> Result<Self, CoreError> {
        let mut clients = HashMap::new();
        for cfg in accounts {
            if clients.contains_key(&cfg.account) {
                continue;
            }
            debug!(account = %cfg.account, "opening connection");
            let token = ApiToken::new(cfg.access_id.clone(), cfg.access_key.clone());
            let client = ApiClient::new(cfg.host()?, token, &cfg.transport)?;
            clients.insert(cfg.account.clone(), client);
        }
        Ok(Self { clients })
    }

    /// The connection for an account.
    ///
    /// Fails with [`CoreError::ConnectionNotFound`] when called for an
    /// account `open_all` never saw.
    pub fn get(&self, account: &str) -> Result<&ApiClient, CoreError> {
        self.clients
            .get(account)
            .ok_or_else(|| CoreError::ConnectionNotFound {
                account: account.into(),
            })
    }

    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
