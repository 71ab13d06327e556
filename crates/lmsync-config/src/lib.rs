//! Configuration for the lmsync CLI.
//!
//! TOML account profiles, credential resolution (env + keyring +
//! plaintext), and translation to `lmsync_core::AccountConfig`. The
//! desired-state manifest lives in [`manifest`]. Everything here runs
//! before the engine touches the network; malformed input never reaches
//! the reconciler.

pub mod manifest;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lmsync_api::transport::{TlsMode, TransportConfig};
use lmsync_core::AccountConfig;

pub use manifest::{Manifest, load_manifest};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for account '{account}'")]
    NoCredentials { account: String },

    #[error("account '{account}' is not defined in the configuration")]
    UnknownAccount { account: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("manifest parse failed: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<lmsync_core::CoreError> for ConfigError {
    fn from(err: lmsync_core::CoreError) -> Self {
        match err {
            lmsync_core::CoreError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            other => Self::Validation {
                field: "manifest".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Named account profiles.
    #[serde(default)]
    pub accounts: HashMap<String, AccountProfile>,
}

/// One account's connection profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct AccountProfile {
    /// API token access id.
    pub access_id: String,

    /// API token access key (plaintext; prefer keyring or env var).
    pub access_key: Option<String>,

    /// Environment variable name containing the access key.
    pub access_key_env: Option<String>,

    /// Host override; the default derives from the account name.
    pub endpoint: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "lmsync", "lmsync").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("lmsync");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full config from file + environment.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    let path = path.cloned().unwrap_or_else(config_path);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("LMSYNC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an account's access key from the credential chain.
pub fn resolve_access_key(
    profile: &AccountProfile,
    account: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's access_key_env → env var lookup
    if let Some(ref env_name) = profile.access_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("lmsync", &format!("{account}/access-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.access_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        account: account.into(),
    })
}

/// Build an [`AccountConfig`] from a named profile.
pub fn account_config(config: &Config, account: &str) -> Result<AccountConfig, ConfigError> {
    let profile = config
        .accounts
        .get(account)
        .ok_or_else(|| ConfigError::UnknownAccount {
            account: account.into(),
        })?;

    let access_key = resolve_access_key(profile, account)?;
    let mut cfg = AccountConfig::new(account, profile.access_id.clone(), access_key);

    if let Some(ref endpoint) = profile.endpoint {
        let url: url::Url = endpoint.parse().map_err(|_| ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("invalid URL: {endpoint}"),
        })?;
        cfg = cfg.with_endpoint(url);
    }

    let tls = if profile.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };
    cfg.transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout),
    };

    Ok(cfg)
}

/// Build one [`AccountConfig`] per account named by the manifest.
pub fn account_configs(
    config: &Config,
    accounts: impl IntoIterator<Item = String>,
) -> Result<Vec<AccountConfig>, ConfigError> {
    accounts
        .into_iter()
        .map(|account| account_config(config, &account))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(access_key: Option<&str>) -> AccountProfile {
        AccountProfile {
            access_id: "id".into(),
            access_key: access_key.map(String::from),
            access_key_env: None,
            endpoint: None,
            ca_cert: None,
            insecure: false,
            timeout: 30,
        }
    }

    #[test]
    fn plaintext_key_resolves_last() {
        let key = resolve_access_key(&profile(Some("sekrit")), "acme").expect("key");
        use secrecy::ExposeSecret;
        assert_eq!(key.expose_secret(), "sekrit");
    }

    #[test]
    fn missing_credentials_error_names_the_account() {
        let err = resolve_access_key(&profile(None), "acme").expect_err("no credentials");
        assert!(matches!(
            err,
            ConfigError::NoCredentials { ref account } if account == "acme"
        ));
    }

    #[test]
    fn unknown_account_is_rejected() {
        let config = Config::default();
        let err = account_config(&config, "ghost").expect_err("unknown");
        assert!(matches!(err, ConfigError::UnknownAccount { .. }));
    }

    #[test]
    fn endpoint_override_is_parsed() {
        let mut config = Config::default();
        let mut p = profile(Some("sekrit"));
        p.endpoint = Some("http://127.0.0.1:9000".into());
        config.accounts.insert("acme".into(), p);

        let cfg = account_config(&config, "acme").expect("config");
        assert_eq!(
            cfg.host().expect("host").as_str(),
            "http://127.0.0.1:9000/"
        );
    }
}
