// ── Desired-state resource schema ──
//
// The declarative surface: what a manifest may say about a device, a
// device group, or a collector reference. Static constraints are
// checked here, before the engine touches the network; everything that
// passes `validate` is safe for the orchestrator to act on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation {
            field: field.into(),
            reason: "may not be empty".into(),
        });
    }
    Ok(())
}

/// A declared monitored device.
///
/// Uniqueness: `display_name` when non-empty, else the
/// (`hostname`, `collector`) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    /// Hostname or IP the backend monitors.
    pub hostname: String,

    /// Display name; the primary unique key when set.
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub description: String,

    /// Description of the collector that monitors this device. The
    /// collector must already exist.
    pub collector: String,

    /// Full paths of the groups this device belongs to.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Custom properties. Secret-valued properties come back masked
    /// from the backend and are verified, never clobbered.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub disable_alerting: bool,

    /// Account whose connection this resource uses.
    pub account: String,
}

impl DeviceSpec {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("hostname", &self.hostname)?;
        require("collector", &self.collector)?;
        require("account", &self.account)?;
        for path in &self.groups {
            validate_group_path(path)?;
        }
        Ok(())
    }

    /// The display name when it participates in the uniqueness rule.
    pub fn unique_display_name(&self) -> Option<&str> {
        let name = self.display_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// What the resource is called in logs and reports.
    pub fn label(&self) -> &str {
        &self.hostname
    }
}

/// A declared device group, unique by full hierarchical path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    /// Slash-delimited absolute path; `/` is the implicit root.
    pub full_path: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub disable_alerting: bool,

    pub account: String,
}

impl GroupSpec {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("account", &self.account)?;
        validate_group_path(&self.full_path)
    }

    pub fn is_root(&self) -> bool {
        self.full_path.trim() == "/"
    }

    pub fn label(&self) -> &str {
        &self.full_path
    }
}

/// A reference to a collector that must already exist.
///
/// Declared so a run can fail fast when a collector a device depends on
/// is missing; the engine never creates or installs collectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorRef {
    /// Unique collector description, conventionally the agent host's FQDN.
    pub description: String,

    pub account: String,
}

impl CollectorRef {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("description", &self.description)?;
        require("account", &self.account)
    }
}

/// A group path is absolute, has no empty segments, and only the root
/// may end in a slash.
pub fn validate_group_path(path: &str) -> Result<(), CoreError> {
    let invalid = |reason: &str| CoreError::Validation {
        field: "full_path".into(),
        reason: format!("'{path}': {reason}"),
    };
    if path == "/" {
        return Ok(());
    }
    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }
    if path[1..].split('/').any(|seg| seg.trim().is_empty()) {
        return Err(invalid("empty path segment"));
    }
    Ok(())
}
