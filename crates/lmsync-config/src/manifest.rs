//! Desired-state manifest.
//!
//! A TOML document declaring the devices, device groups, and collector
//! references a run should converge. Deserialized into the core schema
//! types and statically validated here, so the engine only ever sees
//! well-formed resources.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lmsync_core::{CollectorRef, DeviceSpec, GroupSpec};

use crate::ConfigError;

/// Everything one manifest file declares.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub devices: Vec<DeviceSpec>,

    #[serde(default)]
    pub device_groups: Vec<GroupSpec>,

    #[serde(default)]
    pub collectors: Vec<CollectorRef>,
}

impl Manifest {
    /// Parse and validate a manifest from TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Every resource passes its static checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for device in &self.devices {
            device.validate()?;
        }
        for group in &self.device_groups {
            group.validate()?;
        }
        for collector in &self.collectors {
            collector.validate()?;
        }
        Ok(())
    }

    /// The distinct accounts this manifest touches, in sorted order.
    pub fn accounts(&self) -> BTreeSet<String> {
        let mut accounts = BTreeSet::new();
        for device in &self.devices {
            accounts.insert(device.account.clone());
        }
        for group in &self.device_groups {
            accounts.insert(group.account.clone());
        }
        for collector in &self.collectors {
            accounts.insert(collector.account.clone());
        }
        accounts
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.device_groups.is_empty() && self.collectors.is_empty()
    }
}

/// Load and validate a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Manifest::parse(&text)
}
