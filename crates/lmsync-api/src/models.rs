// Wire models for the santaba REST envelope and inventory resources.
//
// Every resource field is defaulted: lookups run with a field projection,
// so any attribute outside the projection is simply absent from the JSON.

use serde::{Deserialize, Serialize};

/// Identifier of the implicit top-level device group (`/`).
///
/// The root always exists and is never created, modified, or deleted;
/// its direct children carry this as their `parentId`.
pub const ROOT_GROUP_ID: i64 = 1;

/// The `{ status, errmsg, data }` response envelope.
///
/// The backend reports failures in-band: an HTTP 200 whose envelope
/// `status` is non-200 is still a failed call. `data` is an object for
/// single-resource operations and `{ total, items }` for list GETs.
#[derive(Debug, Clone, Deserialize)]
pub struct RestResponse {
    pub status: i64,
    #[serde(default)]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RestResponse {
    /// The `data.items` list, or an empty slice when absent.
    pub fn items(&self) -> &[serde_json::Value] {
        self.data
            .as_ref()
            .and_then(|d| d.get("items"))
            .and_then(|i| i.as_array())
            .map_or(&[], Vec::as_slice)
    }

    pub fn has_items(&self) -> bool {
        !self.items().is_empty()
    }
}

/// A custom property name/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A monitored device record.
///
/// `name` is the hostname; `display_name` is the primary unique key.
/// `host_group_ids` is the backend's comma-joined group id list, kept in
/// wire form; `lmsync-core` resolves it against group paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub preferred_collector_id: i64,
    pub host_group_ids: String,
    pub custom_properties: Vec<Property>,
    pub disable_alerting: bool,
    pub scan_config_id: i64,
    pub netflow_collector_id: i64,
}

impl Device {
    /// Parse the comma-joined `hostGroupIds` field.
    pub fn group_ids(&self) -> Vec<i64> {
        self.host_group_ids
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }
}

/// A device group record, unique by `full_path`.
///
/// A non-empty `applies_to` marks a dynamic group, which the reconciler
/// treats as unmanaged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceGroup {
    pub id: i64,
    pub full_path: String,
    pub description: String,
    pub parent_id: i64,
    pub applies_to: String,
    pub disable_alerting: bool,
    pub custom_properties: Vec<Property>,
}

impl DeviceGroup {
    /// The synthetic root group: always exists, never fetched.
    pub fn root() -> Self {
        Self {
            id: ROOT_GROUP_ID,
            full_path: String::new(),
            ..Self::default()
        }
    }

    pub fn is_dynamic(&self) -> bool {
        !self.applies_to.is_empty()
    }
}

/// A collector (monitoring agent) record, unique by description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collector {
    pub id: i64,
    pub description: String,
}
