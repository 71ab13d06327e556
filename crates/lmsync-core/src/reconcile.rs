// ── Upsert orchestrator ──
//
// Composes locator, path resolver, and property reconciler into the
// create/read/update/delete sequence for each resource kind. Updates
// rebuild the full wire payload but PATCH with a patchFields directive
// naming only the semantically changed top-level keys; server-assigned
// scanConfigId/netflowCollectorId are carried forward when non-zero and
// omitted when zero (zero means unset, never forcibly written back).
//
// Failures abort only the resource at hand, and partial ancestor
// creation is not rolled back: placeholder groups are independently
// valid structural resources.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use lmsync_api::{ApiClient, Device, DeviceGroup};

use crate::error::CoreError;
use crate::grouppath::{GroupAttributes, ensure_group_path, group_payload, segments};
use crate::locator;
use crate::properties::{self, PropertyOwner};
use crate::registry::ConnectionPool;
use crate::resource::{CollectorRef, DeviceSpec, GroupSpec};

/// Terminal state of one resource's reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Unchanged,
    Deleted,
    /// Nothing to do and nothing touched (absent on delete, or a
    /// resource the engine does not manage).
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
            Self::Skipped => "skipped",
        };
        f.write_str(word)
    }
}

/// Projection for device lookups: every attribute the diff compares,
/// plus the server-assigned ids the update carries forward.
const DEVICE_FIELDS: &str =
    "id,displayName,description,preferredCollectorId,hostGroupIds,disableAlerting,scanConfigId,netflowCollectorId";

const GROUP_FIELDS: &str = "id,parentId,description,appliesTo,disableAlerting";

// ── Devices ─────────────────────────────────────────────────────────

/// Converge one declared device: create it (ensuring its group paths
/// first) or patch the changed attributes of the located record.
pub async fn apply_device(pool: &ConnectionPool, spec: &DeviceSpec) -> Result<Outcome, CoreError> {
    spec.validate()?;
    let client = pool.get(&spec.account)?;

    match locator::locate_device(client, spec, DEVICE_FIELDS).await? {
        None => {
            debug!(hostname = %spec.hostname, "creating device");
            let payload = build_device_payload(client, spec, None).await?;
            client.create_device(&payload).await?;
            Ok(Outcome::Created)
        }
        Some(device) => {
            let changed = changed_device_fields(client, spec, &device).await?;
            if changed.is_empty() {
                debug!(hostname = %spec.hostname, "device in sync");
                return Ok(Outcome::Unchanged);
            }
            debug!(hostname = %spec.hostname, ?changed, "patching device");
            let payload = build_device_payload(client, spec, Some(&device)).await?;
            client.update_device(device.id, &payload, changed).await?;
            Ok(Outcome::Updated)
        }
    }
}

/// Delete one declared device. Absent devices delete as a no-op with no
/// REST call issued.
pub async fn delete_device(pool: &ConnectionPool, spec: &DeviceSpec) -> Result<Outcome, CoreError> {
    spec.validate()?;
    let client = pool.get(&spec.account)?;

    match locator::locate_device(client, spec, "id").await? {
        None => {
            debug!(hostname = %spec.hostname, "device absent, nothing to delete");
            Ok(Outcome::Skipped)
        }
        Some(device) => {
            client.delete_device(device.id).await?;
            Ok(Outcome::Deleted)
        }
    }
}

/// The wire keys whose desired and live values differ.
async fn changed_device_fields(
    client: &ApiClient,
    spec: &DeviceSpec,
    device: &Device,
) -> Result<Vec<String>, CoreError> {
    let mut changed = Vec::new();

    if let Some(name) = spec.unique_display_name() {
        if device.display_name != name {
            changed.push("displayName".to_string());
        }
    }
    // An empty desired description never clears a remote one.
    if !spec.description.is_empty() && device.description != spec.description {
        changed.push("description".to_string());
    }

    let collector_id = resolve_collector_id(client, &spec.collector).await?;
    if device.preferred_collector_id != collector_id {
        changed.push("preferredCollectorId".to_string());
    }

    let live_groups = static_group_paths(client, &device.group_ids()).await?;
    let desired_groups: BTreeSet<String> = spec.groups.iter().cloned().collect();
    if live_groups != desired_groups {
        changed.push("hostGroupIds".to_string());
    }

    if device.disable_alerting != spec.disable_alerting {
        changed.push("disableAlerting".to_string());
    }

    let live_props =
        properties::read_properties(client, PropertyOwner::Device(device.id), &spec.properties)
            .await?;
    if live_props != spec.properties {
        changed.push("customProperties".to_string());
    }

    Ok(changed)
}

/// Full-paths of the device's static group memberships. Dynamic groups
/// (non-empty `appliesTo`) are invisible to the diff.
async fn static_group_paths(
    client: &ApiClient,
    group_ids: &[i64],
) -> Result<BTreeSet<String>, CoreError> {
    let groups = client
        .find_device_groups_by_ids(group_ids, "appliesTo,fullPath")
        .await?;
    Ok(groups
        .iter()
        .filter(|g| !g.is_dynamic())
        .map(|g| format!("/{}", g.full_path))
        .collect())
}

/// Build the full device wire payload.
///
/// Declared group paths are ensured (ancestors created as needed) and
/// resolved to the comma-joined `hostGroupIds` foreign-key list; the
/// collector description resolves to `preferredCollectorId`. On create
/// the server-assigned ids get their required zero defaults; on update
/// the located record's non-zero values are carried forward instead.
async fn build_device_payload(
    client: &ApiClient,
    spec: &DeviceSpec,
    located: Option<&Device>,
) -> Result<Value, CoreError> {
    let mut map = Map::new();
    map.insert("name".into(), json!(spec.hostname));
    if let Some(name) = spec.unique_display_name() {
        map.insert("displayName".into(), json!(name));
    }
    if !spec.description.is_empty() {
        map.insert("description".into(), json!(spec.description));
    }

    let collector_id = resolve_collector_id(client, &spec.collector).await?;
    map.insert("preferredCollectorId".into(), json!(collector_id));

    let mut group_ids = Vec::with_capacity(spec.groups.len());
    for path in &spec.groups {
        let id = ensure_group_path(client, path, None).await?;
        group_ids.push(id.to_string());
    }
    map.insert("hostGroupIds".into(), json!(group_ids.join(",")));

    map.insert("disableAlerting".into(), json!(spec.disable_alerting));
    map.insert(
        "customProperties".into(),
        json!(properties::build_property_payload(&spec.properties)),
    );

    match located {
        None => {
            // Required by the create API, as unset defaults.
            map.insert("scanConfigId".into(), json!(0));
            map.insert("netflowCollectorId".into(), json!(0));
        }
        Some(device) => {
            if device.scan_config_id != 0 {
                map.insert("scanConfigId".into(), json!(device.scan_config_id));
            }
            if device.netflow_collector_id != 0 {
                map.insert("netflowCollectorId".into(), json!(device.netflow_collector_id));
            }
        }
    }

    Ok(Value::Object(map))
}

async fn resolve_collector_id(client: &ApiClient, description: &str) -> Result<i64, CoreError> {
    match client.find_collector(description, "id").await? {
        Some(collector) => Ok(collector.id),
        None => Err(CoreError::CollectorNotFound {
            description: description.into(),
        }),
    }
}

// ── Device groups ───────────────────────────────────────────────────

/// Converge one declared device group: create the full ancestor chain
/// with the leaf's attributes, or patch the changed attributes of the
/// located record.
pub async fn apply_group(pool: &ConnectionPool, spec: &GroupSpec) -> Result<Outcome, CoreError> {
    spec.validate()?;
    let client = pool.get(&spec.account)?;

    // The root always exists and carries no manageable attributes.
    if spec.is_root() {
        return Ok(Outcome::Unchanged);
    }

    match client.find_device_group(&spec.full_path, GROUP_FIELDS).await? {
        None => {
            debug!(path = %spec.full_path, "creating device group");
            ensure_group_path(client, &spec.full_path, Some(&attributes(spec))).await?;
            Ok(Outcome::Created)
        }
        Some(group) => {
            if group.is_dynamic() {
                warn!(path = %spec.full_path, "group is dynamic, not managed");
                return Ok(Outcome::Skipped);
            }
            let changed = changed_group_fields(client, spec, &group).await?;
            if changed.is_empty() {
                debug!(path = %spec.full_path, "group in sync");
                return Ok(Outcome::Unchanged);
            }
            debug!(path = %spec.full_path, ?changed, "patching device group");
            let leaf = segments(&spec.full_path).last().copied().unwrap_or_default();
            let payload = group_payload(leaf, group.parent_id, &attributes(spec));
            client.update_device_group(group.id, &payload, changed).await?;
            Ok(Outcome::Updated)
        }
    }
}

/// Delete one declared device group. The root and absent groups are
/// no-ops with no mutating call.
pub async fn delete_group(pool: &ConnectionPool, spec: &GroupSpec) -> Result<Outcome, CoreError> {
    spec.validate()?;
    let client = pool.get(&spec.account)?;

    if spec.is_root() {
        return Ok(Outcome::Skipped);
    }

    match client.find_device_group(&spec.full_path, "id").await? {
        None => {
            debug!(path = %spec.full_path, "group absent, nothing to delete");
            Ok(Outcome::Skipped)
        }
        Some(group) => {
            client.delete_device_group(group.id).await?;
            Ok(Outcome::Deleted)
        }
    }
}

async fn changed_group_fields(
    client: &ApiClient,
    spec: &GroupSpec,
    group: &DeviceGroup,
) -> Result<Vec<String>, CoreError> {
    let mut changed = Vec::new();

    if !spec.description.is_empty() && group.description != spec.description {
        changed.push("description".to_string());
    }
    if group.disable_alerting != spec.disable_alerting {
        changed.push("disableAlerting".to_string());
    }

    let live_props =
        properties::read_properties(client, PropertyOwner::Group(group.id), &spec.properties)
            .await?;
    if live_props != spec.properties {
        changed.push("customProperties".to_string());
    }

    Ok(changed)
}

fn attributes(spec: &GroupSpec) -> GroupAttributes {
    GroupAttributes {
        description: spec.description.clone(),
        properties: spec.properties.clone(),
        disable_alerting: spec.disable_alerting,
    }
}

// ── Collectors ──────────────────────────────────────────────────────

/// Assert that a referenced collector exists. The engine never creates
/// collectors, so a miss is an error the caller reports.
pub async fn verify_collector(
    pool: &ConnectionPool,
    collector: &CollectorRef,
) -> Result<Outcome, CoreError> {
    collector.validate()?;
    let client = pool.get(&collector.account)?;

    match client.find_collector(&collector.description, "id").await? {
        Some(found) => {
            debug!(id = found.id, description = %collector.description, "collector present");
            Ok(Outcome::Unchanged)
        }
        None => Err(CoreError::CollectorNotFound {
            description: collector.description.clone(),
        }),
    }
}
