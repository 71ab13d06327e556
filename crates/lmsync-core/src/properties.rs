// ── Property reconciler ──
//
// Custom properties round-trip through the backend except for secrets,
// which come back as a fixed masked placeholder. Equality for a masked
// value can only be tested by sending the exact masked string back
// through the filter engine: the backend evaluates the comparison
// server-side without revealing the secret. A verification hit means
// "unchanged" and the caller-held cleartext is reported; a miss keeps
// the masked value, flagging a real change without leaking anything.

use std::collections::BTreeMap;

use tracing::debug;

use lmsync_api::{ApiClient, Filter, Property, RequestOptions};

use crate::error::CoreError;

/// The fixed redaction marker the backend substitutes for secrets.
pub const MASKED_VALUE: &str = "********";

/// Bookkeeping property stamped on every write; excluded from reads.
pub const UPDATE_STAMP: &str = "puppet.update.on";

/// System-managed category property, never reconciled.
pub const SYSTEM_CATEGORIES: &str = "system.categories";

/// Which resource's properties sub-endpoint to read.
#[derive(Debug, Clone, Copy)]
pub enum PropertyOwner {
    Device(i64),
    Group(i64),
}

impl PropertyOwner {
    async fn fetch(
        self,
        client: &ApiClient,
        opts: &RequestOptions,
    ) -> Result<Vec<Property>, lmsync_api::Error> {
        match self {
            Self::Device(id) => client.device_properties(id, opts).await,
            Self::Group(id) => client.group_properties(id, opts).await,
        }
    }
}

/// Read the custom, non-system properties of a device or group.
///
/// Masked values whose name appears in `desired` are verified with an
/// exact-match filter; on a hit the desired cleartext is substituted so
/// an unchanged secret diffs as equal.
pub async fn read_properties(
    client: &ApiClient,
    owner: PropertyOwner,
    desired: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, CoreError> {
    let opts = RequestOptions::new()
        .filter(
            Filter::new()
                .eq("type", "custom")
                .ne("name", SYSTEM_CATEGORIES)
                .ne("name", UPDATE_STAMP),
        )
        .fields("name,value")
        .size(-1);

    let mut live = BTreeMap::new();
    for property in owner.fetch(client, &opts).await? {
        let mut value = property.value;
        if value.contains(MASKED_VALUE) && desired.contains_key(&property.name) {
            debug!(name = %property.name, "found masked property, verifying");
            if masked_value_unchanged(client, owner, &property.name, &value).await? {
                debug!(name = %property.name, "property unchanged");
                value = desired[&property.name].clone();
            } else {
                debug!(name = %property.name, "property changed");
            }
        }
        live.insert(property.name, value);
    }
    Ok(live)
}

/// Exact-match round trip: does `(name, masked value)` still filter to a
/// record? The backend compares against the stored secret server-side.
async fn masked_value_unchanged(
    client: &ApiClient,
    owner: PropertyOwner,
    name: &str,
    masked: &str,
) -> Result<bool, CoreError> {
    let opts = RequestOptions::new()
        .filter(
            Filter::new()
                .eq("type", "custom")
                .eq("name", name)
                .eq("value", masked),
        )
        .size(1);
    let matches = owner.fetch(client, &opts).await?;
    Ok(!matches.is_empty())
}

/// Convert desired properties to the wire list, appending the
/// last-reconciled stamp (current UTC time, RFC 3339).
pub fn build_property_payload(desired: &BTreeMap<String, String>) -> Vec<Property> {
    build_property_payload_at(desired, &chrono::Utc::now().to_rfc3339())
}

fn build_property_payload_at(desired: &BTreeMap<String, String>, stamp: &str) -> Vec<Property> {
    let mut payload: Vec<Property> = desired
        .iter()
        .map(|(name, value)| Property::new(name.clone(), value.clone()))
        .collect();
    payload.push(Property::new(UPDATE_STAMP, stamp));
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_appends_update_stamp_last() {
        let mut desired = BTreeMap::new();
        desired.insert("snmp.community".to_string(), "public".to_string());
        desired.insert("app.port".to_string(), "8443".to_string());

        let payload = build_property_payload_at(&desired, "2026-08-27T00:00:00+00:00");

        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0], Property::new("app.port", "8443"));
        assert_eq!(payload[1], Property::new("snmp.community", "public"));
        assert_eq!(
            payload[2],
            Property::new(UPDATE_STAMP, "2026-08-27T00:00:00+00:00")
        );
    }

    #[test]
    fn empty_desired_set_still_carries_stamp() {
        let payload = build_property_payload(&BTreeMap::new());
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].name, UPDATE_STAMP);
    }
}
