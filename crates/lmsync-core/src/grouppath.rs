// ── Hierarchical path resolver ──
//
// Walks a slash-delimited group path root-to-leaf, creating any missing
// level. Intermediate ancestors are created as empty placeholder groups;
// only the final segment receives the caller-supplied payload. An
// explicit loop with prefix/parent accumulators keeps stack depth
// independent of path length and makes the ancestors-get-no-payload
// rule a visible branch.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use tracing::debug;

use lmsync_api::{ApiClient, ROOT_GROUP_ID};

use crate::error::CoreError;
use crate::properties;

/// The attributes a declared leaf group carries.
#[derive(Debug, Clone, Default)]
pub struct GroupAttributes {
    pub description: String,
    pub properties: BTreeMap<String, String>,
    pub disable_alerting: bool,
}

/// Split a path into its ordered segments. `/` has none.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|seg| !seg.is_empty()).collect()
}

/// Ensure every level of `path` exists, returning the leaf group's id.
///
/// `leaf` is applied only to the final segment; ancestors created along
/// the way are structural placeholders. Idempotent: a complete path
/// issues lookups only.
pub async fn ensure_group_path(
    client: &ApiClient,
    path: &str,
    leaf: Option<&GroupAttributes>,
) -> Result<i64, CoreError> {
    let segs = segments(path);
    let mut parent_id = ROOT_GROUP_ID;
    let mut prefix = String::new();

    for (index, segment) in segs.iter().enumerate() {
        prefix.push('/');
        prefix.push_str(segment);
        let is_leaf = index == segs.len() - 1;

        match client.find_device_group(&prefix, "id").await? {
            Some(group) => parent_id = group.id,
            None => {
                debug!(path = %prefix, "group missing, creating");
                let attrs = match (is_leaf, leaf) {
                    (true, Some(attrs)) => attrs.clone(),
                    _ => GroupAttributes::default(),
                };
                let payload = group_payload(segment, parent_id, &attrs);
                let created = client.create_device_group(&payload).await?;
                parent_id = created.id;
            }
        }
    }

    Ok(parent_id)
}

/// Build the wire payload for creating or patching one group level.
pub(crate) fn group_payload(name: &str, parent_id: i64, attrs: &GroupAttributes) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), json!(name));
    map.insert("parentId".into(), json!(parent_id));
    if !attrs.description.is_empty() {
        map.insert("description".into(), json!(attrs.description));
    }
    map.insert("disableAlerting".into(), json!(attrs.disable_alerting));
    map.insert(
        "customProperties".into(),
        json!(properties::build_property_payload(&attrs.properties)),
    );
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_splitting() {
        assert_eq!(segments("/network/switches"), vec!["network", "switches"]);
        assert_eq!(segments("/network"), vec!["network"]);
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
    }

    #[test]
    fn placeholder_payload_has_no_description() {
        let payload = group_payload("network", ROOT_GROUP_ID, &GroupAttributes::default());
        assert_eq!(payload["name"], "network");
        assert_eq!(payload["parentId"], ROOT_GROUP_ID);
        assert!(payload.get("description").is_none());
        assert_eq!(payload["disableAlerting"], false);
    }

    #[test]
    fn leaf_payload_carries_attributes() {
        let mut props = BTreeMap::new();
        props.insert("snmp.community".to_string(), "public".to_string());
        let attrs = GroupAttributes {
            description: "edge switches".into(),
            properties: props,
            disable_alerting: true,
        };
        let payload = group_payload("switches", 31, &attrs);
        assert_eq!(payload["description"], "edge switches");
        assert_eq!(payload["disableAlerting"], true);
        assert_eq!(payload["customProperties"][0]["name"], "snmp.community");
    }
}
