// Device group endpoints.
//
// Groups are unique by full hierarchical path. The backend stores
// `fullPath` without the leading slash, so desired paths (`/a/b`) are
// normalized once here; the root path short-circuits to the synthetic
// root group without a remote call.

use tracing::debug;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Error;
use crate::models::{DeviceGroup, Property};
use crate::query::{Filter, RequestOptions};

/// Strip the leading slash for wire-side `fullPath` comparisons.
fn wire_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl ApiClient {
    /// Find a device group by full path.
    ///
    /// `"/"` (or `""`) always resolves to the synthetic root group
    /// without issuing a request.
    pub async fn find_device_group(
        &self,
        full_path: &str,
        fields: &str,
    ) -> Result<Option<DeviceGroup>, Error> {
        let path = wire_path(full_path);
        if path.is_empty() {
            return Ok(Some(DeviceGroup::root()));
        }
        debug!(full_path, "looking up device group");
        self.find_one(
            endpoints::DEVICE_GROUPS,
            Filter::new().eq("fullPath", path),
            fields,
        )
        .await
    }

    /// Fetch groups by id OR-group: `filter=id:4||id:8`.
    ///
    /// Used to resolve a device's `hostGroupIds` back to paths.
    pub async fn find_device_groups_by_ids(
        &self,
        ids: &[i64],
        fields: &str,
    ) -> Result<Vec<DeviceGroup>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let opts = RequestOptions::new()
            .filter(Filter::any("id", ids.iter().copied()))
            .fields(fields)
            .size(-1);
        self.get_items(endpoints::DEVICE_GROUPS, &opts).await
    }

    /// Create a device group, returning the created record (the path
    /// walker needs the new id for the next level's `parentId`).
    pub async fn create_device_group(
        &self,
        payload: &serde_json::Value,
    ) -> Result<DeviceGroup, Error> {
        debug!("creating device group");
        let resp = self.post(endpoints::DEVICE_GROUPS, payload).await?;
        Self::decode_data(&resp)
    }

    /// Patch a device group, applying only the named top-level fields.
    pub async fn update_device_group(
        &self,
        id: i64,
        payload: &serde_json::Value,
        patch_fields: Vec<String>,
    ) -> Result<(), Error> {
        debug!(id, "patching device group");
        let opts = RequestOptions::new().size(-1).patch_fields(patch_fields);
        self.patch(&endpoints::device_group(id), &opts, payload)
            .await?;
        Ok(())
    }

    /// Delete a device group by id.
    pub async fn delete_device_group(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting device group");
        self.delete(&endpoints::device_group(id)).await?;
        Ok(())
    }

    /// Read group properties with caller-controlled filter/projection.
    pub async fn group_properties(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<Vec<Property>, Error> {
        self.get_items(&endpoints::device_group_properties(id), opts)
            .await
    }
}
