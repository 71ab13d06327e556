// Device endpoints.
//
// Lookups run the unique-key rules: display name alone, or hostname +
// collector description. Both are size-1 filtered GETs with a caller
// supplied field projection.

use tracing::debug;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Error;
use crate::models::{Device, Property};
use crate::query::{Filter, RequestOptions};

impl ApiClient {
    /// Find a device by its display name (primary unique key).
    ///
    /// `GET /santaba/rest/device/devices?filter=displayName:{name}&size=1`
    pub async fn find_device_by_display_name(
        &self,
        display_name: &str,
        fields: &str,
    ) -> Result<Option<Device>, Error> {
        debug!(display_name, "looking up device by display name");
        self.find_one(
            endpoints::DEVICES,
            Filter::new().eq("displayName", display_name),
            fields,
        )
        .await
    }

    /// Find a device by hostname + collector description (fallback key).
    ///
    /// `GET /santaba/rest/device/devices?filter=hostName:{h},collectorDescription:{c}&size=1`
    pub async fn find_device_by_hostname(
        &self,
        hostname: &str,
        collector_description: &str,
        fields: &str,
    ) -> Result<Option<Device>, Error> {
        debug!(hostname, collector_description, "looking up device by hostname");
        self.find_one(
            endpoints::DEVICES,
            Filter::new()
                .eq("hostName", hostname)
                .eq("collectorDescription", collector_description),
            fields,
        )
        .await
    }

    /// Create a device. The payload carries the full wire object.
    pub async fn create_device(&self, payload: &serde_json::Value) -> Result<Device, Error> {
        debug!("creating device");
        let resp = self.post(endpoints::DEVICES, payload).await?;
        Self::decode_data(&resp)
    }

    /// Patch a device, applying only the named top-level body fields.
    pub async fn update_device(
        &self,
        id: i64,
        payload: &serde_json::Value,
        patch_fields: Vec<String>,
    ) -> Result<(), Error> {
        debug!(id, "patching device");
        let opts = RequestOptions::new().size(-1).patch_fields(patch_fields);
        self.patch(&endpoints::device(id), &opts, payload).await?;
        Ok(())
    }

    /// Delete a device by id.
    pub async fn delete_device(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting device");
        self.delete(&endpoints::device(id)).await?;
        Ok(())
    }

    /// Read device properties with caller-controlled filter/projection.
    pub async fn device_properties(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<Vec<Property>, Error> {
        self.get_items(&endpoints::device_properties(id), opts).await
    }
}
