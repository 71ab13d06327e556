// Collector endpoints.
//
// Collectors are referenced by description (unique) and resolved to a
// numeric id for the device `preferredCollectorId` foreign key. This
// crate never creates collectors.

use tracing::debug;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::Error;
use crate::models::Collector;
use crate::query::Filter;

impl ApiClient {
    /// Find a collector by its description.
    ///
    /// `GET /santaba/rest/setting/collectors?filter=description:{d}&size=1`
    pub async fn find_collector(
        &self,
        description: &str,
        fields: &str,
    ) -> Result<Option<Collector>, Error> {
        debug!(description, "looking up collector");
        self.find_one(
            endpoints::COLLECTORS,
            Filter::new().eq("description", description),
            fields,
        )
        .await
    }
}
