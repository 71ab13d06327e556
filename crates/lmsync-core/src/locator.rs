// ── Device locator ──
//
// The uniqueness rule as an explicit ordered strategy list: display
// name is the more specific identity when populated, so it is tried
// first; hostname + collector description is the fallback. The first
// hit wins.
//
// Known ambiguity: during a display-name rename both strategies can
// match different records, and the engine operates on whichever is
// found first. Deliberately preserved, not resolved.

use tracing::debug;

use lmsync_api::{ApiClient, Device};

use crate::error::CoreError;
use crate::resource::DeviceSpec;

/// One way of resolving a desired device to a remote record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorStrategy<'a> {
    DisplayName(&'a str),
    HostnameCollector {
        hostname: &'a str,
        collector: &'a str,
    },
}

/// The strategy list for a spec, in evaluation order.
pub fn strategies(spec: &DeviceSpec) -> Vec<LocatorStrategy<'_>> {
    let mut list = Vec::with_capacity(2);
    if let Some(name) = spec.unique_display_name() {
        list.push(LocatorStrategy::DisplayName(name));
    }
    list.push(LocatorStrategy::HostnameCollector {
        hostname: &spec.hostname,
        collector: &spec.collector,
    });
    list
}

/// Resolve a desired device, returning the first strategy's hit.
pub async fn locate_device(
    client: &ApiClient,
    spec: &DeviceSpec,
    fields: &str,
) -> Result<Option<Device>, CoreError> {
    for strategy in strategies(spec) {
        let found = match strategy {
            LocatorStrategy::DisplayName(name) => {
                client.find_device_by_display_name(name, fields).await?
            }
            LocatorStrategy::HostnameCollector {
                hostname,
                collector,
            } => {
                client
                    .find_device_by_hostname(hostname, collector, fields)
                    .await?
            }
        };
        if let Some(device) = found {
            debug!(id = device.id, ?strategy, "located device");
            return Ok(Some(device));
        }
    }
    debug!(hostname = %spec.hostname, "device does not exist");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn spec(display_name: &str) -> DeviceSpec {
        DeviceSpec {
            hostname: "sw1.example.com".into(),
            display_name: display_name.into(),
            description: String::new(),
            collector: "c1".into(),
            groups: Vec::new(),
            properties: BTreeMap::new(),
            disable_alerting: false,
            account: "acme".into(),
        }
    }

    #[test]
    fn display_name_takes_precedence() {
        let spec = spec("sw1");
        let list = strategies(&spec);
        assert_eq!(
            list,
            vec![
                LocatorStrategy::DisplayName("sw1"),
                LocatorStrategy::HostnameCollector {
                    hostname: "sw1.example.com",
                    collector: "c1",
                },
            ]
        );
    }

    #[test]
    fn empty_display_name_skips_first_strategy() {
        let spec = spec("");
        let list = strategies(&spec);
        assert_eq!(
            list,
            vec![LocatorStrategy::HostnameCollector {
                hostname: "sw1.example.com",
                collector: "c1",
            }]
        );
    }
}
