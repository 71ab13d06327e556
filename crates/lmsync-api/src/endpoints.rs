// REST resource paths for the inventory surface.
//
// Numeric-id paths are built by the helper functions; the signed
// resource path never includes the query string.

pub const DEVICES: &str = "/santaba/rest/device/devices";
pub const DEVICE_GROUPS: &str = "/santaba/rest/device/groups";
pub const COLLECTORS: &str = "/santaba/rest/setting/collectors";

pub fn device(id: i64) -> String {
    format!("{DEVICES}/{id}")
}

pub fn device_properties(id: i64) -> String {
    format!("{DEVICES}/{id}/properties")
}

pub fn device_group(id: i64) -> String {
    format!("{DEVICE_GROUPS}/{id}")
}

pub fn device_group_properties(id: i64) -> String {
    format!("{DEVICE_GROUPS}/{id}/properties")
}
