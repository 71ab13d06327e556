// lmsync-core: reconciliation engine between desired inventory and the
// backend, built on lmsync-api.
//
// A run opens one connection per account (registry), resolves each
// declared resource to at most one remote record (locator), creates
// missing ancestor groups (grouppath), diffs properties with
// masked-secret verification (properties), and issues the minimal
// create/patch/delete sequence (reconcile).

pub mod config;
pub mod error;
pub mod grouppath;
pub mod locator;
pub mod properties;
pub mod reconcile;
pub mod registry;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::AccountConfig;
pub use error::CoreError;
pub use grouppath::ensure_group_path;
pub use reconcile::{
    Outcome, apply_device, apply_group, delete_device, delete_group, verify_collector,
};
pub use registry::ConnectionPool;
pub use resource::{CollectorRef, DeviceSpec, GroupSpec};
