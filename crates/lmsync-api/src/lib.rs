//! Async client for the LogicMonitor santaba REST API.
//!
//! Covers the inventory surface a reconciliation run needs: device and
//! device-group lookup by unique key (filtered, field-projected GETs),
//! create/patch/delete, the properties sub-resources, and collector
//! resolution. Every request is signed with an `LMv1` token header.
//!
//! The crate deals in wire-level concerns only; `lmsync-core` layers
//! the reconciliation semantics (locator precedence, ancestor creation,
//! masked-secret handling) on top.

pub mod auth;
pub mod client;
pub mod collectors;
pub mod devices;
pub mod endpoints;
pub mod error;
pub mod groups;
pub mod models;
pub mod query;
pub mod transport;

pub use auth::ApiToken;
pub use client::ApiClient;
pub use error::Error;
pub use models::{Collector, Device, DeviceGroup, Property, RestResponse, ROOT_GROUP_ID};
pub use query::{Filter, RequestOptions};
pub use transport::TransportConfig;
