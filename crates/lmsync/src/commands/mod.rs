//! Command handlers: bridge CLI args to the reconciliation engine.

pub mod apply;
pub mod destroy;
pub mod validate;

use lmsync_config::{Manifest, config_path, load_manifest};
use lmsync_core::ConnectionPool;

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;

/// Load and statically validate the manifest named by `-f`.
pub(crate) fn load_manifest_arg(args: &RunArgs) -> Result<Manifest, CliError> {
    load_manifest(&args.file).map_err(|source| CliError::Manifest {
        path: args.file.display().to_string(),
        source,
    })
}

/// Open one connection per account the manifest touches.
pub(crate) fn open_pool(
    manifest: &Manifest,
    global: &GlobalOpts,
) -> Result<ConnectionPool, CliError> {
    let config_file = global.config.clone().unwrap_or_else(config_path);
    let wrap_config = |source| CliError::Config {
        path: config_file.display().to_string(),
        source,
    };

    let config = lmsync_config::load_config(global.config.as_ref()).map_err(wrap_config)?;
    let accounts =
        lmsync_config::account_configs(&config, manifest.accounts()).map_err(wrap_config)?;
    ConnectionPool::open_all(&accounts).map_err(CliError::Connection)
}
