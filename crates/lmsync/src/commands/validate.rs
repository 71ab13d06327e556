//! `lmsync validate` -- static manifest checks, no network.

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output::print_output;

pub fn handle(args: &RunArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let manifest = super::load_manifest_arg(args)?;

    let accounts: Vec<String> = manifest.accounts().into_iter().collect();
    let summary = format!(
        "{}: {} devices, {} device groups, {} collectors across {} accounts ({})",
        args.file.display(),
        manifest.devices.len(),
        manifest.device_groups.len(),
        manifest.collectors.len(),
        accounts.len(),
        accounts.join(", ")
    );
    print_output(&summary, global.quiet);
    Ok(())
}
