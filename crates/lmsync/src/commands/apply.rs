//! `lmsync apply` -- converge the manifest against the backend.
//!
//! Collectors are verified first (devices depend on them), then groups,
//! then devices. A failed resource is reported and skipped; the rest of
//! the run continues.

use tracing::info;

use lmsync_core::reconcile;

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output::{self, RunReport};

pub async fn handle(args: &RunArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let manifest = super::load_manifest_arg(args)?;
    if manifest.is_empty() {
        output::print_output("manifest declares no resources", global.quiet);
        return Ok(());
    }

    let pool = super::open_pool(&manifest, global)?;
    info!(
        accounts = pool.len(),
        devices = manifest.devices.len(),
        groups = manifest.device_groups.len(),
        collectors = manifest.collectors.len(),
        "starting apply"
    );

    let mut report = RunReport::new();

    for collector in &manifest.collectors {
        let result = reconcile::verify_collector(&pool, collector).await;
        report.push(
            "collector",
            &collector.description,
            &collector.account,
            result,
        );
    }

    for group in &manifest.device_groups {
        let result = reconcile::apply_group(&pool, group).await;
        report.push("group", group.label(), &group.account, result);
    }

    for device in &manifest.devices {
        let result = reconcile::apply_device(&pool, device).await;
        report.push("device", device.label(), &device.account, result);
    }

    finish(report, global)
}

/// Print the summary and turn partial failure into a process error.
pub(crate) fn finish(report: RunReport, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    output::print_output(&report.render(&global.output, color), global.quiet);

    let failed = report.failed();
    if failed > 0 {
        return Err(CliError::ResourcesFailed {
            failed,
            total: report.len(),
        });
    }
    Ok(())
}
