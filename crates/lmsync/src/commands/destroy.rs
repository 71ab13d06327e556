//! `lmsync destroy` -- delete the manifest's resources.
//!
//! Devices go first, then groups deepest-path-first so children are
//! gone before their parents. Collector references are never deleted;
//! the engine does not manage collector lifecycles.

use tracing::info;

use lmsync_core::{GroupSpec, reconcile};

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output::RunReport;

pub async fn handle(args: &RunArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let manifest = super::load_manifest_arg(args)?;
    if manifest.devices.is_empty() && manifest.device_groups.is_empty() {
        crate::output::print_output("manifest declares nothing to destroy", global.quiet);
        return Ok(());
    }

    let pool = super::open_pool(&manifest, global)?;
    info!(
        accounts = pool.len(),
        devices = manifest.devices.len(),
        groups = manifest.device_groups.len(),
        "starting destroy"
    );

    let mut report = RunReport::new();

    for device in &manifest.devices {
        let result = reconcile::delete_device(&pool, device).await;
        report.push("device", device.label(), &device.account, result);
    }

    let mut groups: Vec<&GroupSpec> = manifest.device_groups.iter().collect();
    groups.sort_by_key(|group| std::cmp::Reverse(depth(&group.full_path)));
    for group in groups {
        let result = reconcile::delete_group(&pool, group).await;
        report.push("group", group.label(), &group.account, result);
    }

    super::apply::finish(report, global)
}

fn depth(path: &str) -> usize {
    path.chars().filter(|&c| c == '/').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deeper_paths_sort_first() {
        let mut paths = vec!["/a", "/a/b/c", "/a/b"];
        paths.sort_by_key(|p| std::cmp::Reverse(depth(p)));
        assert_eq!(paths, vec!["/a/b/c", "/a/b", "/a"]);
    }
}
