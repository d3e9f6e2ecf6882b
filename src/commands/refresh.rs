//! Refresh command - reads the pipeline file, refreshes bundle digests,
//! and writes the result back to the same path.

use anyhow::Result;
use tracing::info;

use crate::config::RefreshConfig;
use crate::domain::BundlePattern;
use crate::error::RefreshError;
use crate::infrastructure::QuayClient;
use crate::services::{RefreshReport, RefreshService};
use crate::ui;

/// Execute a refresh run
///
/// Only an unreadable or unwritable pipeline file (or an unusable registry
/// prefix) fails the run. Lookup failures are reported and skipped.
pub async fn execute(config: RefreshConfig) -> Result<RefreshReport> {
    let path = config.file.display().to_string();
    ui::print_header(&format!("Refreshing task bundles in {}", path));

    let content = tokio::fs::read_to_string(&config.file)
        .await
        .map_err(|source| RefreshError::Read {
            path: path.clone(),
            source,
        })?;

    let prefix = config.registry.reference_prefix();
    info!("📦 Registry: {}", prefix);

    let pattern = BundlePattern::new(&prefix)?;
    let client = QuayClient::new(config.registry)?;
    let outcome = RefreshService::new(pattern, client).refresh(&content).await;

    if let Some(warning) = unresolved_warning(&outcome.report) {
        ui::print_warning(&warning);
    }
    for change in &outcome.report.changes {
        ui::print_change(change);
    }

    if config.dry_run {
        ui::print_info(&format!(
            "Dry run: {} reference(s) would change, {} of {} bundle(s) resolved; {} not written",
            outcome.report.changes.len(),
            outcome.report.resolved.len(),
            outcome.report.total(),
            path
        ));
        return Ok(outcome.report);
    }

    if outcome.is_changed() {
        tokio::fs::write(&config.file, &outcome.content)
            .await
            .map_err(|source| RefreshError::Write {
                path: path.clone(),
                source,
            })?;
        info!("💾 Wrote {}", path);
    } else {
        info!("All resolved digests already current; {} left untouched", path);
    }

    ui::print_success("SHA256 values updated successfully!");
    Ok(outcome.report)
}

/// Summary line naming every bundle left on its old digest
fn unresolved_warning(report: &RefreshReport) -> Option<String> {
    if report.unresolved.is_empty() {
        return None;
    }
    let keys: Vec<String> = report.unresolved.iter().map(ToString::to_string).collect();
    Some(format!(
        "Could not fetch SHA for {} of {} bundle(s): {}",
        keys.len(),
        report.total(),
        keys.join(", ")
    ))
}
