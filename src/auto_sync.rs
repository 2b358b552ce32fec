//! Auto-sync for CLI commands.
//!
//! Checks for new reference data before commands that read the tables when
//! `auto_sync` is enabled in the configuration.

use jusmile_core::SyncOutcome;

use crate::context::Context;

/// Runs a version check and, if needed, a full sync.
///
/// Failures are reported and otherwise ignored: the CLI keeps working
/// against the tables it already has when the data host is unreachable.
pub async fn try_auto_sync(ctx: &Context) {
    if !ctx.config.auto_sync.value {
        return;
    }

    let coordinator = match ctx.coordinator() {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Auto-sync unavailable: {}", e);
            return;
        }
    };

    match coordinator.check_and_sync().await {
        Ok(SyncOutcome::UpToDate(_)) => {}
        Ok(SyncOutcome::Synced(report)) => {
            eprintln!(
                "Auto-sync: reference data updated ({})",
                report.data_version.as_deref().unwrap_or("unversioned")
            );
        }
        Err(e) => {
            eprintln!("Auto-sync: {}", e);
        }
    }
}
