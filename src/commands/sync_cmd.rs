//! Sync CLI commands for refreshing the reference tables.

use chrono::{DateTime, Local, Utc};
use clap::{Args, Subcommand};
use jusmile_core::{ResourceKind, SyncOutcome, SyncReport};

use crate::context::Context;

/// Sync reference data from the data host
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Sync even if the data version has not changed, bypassing the cache
    #[arg(long)]
    force: bool,

    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Debug, Subcommand)]
enum SyncSubcommand {
    /// Show sync state and the remote data version
    Status,

    /// Forget synced data and the offline cache, returning to built-in tables
    Reset,
}

impl SyncCommand {
    pub async fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            None => self.sync(ctx).await,
            Some(SyncSubcommand::Status) => self.status(ctx).await,
            Some(SyncSubcommand::Reset) => self.reset(ctx),
        }
    }

    async fn sync(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        let coordinator = ctx.coordinator()?;
        println!("Syncing from {}...", ctx.sources().base());
        println!();

        if self.force {
            let report = coordinator.manual_sync().await?;
            print_report(&report);
            return Ok(());
        }

        match coordinator.check_and_sync().await? {
            SyncOutcome::UpToDate(version) => {
                println!(
                    "Already up to date ({}).",
                    version.as_deref().unwrap_or("unversioned")
                );
            }
            SyncOutcome::Synced(report) => print_report(&report),
        }
        Ok(())
    }

    async fn status(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        let coordinator = ctx.coordinator()?;
        let sources = ctx.sources();

        println!("Sync Status");
        println!("===========");
        println!();
        println!("Phase:        {}", coordinator.phase());
        match coordinator.sync_state() {
            Some(state) => {
                println!("Last synced:  {}", local_time(state.last_synced_at));
                println!(
                    "Data version: {}",
                    state.data_version.as_deref().unwrap_or("(none)")
                );
            }
            None => println!("Last synced:  never (using built-in tables)"),
        }
        println!("Cache:        {}", ctx.cache.active_generation());
        println!();

        println!("Sources:");
        for kind in ResourceKind::ALL {
            println!("  {:<22} {}", kind.name(), sources.url(kind));
        }
        println!("  {:<22} {}", "version", sources.version_url());
        println!();

        print!("Remote version: ");
        match coordinator.remote_version().await {
            Some(marker) => println!(
                "{} (app {})",
                marker.data_version,
                if marker.app_version.is_empty() {
                    "?"
                } else {
                    marker.app_version.as_str()
                }
            ),
            None => println!("unavailable"),
        }
        Ok(())
    }

    fn reset(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        ctx.store.reset()?;
        ctx.cache.clear()?;
        println!("Cleared synced reference data and offline cache.");
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    let counts = [
        ("precise_items", report.precise_items),
        ("unit_conversions", report.unit_conversions),
        ("type_macros", report.type_macros),
        ("exercise_intensities", report.exercise_intensities),
    ];
    for (name, count) in counts {
        println!("  ✓ {} ({} rows)", name, count);
    }
    println!();
    println!(
        "Synced data version {} at {}.",
        report.data_version.as_deref().unwrap_or("(none)"),
        local_time(report.synced_at)
    );
    if report.coalesced {
        println!("(Joined a sync that was already running.)");
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
