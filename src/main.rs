use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auto_sync;
mod commands;
mod config;
mod context;

use auto_sync::try_auto_sync;
use commands::{
    ComboCommand, ConfigCommand, DayCommand, ExerciseCommand, FoodCommand, GoalsCommand, ResolveCommand,
    SuggestCommand, SyncCommand, WaterCommand, WeightCommand,
};
use config::Config;
use context::Context;

#[derive(Parser)]
#[command(name = "jusmile")]
#[command(version)]
#[command(about = "A nutrition and exercise logging CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync reference tables from the data host
    Sync(SyncCommand),

    /// Price a food entry without logging it
    Resolve(ResolveCommand),

    /// Log or remove foods
    Food(FoodCommand),

    /// Save and replay meal combos
    Combo(ComboCommand),

    /// Log or remove exercises
    Exercise(ExerciseCommand),

    /// Log water intake
    Water(WaterCommand),

    /// Record body weight
    Weight(WeightCommand),

    /// Show a day's log
    Day(DayCommand),

    /// Autocomplete food and exercise names
    Suggest(SuggestCommand),

    /// Show or change daily goals
    Goals(GoalsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jusmile=info,jusmile_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let ctx = Context::open(config)?;
    match command {
        Commands::Sync(cmd) => cmd.run(&ctx).await?,
        Commands::Resolve(cmd) => {
            try_auto_sync(&ctx).await;
            cmd.run(&ctx)?;
        }
        Commands::Food(cmd) => {
            try_auto_sync(&ctx).await;
            cmd.run(&ctx)?;
        }
        Commands::Exercise(cmd) => {
            try_auto_sync(&ctx).await;
            cmd.run(&ctx)?;
        }
        Commands::Suggest(cmd) => {
            try_auto_sync(&ctx).await;
            cmd.run(&ctx)?;
        }
        Commands::Combo(cmd) => cmd.run(&ctx)?,
        Commands::Water(cmd) => cmd.run(&ctx)?,
        Commands::Weight(cmd) => cmd.run(&ctx)?,
        Commands::Day(cmd) => cmd.run(&ctx)?,
        Commands::Goals(cmd) => cmd.run(&ctx)?,
        Commands::Config(_) => {}
    }

    Ok(())
}
