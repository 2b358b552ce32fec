use clap::{Args, Subcommand};
use jusmile_core::{ResourceKind, ResourceSources};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("base_url: {}", config.base_url.value);
                        println!("  source: {}", config.base_url.source);
                        println!();

                        println!("auto_sync: {}", config.auto_sync.value);
                        println!("  source: {}", config.auto_sync.source);
                        println!();

                        let sources =
                            ResourceSources::new(config.base_url.value.clone(), config.sources.clone());
                        println!("sources:");
                        for kind in ResourceKind::ALL {
                            let marker = if config.sources.get(kind).is_some() {
                                ""
                            } else {
                                " (default)"
                            };
                            println!("  {}: {}{}", kind, sources.url(kind), marker);
                        }
                        println!("  version: {}", sources.version_url());
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'jusmile config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let default_config = r#"# jusmile configuration

# Where synced tables, the offline cache and day logs live
# (default: ~/.local/share/jusmile)
# data_dir: ~/.local/share/jusmile

# Base URL the reference resources are resolved against
base_url: http://localhost:5173/ju-smile-calorie-app/

# Check for new reference data before commands that read it
auto_sync: false

# Per-resource overrides: an absolute URL, a path starting with ./ or /
# (relative to base_url), or a bare filename under {base_url}data/
# sources:
#   precise_items: Food_DB.csv
#   unit_conversions: Unit_Map.csv
#   type_macros: Type_Table.csv
#   exercise_intensities: Exercise_Met.csv
#   version: version.json
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
