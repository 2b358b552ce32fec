use clap::{Args, Subcommand};
use jusmile_core::resolve::{suggest_exercises, suggest_foods, unit_options};

use crate::context::Context;

#[derive(Args)]
pub struct SuggestCommand {
    #[command(subcommand)]
    pub command: SuggestSubcommand,
}

#[derive(Subcommand)]
pub enum SuggestSubcommand {
    /// Suggest food names from the reference tables
    Food {
        /// Partial name; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },

    /// Suggest exercises with their MET values
    Exercise {
        /// Partial name; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },
}

impl SuggestCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = ctx.store.snapshot();
        let tables = &snapshot.tables;

        match &self.command {
            SuggestSubcommand::Food { query } => {
                let names = suggest_foods(tables, query);
                if names.is_empty() {
                    println!("No foods match '{}'.", query);
                }
                for name in names {
                    let kind = if tables.precise.contains_item(name) {
                        "精準"
                    } else {
                        "單位換算"
                    };
                    println!(
                        "{}  [{}]  {}",
                        name,
                        kind,
                        unit_options(tables, name).join("/")
                    );
                }
            }
            SuggestSubcommand::Exercise { query } => {
                let exercises = suggest_exercises(tables, query);
                if exercises.is_empty() {
                    println!("No exercises match '{}'.", query);
                }
                for (name, met) in exercises {
                    println!("{}  MET {}", name, met);
                }
            }
        }
        Ok(())
    }
}
