use clap::{Args, Subcommand};
use jusmile_core::resolve::resolve_exercise;
use jusmile_core::{DateKey, DayLogStore};

use crate::context::Context;

/// Body weight used for exercise energy when none has been recorded.
const DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Add an exercise to a day's log
    Add {
        /// Exercise name (looked up in the MET table unless --met is given)
        name: String,

        /// Duration in minutes
        #[arg(long)]
        minutes: f64,

        /// MET value, overriding the table
        #[arg(long)]
        met: Option<f64>,

        /// Body weight in kg, defaults to the day's recorded weight
        #[arg(long)]
        weight: Option<f64>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },

    /// Remove an exercise by its index in `day show`
    Remove {
        index: usize,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },
}

impl ExerciseCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExerciseSubcommand::Add {
                name,
                minutes,
                met,
                weight,
                date,
            } => {
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                let weight = weight
                    .or(day.body.weight_kg)
                    .or(ctx.settings.load().weight_start_kg)
                    .unwrap_or(DEFAULT_WEIGHT_KG);

                let snapshot = ctx.store.snapshot();
                let entry = resolve_exercise(&snapshot.tables, name, *minutes, weight, *met)
                    .ok_or_else(|| {
                        if met.is_none() && snapshot.tables.exercises.get(name).is_none() {
                            format!("Unknown exercise '{}'. Pass --met to log it anyway", name)
                        } else {
                            "Minutes, MET and weight must all be positive".to_string()
                        }
                    })?;

                day.add_exercise(entry.clone());
                ctx.days.save_day(key, &day)?;
                println!("Added to {}: {}", key, entry);
                Ok(())
            }
            ExerciseSubcommand::Remove { index, date } => {
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                let removed = day
                    .remove_exercise(*index)
                    .ok_or_else(|| format!("No exercise entry #{} on {}", index, key))?;
                ctx.days.save_day(key, &day)?;
                println!("Removed from {}: {}", key, removed);
                Ok(())
            }
        }
    }
}
