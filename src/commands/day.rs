use clap::{Args, Subcommand};
use jusmile_core::{DateKey, DayData, DayLogStore, GoalProgress, Meal, Settings, Totals};
use serde::Serialize;

use super::OutputFormat;
use crate::context::Context;

#[derive(Args)]
pub struct DayCommand {
    #[command(subcommand)]
    pub command: DaySubcommand,
}

#[derive(Subcommand)]
pub enum DaySubcommand {
    /// Show a day's log with totals and goal progress
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct DayView<'a> {
    date: DateKey,
    #[serde(flatten)]
    day: &'a DayData,
    totals: Totals,
}

impl DayCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DaySubcommand::Show { date, format } => {
                let key = date.unwrap_or_else(DateKey::today);
                let day = ctx.days.load_day(key);
                let totals = day.totals();

                match format {
                    OutputFormat::Json => {
                        let view = DayView {
                            date: key,
                            day: &day,
                            totals,
                        };
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    }
                    OutputFormat::Text => {
                        print_day(key, &day, &totals, &ctx.settings.load());
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_day(key: DateKey, day: &DayData, totals: &Totals, settings: &Settings) {
    println!("{}", key);
    println!("==========");

    for meal in Meal::ALL {
        let foods = day.foods_for(meal);
        if foods.is_empty() {
            continue;
        }
        println!();
        println!("{}:", meal.label());
        for (index, food) in foods {
            println!("  [{}] {}", index, food);
        }
    }

    if !day.exercises.is_empty() {
        println!();
        println!("運動:");
        for (index, exercise) in day.exercises.iter().enumerate() {
            println!("  [{}] {}", index, exercise);
        }
    }

    println!();
    println!(
        "Intake {} kcal - exercise {} kcal = net {} kcal",
        totals.energy, totals.exercise_energy, totals.net_energy
    );
    if let Some(weight) = day.body.weight_kg {
        println!("Weight {} kg", weight);
    }

    println!();
    for (label, value, goal, unit) in [
        ("Energy", totals.net_energy, settings.energy_goal, "kcal"),
        ("Protein", totals.protein, settings.protein_goal, "g"),
        ("Water", totals.water_ml, settings.water_goal, "ml"),
        ("Activity", totals.activity_minutes, settings.activity_goal, "min"),
    ] {
        let progress = GoalProgress::new(value, goal);
        println!(
            "{:<9} {:>6} / {:<6} {:<4} {:>3.0}%",
            label,
            value,
            goal,
            unit,
            progress.percent()
        );
    }
}
