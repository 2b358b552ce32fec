use clap::{Args, Subcommand};
use jusmile_core::{resolve, DateKey, DayLogStore, LoggedFoodEntry, Meal, Resolution};

use super::resolve_cmd::{describe_unpriced, PricingArgs};
use crate::context::Context;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Price a food and add it to a day's log
    Add {
        /// Food name
        name: String,

        /// Quantity in the given unit
        quantity: f64,

        /// Meal (breakfast, lunch, dinner, snack, late_night or 早餐/午餐/晚餐/點心/宵夜)
        #[arg(long, short)]
        meal: Meal,

        #[command(flatten)]
        pricing: PricingArgs,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },

    /// Remove a food line by its index in `day show`
    Remove {
        index: usize,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },
}

impl FoodCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Add {
                name,
                quantity,
                meal,
                pricing,
                date,
            } => {
                let key = date.unwrap_or_else(DateKey::today);
                let snapshot = ctx.store.snapshot();
                let line = match resolve(&pricing.query(name, *quantity), &snapshot.tables) {
                    Resolution::Matched(line) => line,
                    unpriced => {
                        return Err(describe_unpriced(&unpriced, &snapshot.tables, name).into());
                    }
                };

                let entry = LoggedFoodEntry::from_line(name.clone(), *meal, &line);
                let mut day = ctx.days.load_day(key);
                day.add_food(entry.clone());
                ctx.days.save_day(key, &day)?;

                println!("Added to {} {}: {}", key, meal.label(), entry);
                Ok(())
            }
            FoodSubcommand::Remove { index, date } => {
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                let removed = day
                    .remove_food(*index)
                    .ok_or_else(|| format!("No food entry #{} on {}", index, key))?;
                ctx.days.save_day(key, &day)?;

                println!("Removed from {}: {}", key, removed);
                Ok(())
            }
        }
    }
}
