use clap::{Args, Subcommand};
use jusmile_core::{DateKey, DayLogStore};

use crate::context::Context;

#[derive(Args)]
pub struct WaterCommand {
    #[command(subcommand)]
    pub command: WaterSubcommand,
}

#[derive(Subcommand)]
pub enum WaterSubcommand {
    /// Add water intake in ml
    Add {
        ml: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },
}

impl WaterCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WaterSubcommand::Add { ml, date } => {
                if !(*ml > 0.0) {
                    return Err("Water amount must be positive".into());
                }
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                day.add_water(*ml);
                ctx.days.save_day(key, &day)?;

                let goal = ctx.settings.load().water_goal;
                println!("Water on {}: {} / {} ml", key, day.water_ml, goal);
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct WeightCommand {
    #[command(subcommand)]
    pub command: WeightSubcommand,
}

#[derive(Subcommand)]
pub enum WeightSubcommand {
    /// Record body weight in kg
    Set {
        kg: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },
}

impl WeightCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WeightSubcommand::Set { kg, date } => {
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                if !day.set_weight(*kg) {
                    return Err("Weight must be positive".into());
                }
                ctx.days.save_day(key, &day)?;

                println!("Weight on {}: {} kg", key, kg);
                if let Some(target) = ctx.settings.load().weight_target_kg {
                    println!("Target: {} kg ({:+.1} kg to go)", target, target - kg);
                }
                Ok(())
            }
        }
    }
}
