use clap::{Args, Subcommand};

use crate::context::Context;

#[derive(Args)]
pub struct GoalsCommand {
    #[command(subcommand)]
    pub command: GoalsSubcommand,
}

#[derive(Subcommand)]
pub enum GoalsSubcommand {
    /// Show daily goals
    Show,

    /// Update daily goals; omitted values are kept
    Set {
        /// Energy goal in kcal
        #[arg(long)]
        energy: Option<f64>,

        /// Protein goal in g
        #[arg(long)]
        protein: Option<f64>,

        /// Water goal in ml
        #[arg(long)]
        water: Option<f64>,

        /// Activity goal in minutes
        #[arg(long)]
        activity: Option<f64>,

        /// Target body weight in kg
        #[arg(long)]
        weight_target: Option<f64>,

        /// Target date for the weight goal (YYYY-MM-DD)
        #[arg(long)]
        weight_target_date: Option<String>,

        /// Starting body weight in kg
        #[arg(long)]
        weight_start: Option<f64>,
    },
}

impl GoalsCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        let mut settings = ctx.settings.load();

        if let GoalsSubcommand::Set {
            energy,
            protein,
            water,
            activity,
            weight_target,
            weight_target_date,
            weight_start,
        } = &self.command
        {
            for (slot, value) in [
                (&mut settings.energy_goal, energy),
                (&mut settings.protein_goal, protein),
                (&mut settings.water_goal, water),
                (&mut settings.activity_goal, activity),
            ] {
                if let Some(value) = value {
                    if !(*value > 0.0) {
                        return Err("Goals must be positive".into());
                    }
                    *slot = *value;
                }
            }
            if weight_target.is_some() {
                settings.weight_target_kg = *weight_target;
            }
            if weight_target_date.is_some() {
                settings.weight_target_date = weight_target_date.clone();
            }
            if weight_start.is_some() {
                settings.weight_start_kg = *weight_start;
            }
            ctx.settings.save(&settings)?;
        }

        println!("Energy:   {} kcal", settings.energy_goal);
        println!("Protein:  {} g", settings.protein_goal);
        println!("Water:    {} ml", settings.water_goal);
        println!("Activity: {} min", settings.activity_goal);
        if let Some(target) = settings.weight_target_kg {
            let by = settings
                .weight_target_date
                .as_deref()
                .map(|d| format!(" by {}", d))
                .unwrap_or_default();
            println!("Weight:   {} kg{}", target, by);
        }
        Ok(())
    }
}
