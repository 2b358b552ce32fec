use clap::{Args, Subcommand};
use jusmile_core::models::round1;
use jusmile_core::{DateKey, DayData, DayLogStore, LoggedFoodEntry, Meal, MealCombo};

use crate::context::Context;

#[derive(Args)]
pub struct ComboCommand {
    #[command(subcommand)]
    pub command: ComboSubcommand,
}

#[derive(Subcommand)]
pub enum ComboSubcommand {
    /// Save food lines from one meal as a named combo
    Save {
        /// Combo name
        name: String,

        /// Meal the lines are taken from
        #[arg(long, short)]
        meal: Meal,

        /// Food indexes as shown by `day show`, comma separated
        #[arg(long, short, value_delimiter = ',', required = true)]
        items: Vec<usize>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },

    /// List saved combos
    List,

    /// Add every line of a saved combo to a meal
    Add {
        /// Combo name
        name: String,

        /// Meal to add the lines to
        #[arg(long, short)]
        meal: Meal,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<DateKey>,
    },
}

impl ComboCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ComboSubcommand::Save {
                name,
                meal,
                items,
                date,
            } => {
                let key = date.unwrap_or_else(DateKey::today);
                let day = ctx.days.load_day(key);
                let picked = pick_items(&day, *meal, items)?;
                let combo = MealCombo::new(name.as_str(), picked)
                    .ok_or("Combo name must not be empty")?;
                let count = combo.items.len();
                ctx.combos.add(combo)?;

                println!("Saved combo '{}' ({} items)", name.trim(), count);
                Ok(())
            }
            ComboSubcommand::List => {
                let combos = ctx.combos.load();
                if combos.is_empty() {
                    println!("No saved combos");
                    return Ok(());
                }
                for combo in &combos {
                    println!("{} - {} kcal", combo.name, combo.energy());
                    for item in &combo.items {
                        println!(
                            "  {} × {} servings - {} kcal",
                            item.name,
                            round1(item.servings),
                            item.energy
                        );
                    }
                }
                Ok(())
            }
            ComboSubcommand::Add { name, meal, date } => {
                let combo = ctx
                    .combos
                    .find(name)
                    .ok_or_else(|| format!("No saved combo named '{}'", name))?;
                let key = date.unwrap_or_else(DateKey::today);
                let mut day = ctx.days.load_day(key);
                let added = replay(&mut day, &combo, *meal);
                ctx.days.save_day(key, &day)?;

                println!(
                    "Added combo '{}' to {} {} ({} items)",
                    combo.name,
                    key,
                    meal.label(),
                    added
                );
                Ok(())
            }
        }
    }
}

/// Lines of `meal` selected by their day-log index, in log order. Every
/// index must name a line of that meal.
fn pick_items<'a>(
    day: &'a DayData,
    meal: Meal,
    indexes: &[usize],
) -> Result<Vec<&'a LoggedFoodEntry>, String> {
    let lines = day.foods_for(meal);
    if let Some(missing) = indexes
        .iter()
        .find(|i| !lines.iter().any(|(index, _)| index == *i))
    {
        return Err(format!("No {} food entry #{}", meal.label(), missing));
    }
    Ok(lines
        .into_iter()
        .filter(|(index, _)| indexes.contains(index))
        .map(|(_, entry)| entry)
        .collect())
}

fn replay(day: &mut DayData, combo: &MealCombo, meal: Meal) -> usize {
    let entries = combo.entries(meal);
    let count = entries.len();
    for entry in entries {
        day.add_food(entry);
    }
    count
}
