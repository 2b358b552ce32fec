mod body;
mod combo;
mod config_cmd;
mod day;
mod exercise;
mod food;
mod goals;
mod resolve_cmd;
mod suggest_cmd;
mod sync_cmd;

use clap::ValueEnum;

pub use body::{WaterCommand, WeightCommand};
pub use combo::ComboCommand;
pub use config_cmd::ConfigCommand;
pub use day::DayCommand;
pub use exercise::ExerciseCommand;
pub use food::FoodCommand;
pub use goals::GoalsCommand;
pub use resolve_cmd::ResolveCommand;
pub use suggest_cmd::SuggestCommand;
pub use sync_cmd::SyncCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
