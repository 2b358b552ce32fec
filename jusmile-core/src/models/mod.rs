mod combo;
mod day;
mod entry;
mod macros;
mod meal;
mod settings;

pub use combo::{ComboItem, MealCombo};
pub use day::{BodyMetrics, DateKey, DayData, Totals};
pub use entry::{exercise_energy, LoggedExerciseEntry, LoggedFoodEntry};
pub use macros::{round1, Macros};
pub use meal::Meal;
pub use settings::{GoalProgress, Settings};
