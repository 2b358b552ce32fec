use serde::{Deserialize, Serialize};
use std::fmt;

use super::macros::{round1, Macros};
use super::meal::Meal;
use crate::resolve::LineResult;

/// A priced food line in a day's log. Never edited after creation; the day
/// log removes it by index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggedFoodEntry {
    pub name: String,
    pub meal: Meal,
    pub resolved_type: String,
    pub servings: f64,
    pub energy: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl LoggedFoodEntry {
    pub fn from_line(name: impl Into<String>, meal: Meal, line: &LineResult) -> Self {
        Self {
            name: name.into(),
            meal,
            resolved_type: line.resolved_type.clone(),
            servings: line.servings,
            energy: line.macros.energy,
            protein: line.macros.protein,
            carb: line.macros.carb,
            fat: line.macros.fat,
        }
    }

    pub fn macros(&self) -> Macros {
        Macros::new(self.energy, self.protein, self.carb, self.fat)
    }
}

impl fmt::Display for LoggedFoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            &self.resolved_type
        } else {
            &self.name
        };
        write!(
            f,
            "{} × {} servings - {} kcal",
            name,
            round1(self.servings),
            self.energy
        )
    }
}

/// Energy burned: MET × 3.5 × kg ÷ 200 × minutes, rounded to whole kcal.
pub fn exercise_energy(met: f64, weight_kg: f64, minutes: f64) -> f64 {
    (met * 3.5 * weight_kg / 200.0 * minutes).round()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggedExerciseEntry {
    pub name: String,
    pub met: f64,
    pub minutes: f64,
    pub weight_kg: f64,
    pub energy: f64,
}

impl LoggedExerciseEntry {
    /// Returns `None` unless name, MET, minutes and weight are all usable.
    pub fn new(name: impl Into<String>, met: f64, minutes: f64, weight_kg: f64) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() || !(met > 0.0) || !(minutes > 0.0) || !(weight_kg > 0.0) {
            return None;
        }
        Some(Self {
            energy: exercise_energy(met, weight_kg, minutes),
            name,
            met,
            minutes,
            weight_kg,
        })
    }
}

impl fmt::Display for LoggedExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {} min - {} kcal", self.name, self.minutes, self.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolutionSource;

    #[test]
    fn test_exercise_energy() {
        // 7.0 MET, 70 kg, 30 min → 7 * 3.5 * 70 / 200 * 30 = 257.25
        assert_eq!(exercise_energy(7.0, 70.0, 30.0), 257.0);
        assert_eq!(exercise_energy(0.0, 70.0, 30.0), 0.0);
    }

    #[test]
    fn test_exercise_entry_requires_positive_inputs() {
        assert!(LoggedExerciseEntry::new("慢跑", 7.0, 30.0, 70.0).is_some());
        assert!(LoggedExerciseEntry::new("", 7.0, 30.0, 70.0).is_none());
        assert!(LoggedExerciseEntry::new("慢跑", 0.0, 30.0, 70.0).is_none());
        assert!(LoggedExerciseEntry::new("慢跑", 7.0, -1.0, 70.0).is_none());
        assert!(LoggedExerciseEntry::new("慢跑", 7.0, 30.0, f64::NAN).is_none());
    }

    #[test]
    fn test_food_entry_from_line() {
        let line = LineResult {
            source: ResolutionSource::UnitConversion,
            resolved_type: "全穀雜糧類".to_string(),
            servings: 4.0,
            macros: Macros::new(280.0, 8.0, 60.0, 2.0),
        };
        let entry = LoggedFoodEntry::from_line("白飯", Meal::Lunch, &line);
        assert_eq!(entry.name, "白飯");
        assert_eq!(entry.meal, Meal::Lunch);
        assert_eq!(entry.resolved_type, "全穀雜糧類");
        assert_eq!(entry.energy, 280.0);
        assert_eq!(entry.macros(), line.macros);
    }

    #[test]
    fn test_food_entry_display_falls_back_to_type() {
        let entry = LoggedFoodEntry {
            name: String::new(),
            meal: Meal::Snack,
            resolved_type: "水果類".to_string(),
            servings: 1.25,
            energy: 75.0,
            protein: 0.6,
            carb: 18.8,
            fat: 0.0,
        };
        assert_eq!(format!("{}", entry), "水果類 × 1.3 servings - 75 kcal");
    }
}
