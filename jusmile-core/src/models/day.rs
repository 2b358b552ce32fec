use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entry::{LoggedExerciseEntry, LoggedFoodEntry};
use super::meal::Meal;

/// Calendar day a log belongs to.
///
/// Stored as a plain `NaiveDate` pinned to UTC midnight semantics: the key is
/// the user's local calendar date, so a daylight-saving shift never moves an
/// entry to a neighbouring day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's local calendar date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Moves by whole days. Saturates at the calendar bounds.
    pub fn shift(&self, days: i64) -> Self {
        Self(self.0.checked_add_signed(Duration::days(days)).unwrap_or(self.0))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

/// Everything logged for one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DayData {
    pub foods: Vec<LoggedFoodEntry>,
    pub water_ml: f64,
    pub exercises: Vec<LoggedExerciseEntry>,
    pub body: BodyMetrics,
}

impl DayData {
    pub fn add_food(&mut self, entry: LoggedFoodEntry) {
        self.foods.push(entry);
    }

    pub fn add_exercise(&mut self, entry: LoggedExerciseEntry) {
        self.exercises.push(entry);
    }

    /// Adds water; non-positive amounts are ignored.
    pub fn add_water(&mut self, ml: f64) {
        if ml > 0.0 {
            self.water_ml += ml;
        }
    }

    pub fn set_weight(&mut self, kg: f64) -> bool {
        if kg > 0.0 {
            self.body.weight_kg = Some(kg);
            true
        } else {
            false
        }
    }

    pub fn remove_food(&mut self, index: usize) -> Option<LoggedFoodEntry> {
        (index < self.foods.len()).then(|| self.foods.remove(index))
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<LoggedExerciseEntry> {
        (index < self.exercises.len()).then(|| self.exercises.remove(index))
    }

    /// Food lines for one meal, paired with their index in `foods`.
    pub fn foods_for(&self, meal: Meal) -> Vec<(usize, &LoggedFoodEntry)> {
        self.foods
            .iter()
            .enumerate()
            .filter(|(_, f)| f.meal == meal)
            .collect()
    }

    pub fn totals(&self) -> Totals {
        let energy: f64 = self.foods.iter().map(|f| f.energy).sum();
        let protein: f64 = self.foods.iter().map(|f| f.protein).sum();
        let exercise_energy: f64 = self.exercises.iter().map(|e| e.energy).sum();
        let activity_minutes: f64 = self.exercises.iter().map(|e| e.minutes).sum();
        Totals {
            energy,
            protein: protein.round(),
            exercise_energy,
            net_energy: energy - exercise_energy,
            activity_minutes,
            water_ml: self.water_ml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub energy: f64,
    pub protein: f64,
    pub exercise_energy: f64,
    pub net_energy: f64,
    pub activity_minutes: f64,
    pub water_ml: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, meal: Meal, energy: f64, protein: f64) -> LoggedFoodEntry {
        LoggedFoodEntry {
            name: name.to_string(),
            meal,
            resolved_type: "全穀雜糧類".to_string(),
            servings: 1.0,
            energy,
            protein,
            carb: 0.0,
            fat: 0.0,
        }
    }

    #[test]
    fn test_date_key_parse_and_display() {
        let key: DateKey = "2025-11-12".parse().unwrap();
        assert_eq!(key.to_string(), "2025-11-12");
        assert!("2025/11/12".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_date_key_shift_across_month() {
        let key: DateKey = "2025-03-31".parse().unwrap();
        assert_eq!(key.shift(1).to_string(), "2025-04-01");
        assert_eq!(key.shift(-31).to_string(), "2025-02-28");
    }

    #[test]
    fn test_date_key_shift_across_dst_change() {
        // US DST started 2025-03-09; a calendar key is unaffected.
        let key: DateKey = "2025-03-08".parse().unwrap();
        assert_eq!(key.shift(1).to_string(), "2025-03-09");
        assert_eq!(key.shift(2).to_string(), "2025-03-10");
    }

    #[test]
    fn test_remove_food_by_index() {
        let mut day = DayData::default();
        day.add_food(food("吐司", Meal::Breakfast, 140.0, 4.6));
        day.add_food(food("白飯", Meal::Lunch, 280.0, 8.0));

        let removed = day.remove_food(0).unwrap();
        assert_eq!(removed.name, "吐司");
        assert_eq!(day.foods.len(), 1);
        assert!(day.remove_food(5).is_none());
    }

    #[test]
    fn test_foods_for_meal_keeps_global_index() {
        let mut day = DayData::default();
        day.add_food(food("吐司", Meal::Breakfast, 140.0, 4.6));
        day.add_food(food("白飯", Meal::Lunch, 280.0, 8.0));
        day.add_food(food("雞蛋", Meal::Breakfast, 70.0, 6.3));

        let breakfast = day.foods_for(Meal::Breakfast);
        let indexes: Vec<usize> = breakfast.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, vec![0, 2]);
    }

    #[test]
    fn test_totals() {
        let mut day = DayData::default();
        day.add_food(food("吐司", Meal::Breakfast, 140.0, 4.6));
        day.add_food(food("白飯", Meal::Lunch, 280.0, 8.0));
        day.add_exercise(LoggedExerciseEntry::new("慢跑", 7.0, 30.0, 70.0).unwrap());
        day.add_water(500.0);
        day.add_water(-20.0);

        let totals = day.totals();
        assert_eq!(totals.energy, 420.0);
        assert_eq!(totals.protein, 13.0);
        assert_eq!(totals.exercise_energy, 257.0);
        assert_eq!(totals.net_energy, 163.0);
        assert_eq!(totals.activity_minutes, 30.0);
        assert_eq!(totals.water_ml, 500.0);
    }

    #[test]
    fn test_set_weight_rejects_non_positive() {
        let mut day = DayData::default();
        assert!(!day.set_weight(0.0));
        assert!(day.set_weight(68.5));
        assert_eq!(day.body.weight_kg, Some(68.5));
    }

    #[test]
    fn test_day_json_tolerates_missing_fields() {
        let day: DayData = serde_json::from_str("{\"water_ml\": 250}").unwrap();
        assert!(day.foods.is_empty());
        assert_eq!(day.water_ml, 250.0);
        assert_eq!(day.body.weight_kg, None);
    }
}
