use serde::{Deserialize, Serialize};

use super::entry::LoggedFoodEntry;
use super::meal::Meal;

/// A priced food line saved without its meal, so it can be replayed into any
/// meal later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboItem {
    pub name: String,
    pub resolved_type: String,
    pub servings: f64,
    pub energy: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl ComboItem {
    pub fn to_entry(&self, meal: Meal) -> LoggedFoodEntry {
        LoggedFoodEntry {
            name: self.name.clone(),
            meal,
            resolved_type: self.resolved_type.clone(),
            servings: self.servings,
            energy: self.energy,
            protein: self.protein,
            carb: self.carb,
            fat: self.fat,
        }
    }
}

impl From<&LoggedFoodEntry> for ComboItem {
    fn from(entry: &LoggedFoodEntry) -> Self {
        Self {
            name: entry.name.clone(),
            resolved_type: entry.resolved_type.clone(),
            servings: entry.servings,
            energy: entry.energy,
            protein: entry.protein,
            carb: entry.carb,
            fat: entry.fat,
        }
    }
}

/// A named set of food lines the user logs together often.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealCombo {
    pub name: String,
    pub items: Vec<ComboItem>,
}

impl MealCombo {
    /// Returns `None` for a blank name or an empty selection.
    pub fn new<'a>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = &'a LoggedFoodEntry>,
    ) -> Option<Self> {
        let name = name.into().trim().to_string();
        let items: Vec<ComboItem> = entries.into_iter().map(ComboItem::from).collect();
        if name.is_empty() || items.is_empty() {
            return None;
        }
        Some(Self { name, items })
    }

    /// Food lines for `meal`, in saved order.
    pub fn entries(&self, meal: Meal) -> Vec<LoggedFoodEntry> {
        self.items.iter().map(|item| item.to_entry(meal)).collect()
    }

    pub fn energy(&self) -> f64 {
        self.items.iter().map(|item| item.energy).sum()
    }
}
