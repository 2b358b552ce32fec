//! The four reference tables the resolution cascade reads. Every table
//! keeps names in the order their rows first appeared.

mod builders;
mod defaults;

pub use builders::{
    build_exercise_intensities, build_precise_items, build_type_macros, build_unit_conversions,
};

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::models::Macros;

/// Category name used when a unit-conversion row omits its type.
pub const UNCATEGORIZED: &str = "其他";

/// Exact nutrient profile per (item, unit).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PreciseTable(IndexMap<String, IndexMap<String, Macros>>);

impl PreciseTable {
    pub fn insert(&mut self, item: impl Into<String>, unit: impl Into<String>, per_unit: Macros) {
        self.0
            .entry(item.into())
            .or_default()
            .insert(unit.into(), per_unit);
    }

    pub fn get(&self, item: &str, unit: &str) -> Option<&Macros> {
        self.0.get(item).and_then(|units| units.get(unit))
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.0.contains_key(item)
    }

    /// Units defined for `item`, in insertion order.
    pub fn units(&self, item: &str) -> Vec<&str> {
        self.0
            .get(item)
            .map(|units| units.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of (item, unit) entries.
    pub fn len(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named unit of one item expressed as servings of a macro category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitConversion {
    pub unit: String,
    pub servings_per_unit: f64,
    pub type_category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UnitConversionTable(IndexMap<String, Vec<UnitConversion>>);

impl UnitConversionTable {
    /// Inserts a conversion, replacing an existing row for the same
    /// (item, unit) in place.
    pub fn insert(&mut self, item: impl Into<String>, conversion: UnitConversion) {
        let rows = self.0.entry(item.into()).or_default();
        match rows.iter_mut().find(|r| r.unit == conversion.unit) {
            Some(existing) => *existing = conversion,
            None => rows.push(conversion),
        }
    }

    pub fn get(&self, item: &str, unit: &str) -> Option<&UnitConversion> {
        self.0
            .get(item)
            .and_then(|rows| rows.iter().find(|r| r.unit == unit))
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.0.contains_key(item)
    }

    /// Units defined for `item`, in row order.
    pub fn units(&self, item: &str) -> Vec<&str> {
        self.0
            .get(item)
            .map(|rows| rows.iter().map(|r| r.unit.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-serving profile for each food category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TypeMacroTable(IndexMap<String, Macros>);

impl TypeMacroTable {
    pub fn insert(&mut self, category: impl Into<String>, per_serving: Macros) {
        self.0.insert(category.into(), per_serving);
    }

    pub fn get(&self, category: &str) -> Option<&Macros> {
        self.0.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// MET value per exercise name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExerciseTable(IndexMap<String, f64>);

impl ExerciseTable {
    pub fn insert(&mut self, name: impl Into<String>, met: f64) {
        self.0.insert(name.into(), met);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One complete generation of reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferenceTables {
    pub precise: PreciseTable,
    pub unit_conversions: UnitConversionTable,
    pub type_macros: TypeMacroTable,
    pub exercises: ExerciseTable,
}
