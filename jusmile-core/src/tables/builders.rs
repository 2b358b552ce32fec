//! Row-to-table builders. Building is total: bad numbers become zero, rows
//! without their key columns are skipped, and empty input gives an empty
//! table.

use super::{
    ExerciseTable, PreciseTable, TypeMacroTable, UnitConversion, UnitConversionTable,
    UNCATEGORIZED,
};
use crate::models::Macros;
use crate::tabular::Row;

const ITEM: &[&str] = &["food", "name", "item"];
const UNIT: &[&str] = &["unit"];
const CATEGORY: &[&str] = &["type", "category"];
const ENERGY: &[&str] = &["kcal", "calories", "energy"];
const PROTEIN: &[&str] = &["protein"];
const CARB: &[&str] = &["carb", "carbs", "carbohydrate"];
const FAT: &[&str] = &["fat"];
const SERVINGS_PER_UNIT: &[&str] = &["perUnitServings", "servings_per_unit", "servings"];
const EXERCISE: &[&str] = &["name", "活動", "activity", "exercise"];
const MET: &[&str] = &["met", "met_value", "value"];

/// Category every seed table is expected to define.
const EXPECTED_CATEGORY: &str = "全穀雜糧類";

fn key(row: &Row, aliases: &[&str]) -> Option<String> {
    row.get_any(aliases)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number(row: &Row, aliases: &[&str]) -> f64 {
    parse_number(row.get_any(aliases))
}

fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn macros(row: &Row) -> Macros {
    Macros::new(
        number(row, ENERGY),
        number(row, PROTEIN),
        number(row, CARB),
        number(row, FAT),
    )
}

pub fn build_precise_items(rows: &[Row]) -> PreciseTable {
    let mut table = PreciseTable::default();
    let mut skipped = 0;
    for row in rows {
        match (key(row, ITEM), key(row, UNIT)) {
            (Some(item), Some(unit)) => table.insert(item, unit, macros(row)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped precise item rows without food/unit");
    }
    table
}

pub fn build_unit_conversions(rows: &[Row]) -> UnitConversionTable {
    let mut table = UnitConversionTable::default();
    let mut skipped = 0;
    for row in rows {
        let (Some(item), Some(unit)) = (key(row, ITEM), key(row, UNIT)) else {
            skipped += 1;
            continue;
        };
        let servings_per_unit = number(row, SERVINGS_PER_UNIT);
        if servings_per_unit <= 0.0 {
            skipped += 1;
            continue;
        }
        let type_category = key(row, CATEGORY).unwrap_or_else(|| UNCATEGORIZED.to_string());
        table.insert(
            item,
            UnitConversion {
                unit,
                servings_per_unit,
                type_category,
            },
        );
    }
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped unit conversion rows");
    }
    table
}

pub fn build_type_macros(rows: &[Row]) -> TypeMacroTable {
    let mut table = TypeMacroTable::default();
    for row in rows {
        if let Some(category) = key(row, CATEGORY) {
            table.insert(category, macros(row));
        }
    }
    if !table.is_empty() && table.get(EXPECTED_CATEGORY).is_none() {
        tracing::warn!("Type table has no '{}' category", EXPECTED_CATEGORY);
    }
    table
}

pub fn build_exercise_intensities(rows: &[Row]) -> ExerciseTable {
    let mut table = ExerciseTable::default();
    for row in rows {
        let Some(name) = key(row, EXERCISE) else {
            continue;
        };
        let met = row
            .get_any(MET)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|m| m.is_finite() && *m > 0.0);
        if let Some(met) = met {
            table.insert(name, met);
        }
    }
    table
}
