use serde::Serialize;
use std::fmt;

use crate::models::{LoggedExerciseEntry, Macros};
use crate::tables::ReferenceTables;

/// `resolved_type` recorded for precise matches.
pub const PRECISE_TYPE: &str = "精準";

/// Units offered for a name with no table entry.
pub const UNIT_WHITELIST: [&str; 14] = [
    "g", "ml", "個", "顆", "碗", "片", "湯匙", "茶匙", "張", "粒", "杯", "根", "把", "份",
];

/// Caller-chosen category and serving count, used only when the name has no
/// table entry for the unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback {
    pub type_category: String,
    pub servings: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodQuery {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub fallback: Option<Fallback>,
}

impl FoodQuery {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: None,
            fallback: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_fallback(mut self, type_category: impl Into<String>, servings: f64) -> Self {
        self.fallback = Some(Fallback {
            type_category: type_category.into(),
            servings,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Precise,
    UnitConversion,
    Category,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Precise => write!(f, "precise"),
            ResolutionSource::UnitConversion => write!(f, "unit conversion"),
            ResolutionSource::Category => write!(f, "category"),
        }
    }
}

/// A priced line: energy rounded to whole kcal, macros to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    pub source: ResolutionSource,
    pub resolved_type: String,
    pub servings: f64,
    pub macros: Macros,
}

/// Outcome of resolving a query. Neither `NoMatch` nor `UnknownCategory` is
/// an error; both mean the entry cannot be priced yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Matched(LineResult),
    NoMatch,
    UnknownCategory(String),
}

impl Resolution {
    pub fn line(&self) -> Option<&LineResult> {
        match self {
            Resolution::Matched(line) => Some(line),
            _ => None,
        }
    }
}

/// One step of the cascade. `None` passes the query to the next step;
/// `Some` ends the cascade with that resolution.
pub trait Resolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, query: &FoodQuery, tables: &ReferenceTables) -> Option<Resolution>;
}

/// Exact per-unit profile for (name, unit).
pub struct PreciseResolver;

impl Resolver for PreciseResolver {
    fn name(&self) -> &'static str {
        "precise"
    }

    fn resolve(&self, query: &FoodQuery, tables: &ReferenceTables) -> Option<Resolution> {
        let unit = query.unit.as_deref()?;
        let per_unit = tables.precise.get(&query.name, unit)?;
        Some(Resolution::Matched(LineResult {
            source: ResolutionSource::Precise,
            resolved_type: PRECISE_TYPE.to_string(),
            servings: query.quantity,
            macros: per_unit.scale(query.quantity).rounded(),
        }))
    }
}

/// Converts (name, unit) to servings of a category.
pub struct UnitConversionResolver;

impl Resolver for UnitConversionResolver {
    fn name(&self) -> &'static str {
        "unit_conversion"
    }

    fn resolve(&self, query: &FoodQuery, tables: &ReferenceTables) -> Option<Resolution> {
        let unit = query.unit.as_deref()?;
        let row = tables.unit_conversions.get(&query.name, unit)?;
        let servings = query.quantity * row.servings_per_unit;
        Some(price_category(
            tables,
            &row.type_category,
            servings,
            ResolutionSource::UnitConversion,
        ))
    }
}

/// Prices the caller's explicit fallback category and servings.
pub struct CategoryResolver;

impl Resolver for CategoryResolver {
    fn name(&self) -> &'static str {
        "category"
    }

    fn resolve(&self, query: &FoodQuery, tables: &ReferenceTables) -> Option<Resolution> {
        let fallback = query.fallback.as_ref()?;
        if !(fallback.servings > 0.0) {
            return Some(Resolution::NoMatch);
        }
        Some(price_category(
            tables,
            &fallback.type_category,
            fallback.servings,
            ResolutionSource::Category,
        ))
    }
}

fn price_category(
    tables: &ReferenceTables,
    category: &str,
    servings: f64,
    source: ResolutionSource,
) -> Resolution {
    match tables.type_macros.get(category) {
        Some(per_serving) => Resolution::Matched(LineResult {
            source,
            resolved_type: category.to_string(),
            servings,
            macros: per_serving.scale(servings).rounded(),
        }),
        None => Resolution::UnknownCategory(category.to_string()),
    }
}

/// Ordered resolvers; the first that answers wins.
pub struct Cascade {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PreciseResolver),
            Box::new(UnitConversionResolver),
            Box::new(CategoryResolver),
        ])
    }
}

impl Cascade {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    pub fn resolve(&self, query: &FoodQuery, tables: &ReferenceTables) -> Resolution {
        if !(query.quantity > 0.0) || query.name.trim().is_empty() {
            return Resolution::NoMatch;
        }
        for resolver in &self.resolvers {
            if let Some(resolution) = resolver.resolve(query, tables) {
                tracing::trace!(resolver = resolver.name(), name = %query.name, "Resolved");
                return resolution;
            }
        }
        Resolution::NoMatch
    }
}

/// Resolves with the default precise → unit conversion → category order.
pub fn resolve(query: &FoodQuery, tables: &ReferenceTables) -> Resolution {
    Cascade::default().resolve(query, tables)
}

/// Units worth offering for `name`: its precise units if it has any, else its
/// unit-conversion units, else the generic whitelist.
pub fn unit_options(tables: &ReferenceTables, name: &str) -> Vec<String> {
    let units = if tables.precise.contains_item(name) {
        tables.precise.units(name)
    } else if tables.unit_conversions.contains_item(name) {
        tables.unit_conversions.units(name)
    } else {
        UNIT_WHITELIST.to_vec()
    };
    units.into_iter().map(String::from).collect()
}

/// Prices an exercise. An explicit `met` wins over the table value.
pub fn resolve_exercise(
    tables: &ReferenceTables,
    name: &str,
    minutes: f64,
    weight_kg: f64,
    met: Option<f64>,
) -> Option<LoggedExerciseEntry> {
    let met = met.or_else(|| tables.exercises.get(name))?;
    LoggedExerciseEntry::new(name, met, minutes, weight_kg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::UnitConversion;

    fn grains(tables: &mut ReferenceTables) {
        tables
            .type_macros
            .insert("全穀雜糧類", Macros::new(70.0, 2.0, 15.0, 0.5));
    }

    fn conversion(unit: &str, servings: f64, category: &str) -> UnitConversion {
        UnitConversion {
            unit: unit.to_string(),
            servings_per_unit: servings,
            type_category: category.to_string(),
        }
    }

    #[test]
    fn test_precise_toast_scenario() {
        let mut tables = ReferenceTables::default();
        tables
            .precise
            .insert("吐司", "片", Macros::new(70.0, 2.3, 13.1, 0.9));

        let resolution = resolve(&FoodQuery::new("吐司", 2.0).with_unit("片"), &tables);
        let line = resolution.line().unwrap();
        assert_eq!(line.source, ResolutionSource::Precise);
        assert_eq!(line.resolved_type, PRECISE_TYPE);
        assert_eq!(line.servings, 2.0);
        assert_eq!(line.macros, Macros::new(140.0, 4.6, 26.2, 1.8));
    }

    #[test]
    fn test_unit_conversion_rice_scenario() {
        let mut tables = ReferenceTables::default();
        grains(&mut tables);
        tables
            .unit_conversions
            .insert("白飯", conversion("碗", 4.0, "全穀雜糧類"));

        let resolution = resolve(&FoodQuery::new("白飯", 1.0).with_unit("碗"), &tables);
        let line = resolution.line().unwrap();
        assert_eq!(line.source, ResolutionSource::UnitConversion);
        assert_eq!(line.servings, 4.0);
        assert_eq!(line.resolved_type, "全穀雜糧類");
        assert_eq!(line.macros, Macros::new(280.0, 8.0, 60.0, 2.0));
    }

    #[test]
    fn test_precise_wins_over_unit_conversion() {
        let mut tables = ReferenceTables::default();
        grains(&mut tables);
        tables
            .precise
            .insert("吐司", "片", Macros::new(70.0, 2.3, 13.1, 0.9));
        tables
            .unit_conversions
            .insert("吐司", conversion("片", 2.0, "全穀雜糧類"));

        let resolution = resolve(&FoodQuery::new("吐司", 1.0).with_unit("片"), &tables);
        let line = resolution.line().unwrap();
        assert_eq!(line.source, ResolutionSource::Precise);
        assert_eq!(line.macros.energy, 70.0);
    }

    #[test]
    fn test_precise_item_other_unit_falls_through() {
        let mut tables = ReferenceTables::default();
        grains(&mut tables);
        tables
            .precise
            .insert("吐司", "片", Macros::new(70.0, 2.3, 13.1, 0.9));
        tables
            .unit_conversions
            .insert("吐司", conversion("g", 0.03, "全穀雜糧類"));

        let resolution = resolve(&FoodQuery::new("吐司", 100.0).with_unit("g"), &tables);
        let line = resolution.line().unwrap();
        assert_eq!(line.source, ResolutionSource::UnitConversion);
        assert_eq!(line.macros.energy, 210.0);
    }

    #[test]
    fn test_unit_conversion_unknown_category() {
        let mut tables = ReferenceTables::default();
        tables
            .unit_conversions
            .insert("拿鐵", conversion("杯", 1.5, "乳品類"));

        let resolution = resolve(&FoodQuery::new("拿鐵", 1.0).with_unit("杯"), &tables);
        assert_eq!(resolution, Resolution::UnknownCategory("乳品類".to_string()));
    }

    #[test]
    fn test_category_fallback() {
        let mut tables = ReferenceTables::default();
        grains(&mut tables);

        let query = FoodQuery::new("地瓜", 1.0)
            .with_unit("條")
            .with_fallback("全穀雜糧類", 1.5);
        let line = resolve(&query, &tables).line().cloned().unwrap();
        assert_eq!(line.source, ResolutionSource::Category);
        assert_eq!(line.servings, 1.5);
        assert_eq!(line.macros.energy, 105.0);
        assert_eq!(line.macros.protein, 3.0);

        let unknown = FoodQuery::new("地瓜", 1.0).with_fallback("根莖類", 1.0);
        assert_eq!(
            resolve(&unknown, &tables),
            Resolution::UnknownCategory("根莖類".to_string())
        );
        let zero = FoodQuery::new("地瓜", 1.0).with_fallback("全穀雜糧類", 0.0);
        assert_eq!(resolve(&zero, &tables), Resolution::NoMatch);
    }

    #[test]
    fn test_non_positive_quantity_is_no_match() {
        let tables = ReferenceTables::builtin();
        for quantity in [0.0, -1.0, f64::NAN] {
            let query = FoodQuery::new("吐司", quantity)
                .with_unit("片")
                .with_fallback("全穀雜糧類", 1.0);
            assert_eq!(resolve(&query, &tables), Resolution::NoMatch);
        }
    }

    #[test]
    fn test_missing_unit_without_fallback_is_no_match() {
        let tables = ReferenceTables::builtin();
        assert_eq!(
            resolve(&FoodQuery::new("吐司", 1.0), &tables),
            Resolution::NoMatch
        );
    }

    #[test]
    fn test_empty_tables_never_match() {
        let tables = ReferenceTables::default();
        assert_eq!(
            resolve(&FoodQuery::new("吐司", 2.0).with_unit("片"), &tables),
            Resolution::NoMatch
        );
        assert_eq!(
            resolve(
                &FoodQuery::new("吐司", 2.0).with_fallback("全穀雜糧類", 1.0),
                &tables
            ),
            Resolution::UnknownCategory("全穀雜糧類".to_string())
        );
    }

    #[test]
    fn test_custom_cascade_order() {
        let mut tables = ReferenceTables::default();
        grains(&mut tables);
        tables
            .precise
            .insert("吐司", "片", Macros::new(70.0, 2.3, 13.1, 0.9));

        let cascade = Cascade::new(vec![Box::new(CategoryResolver), Box::new(PreciseResolver)]);
        let query = FoodQuery::new("吐司", 1.0)
            .with_unit("片")
            .with_fallback("全穀雜糧類", 2.0);
        let line = cascade.resolve(&query, &tables).line().cloned().unwrap();
        assert_eq!(line.source, ResolutionSource::Category);
    }

    #[test]
    fn test_unit_options() {
        let tables = ReferenceTables::builtin();
        assert_eq!(unit_options(&tables, "吐司"), vec!["片"]);
        assert_eq!(unit_options(&tables, "白飯"), vec!["碗", "g"]);
        assert_eq!(unit_options(&tables, "地瓜").len(), UNIT_WHITELIST.len());
    }

    #[test]
    fn test_resolve_exercise() {
        let tables = ReferenceTables::builtin();
        let entry = resolve_exercise(&tables, "慢跑（8km/h）", 30.0, 70.0, None).unwrap();
        assert_eq!(entry.met, 7.0);
        assert_eq!(entry.energy, 257.0);

        let custom = resolve_exercise(&tables, "划船", 20.0, 60.0, Some(5.0)).unwrap();
        assert_eq!(custom.energy, 105.0);
        assert!(resolve_exercise(&tables, "划船", 20.0, 60.0, None).is_none());
    }
}
