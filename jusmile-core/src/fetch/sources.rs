use serde::{Deserialize, Serialize};

/// The four reference resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    PreciseItems,
    UnitConversions,
    TypeMacros,
    ExerciseIntensities,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::PreciseItems,
        ResourceKind::UnitConversions,
        ResourceKind::TypeMacros,
        ResourceKind::ExerciseIntensities,
    ];

    pub fn default_file(&self) -> &'static str {
        match self {
            ResourceKind::PreciseItems => "Food_DB.csv",
            ResourceKind::UnitConversions => "Unit_Map.csv",
            ResourceKind::TypeMacros => "Type_Table.csv",
            ResourceKind::ExerciseIntensities => "Exercise_Met.csv",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::PreciseItems => "precise_items",
            ResourceKind::UnitConversions => "unit_conversions",
            ResourceKind::TypeMacros => "type_macros",
            ResourceKind::ExerciseIntensities => "exercise_intensities",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub const VERSION_FILE: &str = "version.json";

/// User-supplied locations, one per resource. Each may be an absolute URL,
/// a root-relative path, a `./` path, or a bare filename.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precise_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_conversions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_macros: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_intensities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SourceOverrides {
    pub fn get(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::PreciseItems => self.precise_items.as_deref(),
            ResourceKind::UnitConversions => self.unit_conversions.as_deref(),
            ResourceKind::TypeMacros => self.type_macros.as_deref(),
            ResourceKind::ExerciseIntensities => self.exercise_intensities.as_deref(),
        }
    }
}

/// Resolved resource locations under a base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSources {
    base: String,
    overrides: SourceOverrides,
}

impl ResourceSources {
    pub fn new(base: impl Into<String>, overrides: SourceOverrides) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base, overrides }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, kind: ResourceKind) -> String {
        resolve_source(&self.base, self.overrides.get(kind), kind.default_file())
    }

    pub fn version_url(&self) -> String {
        resolve_source(&self.base, self.overrides.version.as_deref(), VERSION_FILE)
    }
}

/// Turns a configured location into a fetchable URL.
///
/// - empty → `{base}data/{fallback_file}`
/// - `http(s)://…` → unchanged
/// - `./x` or `/x` → `{base}x`
/// - bare name → `{base}data/{name}`
pub fn resolve_source(base: &str, value: Option<&str>, fallback_file: &str) -> String {
    let value = value.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return format!("{}data/{}", base, fallback_file);
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return value.to_string();
    }
    if let Some(rest) = value.strip_prefix("./") {
        return format!("{}{}", base, rest);
    }
    if let Some(rest) = value.strip_prefix('/') {
        return format!("{}{}", base, rest);
    }
    format!("{}data/{}", base, value)
}
