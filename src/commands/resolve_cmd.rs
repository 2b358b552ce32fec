use clap::Args;
use jusmile_core::resolve::unit_options;
use jusmile_core::{resolve, FoodQuery, ReferenceTables, Resolution};

use super::OutputFormat;
use crate::context::Context;

/// Price a food entry without logging it
#[derive(Args)]
pub struct ResolveCommand {
    /// Food name
    name: String,

    /// Quantity in the given unit
    quantity: f64,

    #[command(flatten)]
    pricing: PricingArgs,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Unit and fallback options shared by `resolve` and `food add`.
#[derive(Args, Debug, Clone)]
pub struct PricingArgs {
    /// Unit (e.g. 片, 碗, g)
    #[arg(long, short)]
    pub unit: Option<String>,

    /// Fallback category when the name has no table entry (e.g. 全穀雜糧類)
    #[arg(long = "type", short = 't', value_name = "TYPE", requires = "servings")]
    pub type_category: Option<String>,

    /// Fallback servings of the category
    #[arg(long, requires = "type_category")]
    pub servings: Option<f64>,
}

impl PricingArgs {
    pub fn query(&self, name: &str, quantity: f64) -> FoodQuery {
        let mut query = FoodQuery::new(name, quantity);
        if let Some(unit) = &self.unit {
            query = query.with_unit(unit.clone());
        }
        if let (Some(category), Some(servings)) = (&self.type_category, self.servings) {
            query = query.with_fallback(category.clone(), servings);
        }
        query
    }
}

impl ResolveCommand {
    pub fn run(&self, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = ctx.store.snapshot();
        let resolution = resolve(&self.pricing.query(&self.name, self.quantity), &snapshot.tables);

        match (&self.format, &resolution) {
            (OutputFormat::Json, Resolution::Matched(line)) => {
                println!("{}", serde_json::to_string_pretty(line)?);
            }
            (OutputFormat::Json, _) => {
                println!("null");
            }
            (OutputFormat::Text, Resolution::Matched(line)) => {
                let unit = self.pricing.unit.as_deref().unwrap_or("");
                println!("{} × {} {}", self.name, self.quantity, unit);
                println!("  source:   {}", line.source);
                println!("  type:     {}", line.resolved_type);
                println!("  servings: {}", jusmile_core::models::round1(line.servings));
                println!("  {}", line.macros);
            }
            (OutputFormat::Text, _) => {
                println!("{}", describe_unpriced(&resolution, &snapshot.tables, &self.name));
            }
        }
        Ok(())
    }
}

/// Explains why an entry could not be priced, with the units it would accept.
pub fn describe_unpriced(resolution: &Resolution, tables: &ReferenceTables, name: &str) -> String {
    match resolution {
        Resolution::UnknownCategory(category) => format!(
            "Unknown category '{}'. Known categories: {}",
            category,
            tables
                .type_macros
                .categories()
                .collect::<Vec<_>>()
                .join(", ")
        ),
        _ => format!(
            "No match for '{}'. Try one of these units: {}, or pass --type and --servings",
            name,
            unit_options(tables, name).join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_args_build_query() {
        let args = PricingArgs {
            unit: Some("碗".to_string()),
            type_category: Some("全穀雜糧類".to_string()),
            servings: Some(2.0),
        };
        let query = args.query("白飯", 1.0);
        assert_eq!(query.unit.as_deref(), Some("碗"));
        assert_eq!(query.fallback.unwrap().servings, 2.0);
    }

    #[test]
    fn test_describe_unpriced_lists_units() {
        let tables = ReferenceTables::builtin();
        let text = describe_unpriced(&Resolution::NoMatch, &tables, "白飯");
        assert!(text.contains("碗, g"));

        let text = describe_unpriced(
            &Resolution::UnknownCategory("根莖類".to_string()),
            &tables,
            "地瓜",
        );
        assert!(text.contains("根莖類"));
        assert!(text.contains("全穀雜糧類"));
    }
}
