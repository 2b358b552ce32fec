use super::{ReferenceTables, UnitConversion};
use crate::models::Macros;

const GRAINS: &str = "全穀雜糧類";

impl ReferenceTables {
    /// Seed data used until the first successful sync.
    pub fn builtin() -> Self {
        let mut tables = ReferenceTables::default();

        for (category, energy, protein, carb, fat) in [
            (GRAINS, 70.0, 2.0, 15.0, 0.5),
            ("豆魚蛋肉類", 55.0, 7.0, 0.0, 2.0),
            ("乳品類", 100.0, 6.0, 10.0, 3.0),
            ("蔬菜類", 25.0, 1.0, 5.0, 0.0),
            ("水果類", 60.0, 0.5, 15.0, 0.0),
            ("油脂類", 45.0, 0.0, 0.0, 5.0),
            ("堅果種子類", 85.0, 3.0, 3.0, 7.0),
        ] {
            tables
                .type_macros
                .insert(category, Macros::new(energy, protein, carb, fat));
        }

        tables
            .precise
            .insert("吐司", "片", Macros::new(70.0, 2.3, 13.1, 0.9));
        tables
            .precise
            .insert("雞蛋", "顆", Macros::new(70.0, 6.3, 0.6, 4.8));
        tables
            .precise
            .insert("牛奶", "杯", Macros::new(150.0, 8.0, 12.0, 8.0));

        for (item, unit, servings) in [("白飯", "碗", 4.0), ("白飯", "g", 0.04), ("吐司", "片", 1.0)]
        {
            tables.unit_conversions.insert(
                item,
                UnitConversion {
                    unit: unit.to_string(),
                    servings_per_unit: servings,
                    type_category: GRAINS.to_string(),
                },
            );
        }

        for (name, met) in [
            ("坐著不動", 1.0),
            ("健走（約4km/h）", 3.5),
            ("重訓（全身）", 6.0),
            ("慢跑（8km/h）", 7.0),
            ("游泳（自由式中速）", 8.3),
            ("登山健行", 9.0),
            ("跳繩（快）", 12.0),
        ] {
            tables.exercises.insert(name, met);
        }

        tables
    }
}
