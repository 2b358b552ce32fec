use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    LateNight,
}

impl Meal {
    pub const ALL: [Meal; 5] = [
        Meal::Breakfast,
        Meal::Lunch,
        Meal::Dinner,
        Meal::Snack,
        Meal::LateNight,
    ];

    /// Label shown in the day view.
    pub fn label(&self) -> &'static str {
        match self {
            Meal::Breakfast => "早餐",
            Meal::Lunch => "午餐",
            Meal::Dinner => "晚餐",
            Meal::Snack => "點心",
            Meal::LateNight => "宵夜",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meal::Breakfast => write!(f, "breakfast"),
            Meal::Lunch => write!(f, "lunch"),
            Meal::Dinner => write!(f, "dinner"),
            Meal::Snack => write!(f, "snack"),
            Meal::LateNight => write!(f, "late_night"),
        }
    }
}

impl FromStr for Meal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "早餐" => Ok(Meal::Breakfast),
            "lunch" | "午餐" => Ok(Meal::Lunch),
            "dinner" | "晚餐" => Ok(Meal::Dinner),
            "snack" | "點心" => Ok(Meal::Snack),
            "late_night" | "late-night" | "宵夜" => Ok(Meal::LateNight),
            _ => Err(format!(
                "Invalid meal '{}'. Valid options: breakfast, lunch, dinner, snack, late_night",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_display() {
        assert_eq!(format!("{}", Meal::Breakfast), "breakfast");
        assert_eq!(format!("{}", Meal::LateNight), "late_night");
    }

    #[test]
    fn test_meal_from_str() {
        assert_eq!(Meal::from_str("LUNCH").unwrap(), Meal::Lunch);
        assert_eq!(Meal::from_str("晚餐").unwrap(), Meal::Dinner);
        assert_eq!(Meal::from_str("宵夜").unwrap(), Meal::LateNight);
        assert_eq!(Meal::from_str("late-night").unwrap(), Meal::LateNight);
    }

    #[test]
    fn test_meal_from_str_invalid() {
        assert!(Meal::from_str("brunch").is_err());
        assert!(Meal::from_str("").is_err());
    }

    #[test]
    fn test_meal_label_roundtrip() {
        for meal in Meal::ALL {
            assert_eq!(Meal::from_str(meal.label()).unwrap(), meal);
        }
    }

    #[test]
    fn test_meal_json() {
        let json = serde_json::to_string(&Meal::LateNight).unwrap();
        assert_eq!(json, "\"late_night\"");
    }
}
