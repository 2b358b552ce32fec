use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy (kcal) and macronutrient grams for one unit, one serving, or one
/// logged line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub energy: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl Macros {
    pub fn new(energy: f64, protein: f64, carb: f64, fat: f64) -> Self {
        Self {
            energy,
            protein,
            carb,
            fat,
        }
    }

    /// Multiplies every field by `factor` without rounding.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            energy: self.energy * factor,
            protein: self.protein * factor,
            carb: self.carb * factor,
            fat: self.fat * factor,
        }
    }

    /// Energy to the nearest integer, macros to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            energy: self.energy.round(),
            protein: round1(self.protein),
            carb: round1(self.carb),
            fat: round1(self.fat),
        }
    }

    pub fn add(&self, other: &Macros) -> Self {
        Self {
            energy: self.energy + other.energy,
            protein: self.protein + other.protein,
            carb: self.carb + other.carb,
            fat: self.fat + other.fat,
        }
    }
}

/// Rounds to one decimal place.
pub fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

impl fmt::Display for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal · protein {}g · carb {}g · fat {}g",
            self.energy, self.protein, self.carb, self.fat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_scale_and_round() {
        let toast = Macros::new(70.0, 2.3, 13.1, 0.9);
        let line = toast.scale(2.0).rounded();
        assert_eq!(line, Macros::new(140.0, 4.6, 26.2, 1.8));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round1(12.0), 12.0);
    }

    #[test]
    fn test_macros_add() {
        let a = Macros::new(100.0, 1.0, 2.0, 3.0);
        let b = Macros::new(50.0, 0.5, 0.5, 0.5);
        assert_eq!(a.add(&b), Macros::new(150.0, 1.5, 2.5, 3.5));
    }

    #[test]
    fn test_macros_display() {
        let m = Macros::new(280.0, 8.0, 60.0, 2.0);
        assert_eq!(
            format!("{}", m),
            "280 kcal · protein 8g · carb 60g · fat 2g"
        );
    }
}
