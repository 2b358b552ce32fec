use serde::{Deserialize, Serialize};

/// Daily goals, used only for progress display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub energy_goal: f64,
    pub protein_goal: f64,
    pub water_goal: f64,
    pub activity_goal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_target_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_start_kg: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            energy_goal: 1600.0,
            protein_goal: 160.0,
            water_goal: 2000.0,
            activity_goal: 30.0,
            weight_target_kg: None,
            weight_target_date: None,
            weight_start_kg: None,
        }
    }
}

/// Percent of a goal reached, clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub value: f64,
    pub goal: f64,
}

impl GoalProgress {
    pub fn new(value: f64, goal: f64) -> Self {
        Self { value, goal }
    }

    pub fn percent(&self) -> f64 {
        if self.goal > 0.0 {
            (self.value / self.goal * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}
