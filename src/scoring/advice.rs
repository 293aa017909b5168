use serde::Serialize;
use std::fmt;

use crate::inputs::{ExerciseFrequency, InputRecord};

/// Shown when no recommendation rule fires.
pub const OPTIMAL_MESSAGE: &str = "Your lifestyle appears optimal!";

/// Interpretation band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl Tier {
    /// First match wins, evaluated high to low.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Tier::Excellent
        } else if score >= 60.0 {
            Tier::Good
        } else if score >= 40.0 {
            Tier::Moderate
        } else {
            Tier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::Moderate => "Moderate",
            Tier::Low => "Low",
        }
    }

    /// One-line interpretation of `score` in this tier.
    pub fn message(&self, score: f64) -> String {
        match self {
            Tier::Excellent => format!("Excellent cognitive score of {:.1}!", score),
            Tier::Good => format!("Good cognitive score of {:.1}.", score),
            Tier::Moderate => format!("Moderate score of {:.1}.", score),
            Tier::Low => format!("Low cognitive score of {:.1}.", score),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type Rule = (fn(&InputRecord) -> bool, &'static str);

// Output order follows this table.
const RULES: [Rule; 7] = [
    (
        |i: &InputRecord| i.sleep_duration < 7.0 || i.sleep_duration > 9.0,
        "Sleep 7–9 hours per night.",
    ),
    (|i: &InputRecord| i.stress_level > 6, "Reduce stress with meditation or exercise."),
    (|i: &InputRecord| i.daily_screen_time > 8.0, "Limit screen time to under 8 hours daily."),
    (
        |i: &InputRecord| i.exercise_frequency == ExerciseFrequency::Low,
        "Increase physical activity (e.g., 30 mins/day).",
    ),
    (|i: &InputRecord| i.caffeine_intake > 400, "Reduce caffeine below 400 mg/day."),
    (|i: &InputRecord| i.reaction_time > 450.0, "Play focus and reflex games."),
    (|i: &InputRecord| i.memory_test_score < 60, "Practice memory-enhancing activities."),
];

/// Every recommendation whose rule matches, in rule order.
pub fn recommendations(inputs: &InputRecord) -> Vec<String> {
    RULES
        .iter()
        .filter(|(applies, _)| applies(inputs))
        .map(|(_, text)| text.to_string())
        .collect()
}
