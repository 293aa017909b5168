use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DietType {
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ExerciseFrequency {
    Low,
    Medium,
    High,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl DietType {
    pub const ALL: [DietType; 3] = [DietType::NonVegetarian, DietType::Vegetarian, DietType::Vegan];

    pub fn label(&self) -> &'static str {
        match self {
            DietType::NonVegetarian => "Non-Vegetarian",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
        }
    }
}

impl ExerciseFrequency {
    pub const ALL: [ExerciseFrequency; 3] = [
        ExerciseFrequency::Low,
        ExerciseFrequency::Medium,
        ExerciseFrequency::High,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseFrequency::Low => "Low",
            ExerciseFrequency::Medium => "Medium",
            ExerciseFrequency::High => "High",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ExerciseFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step through a closed option list, wrapping at both ends.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: T, steps: i32) -> T {
    let len = options.len() as i32;
    let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
    options[(idx + steps).rem_euclid(len) as usize]
}

/// One complete set of inputs for a single prediction.
///
/// Ranges are enforced by [`super::validate_inputs`] at the collector layer;
/// the scoring engine accepts any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub age: u32,
    pub gender: Gender,
    pub sleep_duration: f64,     // hours
    pub stress_level: u32,       // 1-10
    pub diet_type: DietType,
    pub daily_screen_time: f64,  // hours
    pub exercise_frequency: ExerciseFrequency,
    pub caffeine_intake: u32,    // mg
    pub reaction_time: f64,      // ms
    pub memory_test_score: u32,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            sleep_duration: 7.0,
            stress_level: 5,
            diet_type: DietType::NonVegetarian,
            daily_screen_time: 6.0,
            exercise_frequency: ExerciseFrequency::Low,
            caffeine_intake: 150,
            reaction_time: 350.0,
            memory_test_score: 70,
        }
    }
}

/// Partial inputs, layered over an [`InputRecord`].
///
/// Used both for the `defaults:` section of the config file and for CLI flags.
///
/// Example YAML:
/// ```yaml
/// defaults:
///   age: 42
///   diet_type: Vegetarian
///   exercise_frequency: Medium
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<DietType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_screen_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_frequency: Option<ExerciseFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caffeine_intake: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_test_score: Option<u32>,
}

impl InputOverrides {
    /// Overrides covering every field, taken from a complete record.
    pub fn from_record(record: &InputRecord) -> Self {
        Self {
            age: Some(record.age),
            gender: Some(record.gender),
            sleep_duration: Some(record.sleep_duration),
            stress_level: Some(record.stress_level),
            diet_type: Some(record.diet_type),
            daily_screen_time: Some(record.daily_screen_time),
            exercise_frequency: Some(record.exercise_frequency),
            caffeine_intake: Some(record.caffeine_intake),
            reaction_time: Some(record.reaction_time),
            memory_test_score: Some(record.memory_test_score),
        }
    }

    /// Write every set field onto `record`, leaving the rest untouched.
    pub fn apply_to(&self, record: &mut InputRecord) {
        if let Some(v) = self.age {
            record.age = v;
        }
        if let Some(v) = self.gender {
            record.gender = v;
        }
        if let Some(v) = self.sleep_duration {
            record.sleep_duration = v;
        }
        if let Some(v) = self.stress_level {
            record.stress_level = v;
        }
        if let Some(v) = self.diet_type {
            record.diet_type = v;
        }
        if let Some(v) = self.daily_screen_time {
            record.daily_screen_time = v;
        }
        if let Some(v) = self.exercise_frequency {
            record.exercise_frequency = v;
        }
        if let Some(v) = self.caffeine_intake {
            record.caffeine_intake = v;
        }
        if let Some(v) = self.reaction_time {
            record.reaction_time = v;
        }
        if let Some(v) = self.memory_test_score {
            record.memory_test_score = v;
        }
    }
}
