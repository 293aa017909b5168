use super::types::{cycle, DietType, ExerciseFrequency, Gender, InputRecord};

/// Every input the form collects, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Gender,
    SleepDuration,
    StressLevel,
    DietType,
    DailyScreenTime,
    ExerciseFrequency,
    CaffeineIntake,
    ReactionTime,
    MemoryTestScore,
}

/// Form section a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Personal,
    Lifestyle,
    Cognitive,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Personal => "Personal Information",
            Section::Lifestyle => "Lifestyle Factors",
            Section::Cognitive => "Cognitive Metrics",
        }
    }
}

/// Inclusive bounds and slider step of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Age,
        Field::Gender,
        Field::SleepDuration,
        Field::StressLevel,
        Field::DietType,
        Field::DailyScreenTime,
        Field::ExerciseFrequency,
        Field::CaffeineIntake,
        Field::ReactionTime,
        Field::MemoryTestScore,
    ];

    /// Snake-case key, matching config and JSON field names.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Gender => "gender",
            Field::SleepDuration => "sleep_duration",
            Field::StressLevel => "stress_level",
            Field::DietType => "diet_type",
            Field::DailyScreenTime => "daily_screen_time",
            Field::ExerciseFrequency => "exercise_frequency",
            Field::CaffeineIntake => "caffeine_intake",
            Field::ReactionTime => "reaction_time",
            Field::MemoryTestScore => "memory_test_score",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::SleepDuration => "Sleep Duration (hrs)",
            Field::StressLevel => "Stress Level (1-10)",
            Field::DietType => "Diet Type",
            Field::DailyScreenTime => "Screen Time (hrs)",
            Field::ExerciseFrequency => "Exercise Frequency",
            Field::CaffeineIntake => "Caffeine Intake (mg)",
            Field::ReactionTime => "Reaction Time (ms)",
            Field::MemoryTestScore => "Memory Test Score",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Field::Age | Field::Gender => Section::Personal,
            Field::ReactionTime | Field::MemoryTestScore => Section::Cognitive,
            _ => Section::Lifestyle,
        }
    }

    /// Bounds for numeric fields; `None` for categorical ones.
    pub fn bounds(&self) -> Option<Bounds> {
        let (min, max, step) = match self {
            Field::Age => (18.0, 59.0, 1.0),
            Field::SleepDuration => (4.0, 10.0, 0.1),
            Field::StressLevel => (1.0, 10.0, 1.0),
            Field::DailyScreenTime => (1.0, 12.0, 0.1),
            Field::CaffeineIntake => (0.0, 500.0, 1.0),
            Field::ReactionTime => (200.0, 600.0, 0.1),
            Field::MemoryTestScore => (40.0, 100.0, 1.0),
            Field::Gender | Field::DietType | Field::ExerciseFrequency => return None,
        };
        Some(Bounds { min, max, step })
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Field::Age | Field::StressLevel | Field::CaffeineIntake | Field::MemoryTestScore
        )
    }

    /// Numeric value of this field in `record`, if the field is numeric.
    pub fn numeric_value(&self, record: &InputRecord) -> Option<f64> {
        match self {
            Field::Age => Some(record.age as f64),
            Field::SleepDuration => Some(record.sleep_duration),
            Field::StressLevel => Some(record.stress_level as f64),
            Field::DailyScreenTime => Some(record.daily_screen_time),
            Field::CaffeineIntake => Some(record.caffeine_intake as f64),
            Field::ReactionTime => Some(record.reaction_time),
            Field::MemoryTestScore => Some(record.memory_test_score as f64),
            Field::Gender | Field::DietType | Field::ExerciseFrequency => None,
        }
    }

    /// Value formatted for display next to the field label.
    pub fn display_value(&self, record: &InputRecord) -> String {
        match self {
            Field::Gender => record.gender.to_string(),
            Field::DietType => record.diet_type.to_string(),
            Field::ExerciseFrequency => record.exercise_frequency.to_string(),
            _ => {
                let value = self.numeric_value(record).unwrap_or_default();
                if self.is_integer() {
                    format!("{}", value as i64)
                } else {
                    format!("{:.1}", value)
                }
            }
        }
    }

    /// Move the field by `steps` slider steps (or options), staying in range.
    pub fn adjust(&self, record: &mut InputRecord, steps: i32) {
        match self {
            Field::Gender => record.gender = cycle(&Gender::ALL, record.gender, steps),
            Field::DietType => record.diet_type = cycle(&DietType::ALL, record.diet_type, steps),
            Field::ExerciseFrequency => {
                record.exercise_frequency =
                    cycle(&ExerciseFrequency::ALL, record.exercise_frequency, steps)
            }
            _ => {
                let (Some(bounds), Some(current)) = (self.bounds(), self.numeric_value(record))
                else {
                    return;
                };
                let raw = current + bounds.step * steps as f64;
                // Snap to one decimal so repeated 0.1 steps don't drift.
                let snapped = ((raw * 10.0).round() / 10.0).clamp(bounds.min, bounds.max);
                self.set_numeric(record, snapped);
            }
        }
    }

    fn set_numeric(&self, record: &mut InputRecord, value: f64) {
        match self {
            Field::Age => record.age = value.round() as u32,
            Field::SleepDuration => record.sleep_duration = value,
            Field::StressLevel => record.stress_level = value.round() as u32,
            Field::DailyScreenTime => record.daily_screen_time = value,
            Field::CaffeineIntake => record.caffeine_intake = value.round() as u32,
            Field::ReactionTime => record.reaction_time = value,
            Field::MemoryTestScore => record.memory_test_score = value.round() as u32,
            Field::Gender | Field::DietType | Field::ExerciseFrequency => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let mut record = InputRecord {
            age: 58,
            ..Default::default()
        };
        Field::Age.adjust(&mut record, 10);
        assert_eq!(record.age, 59);
        Field::Age.adjust(&mut record, -100);
        assert_eq!(record.age, 18);
    }

    #[test]
    fn test_adjust_fractional_step_does_not_drift() {
        let mut record = InputRecord::default();
        for _ in 0..10 {
            Field::SleepDuration.adjust(&mut record, 1);
        }
        assert_eq!(record.sleep_duration, 8.0);
    }

    #[test]
    fn test_adjust_cycles_categorical() {
        let mut record = InputRecord::default();
        Field::ExerciseFrequency.adjust(&mut record, 2);
        assert_eq!(record.exercise_frequency, ExerciseFrequency::High);
        Field::Gender.adjust(&mut record, -1);
        assert_eq!(record.gender, Gender::Other);
    }

    #[test]
    fn test_display_value_formats() {
        let record = InputRecord::default();
        assert_eq!(Field::Age.display_value(&record), "30");
        assert_eq!(Field::SleepDuration.display_value(&record), "7.0");
        assert_eq!(Field::DietType.display_value(&record), "Non-Vegetarian");
    }

    #[test]
    fn test_sections_group_fields_in_order() {
        let sections: Vec<Section> = Field::ALL.iter().map(|f| f.section()).collect();
        assert_eq!(sections[0], Section::Personal);
        assert_eq!(sections[2], Section::Lifestyle);
        assert_eq!(sections[9], Section::Cognitive);
    }

    #[test]
    fn test_categorical_fields_have_no_bounds() {
        assert!(Field::Gender.bounds().is_none());
        assert!(Field::DietType.bounds().is_none());
        assert_eq!(Field::CaffeineIntake.bounds().map(|b| b.max), Some(500.0));
    }
}
