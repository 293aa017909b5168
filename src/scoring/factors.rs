use crate::inputs::{DietType, ExerciseFrequency, InputRecord};

/// A weighted term of the cognitive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Age,
    Sleep,
    Stress,
    Diet,
    ScreenTime,
    Exercise,
    Caffeine,
    ReactionTime,
    Memory,
}

impl Factor {
    /// Summation order. Weights add up to 1.0.
    pub const ALL: [Factor; 9] = [
        Factor::Age,
        Factor::Sleep,
        Factor::Stress,
        Factor::Diet,
        Factor::ScreenTime,
        Factor::Exercise,
        Factor::Caffeine,
        Factor::ReactionTime,
        Factor::Memory,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            Factor::Age => 0.10,
            Factor::Sleep => 0.15,
            Factor::Stress => 0.15,
            Factor::Diet => 0.05,
            Factor::ScreenTime => 0.10,
            Factor::Exercise => 0.15,
            Factor::Caffeine => 0.05,
            Factor::ReactionTime => 0.10,
            Factor::Memory => 0.15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Age => "Age",
            Factor::Sleep => "Sleep quality",
            Factor::Stress => "Stress",
            Factor::Diet => "Diet",
            Factor::ScreenTime => "Screen time",
            Factor::Exercise => "Exercise",
            Factor::Caffeine => "Caffeine",
            Factor::ReactionTime => "Reaction time",
            Factor::Memory => "Memory",
        }
    }

    /// Normalized value of this factor, roughly in [0, 1] for in-range inputs.
    /// Not clamped: out-of-range inputs are only bounded by the final score clamp.
    pub fn normalize(&self, inputs: &InputRecord) -> f64 {
        match self {
            Factor::Age => 1.0 - (inputs.age as f64 - 18.0) / 41.0,
            Factor::Sleep => 1.0 - (inputs.sleep_duration - 8.0).abs() / 4.0,
            Factor::Stress => 1.0 - inputs.stress_level as f64 / 10.0,
            Factor::Diet => diet_factor(inputs.diet_type),
            Factor::ScreenTime => 1.0 - inputs.daily_screen_time / 12.0,
            Factor::Exercise => exercise_factor(inputs.exercise_frequency),
            Factor::Caffeine => 1.0 - (inputs.caffeine_intake as f64 - 200.0).abs() / 300.0,
            Factor::ReactionTime => 1.0 - (inputs.reaction_time - 200.0) / 400.0,
            Factor::Memory => inputs.memory_test_score as f64 / 100.0,
        }
    }
}

pub fn diet_factor(diet: DietType) -> f64 {
    match diet {
        DietType::NonVegetarian => 0.0,
        DietType::Vegetarian => 0.5,
        DietType::Vegan => 1.0,
    }
}

pub fn exercise_factor(exercise: ExerciseFrequency) -> f64 {
    match exercise {
        ExerciseFrequency::Low => 0.0,
        ExerciseFrequency::Medium => 0.5,
        ExerciseFrequency::High => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = Factor::ALL.iter().map(|f| f.weight()).sum();
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_age_normalization_endpoints() {
        let young = InputRecord { age: 18, ..Default::default() };
        let old = InputRecord { age: 59, ..Default::default() };
        assert!((Factor::Age.normalize(&young) - 1.0).abs() < EPS);
        assert!(Factor::Age.normalize(&old).abs() < EPS);
    }

    #[test]
    fn test_sleep_peaks_at_eight_hours() {
        let eight = InputRecord { sleep_duration: 8.0, ..Default::default() };
        let four = InputRecord { sleep_duration: 4.0, ..Default::default() };
        let ten = InputRecord { sleep_duration: 10.0, ..Default::default() };
        assert_eq!(Factor::Sleep.normalize(&eight), 1.0);
        assert_eq!(Factor::Sleep.normalize(&four), 0.0);
        assert_eq!(Factor::Sleep.normalize(&ten), 0.5);
    }

    #[test]
    fn test_caffeine_peaks_at_two_hundred_mg() {
        let at_peak = InputRecord { caffeine_intake: 200, ..Default::default() };
        let none = InputRecord { caffeine_intake: 0, ..Default::default() };
        let max = InputRecord { caffeine_intake: 500, ..Default::default() };
        assert_eq!(Factor::Caffeine.normalize(&at_peak), 1.0);
        assert!((Factor::Caffeine.normalize(&none) - 1.0 / 3.0).abs() < EPS);
        assert!(Factor::Caffeine.normalize(&max).abs() < EPS);
    }

    #[test]
    fn test_reaction_time_normalization() {
        let fast = InputRecord { reaction_time: 200.0, ..Default::default() };
        let slow = InputRecord { reaction_time: 600.0, ..Default::default() };
        assert_eq!(Factor::ReactionTime.normalize(&fast), 1.0);
        assert_eq!(Factor::ReactionTime.normalize(&slow), 0.0);
    }

    #[test]
    fn test_categorical_lookups() {
        assert_eq!(diet_factor(DietType::NonVegetarian), 0.0);
        assert_eq!(diet_factor(DietType::Vegetarian), 0.5);
        assert_eq!(diet_factor(DietType::Vegan), 1.0);
        assert_eq!(exercise_factor(ExerciseFrequency::Low), 0.0);
        assert_eq!(exercise_factor(ExerciseFrequency::Medium), 0.5);
        assert_eq!(exercise_factor(ExerciseFrequency::High), 1.0);
    }

    #[test]
    fn test_out_of_range_input_is_not_clamped_per_factor() {
        let record = InputRecord { stress_level: 20, ..Default::default() };
        assert_eq!(Factor::Stress.normalize(&record), -1.0);
    }
}
