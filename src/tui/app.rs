use std::time::{Duration, Instant};

use crate::inputs::{Field, InputRecord};
use crate::sample::SampleDataset;
use crate::scoring::{compute, Prediction};
use crate::tui::theme::ThemeColors;

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    ScoreBreakdown,
}

pub struct App {
    pub inputs: InputRecord,
    pub initial_inputs: InputRecord,
    pub selected: usize,
    pub prediction: Option<Prediction>,
    /// Inputs changed since the shown prediction was computed
    pub stale: bool,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub sample: SampleDataset,
    pub theme: ThemeColors,
    pub should_quit: bool,
}

impl App {
    pub fn new(inputs: InputRecord, sample: SampleDataset, theme: ThemeColors) -> Self {
        Self {
            initial_inputs: inputs.clone(),
            inputs,
            selected: 0,
            prediction: None,
            stale: false,
            input_mode: InputMode::Normal,
            flash_message: None,
            sample,
            theme,
            should_quit: false,
        }
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % Field::ALL.len();
    }

    pub fn previous_field(&mut self) {
        self.selected = (self.selected + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Move the selected field's slider (or option) by `steps`.
    pub fn adjust_selected(&mut self, steps: i32) {
        let before = self.inputs.clone();
        self.selected_field().adjust(&mut self.inputs, steps);
        if self.inputs != before && self.prediction.is_some() {
            self.stale = true;
        }
    }

    /// Score the current inputs.
    pub fn predict(&mut self) {
        let prediction = compute(&self.inputs);
        crate::verbose_eprintln!(
            "Predicted {:.3} ({}) with {} recommendations",
            prediction.score,
            prediction.tier,
            prediction.recommendations.len()
        );
        self.prediction = Some(prediction);
        self.stale = false;
    }

    /// Restore the inputs the form started with and clear the result.
    pub fn reset(&mut self) {
        self.inputs = self.initial_inputs.clone();
        self.prediction = None;
        self.stale = false;
        self.show_flash("Inputs reset".to_string());
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::Help => InputMode::Normal,
            _ => InputMode::Help,
        };
    }

    /// Breakdown needs a prediction; flashes a hint otherwise.
    pub fn toggle_breakdown(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::ScoreBreakdown => InputMode::Normal,
            _ if self.prediction.is_none() => {
                self.show_flash("Press Enter to predict first".to_string());
                InputMode::Normal
            }
            _ => InputMode::ScoreBreakdown,
        };
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn clear_expired_flash(&mut self) {
        if let Some((_, at)) = &self.flash_message {
            if at.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ExerciseFrequency;
    use crate::tui::theme::ThemeColors;

    fn app() -> App {
        App::new(InputRecord::default(), SampleDataset::placeholder(), ThemeColors::dark())
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut app = app();
        app.previous_field();
        assert_eq!(app.selected_field(), Field::MemoryTestScore);
        app.next_field();
        assert_eq!(app.selected_field(), Field::Age);
    }

    #[test]
    fn test_predict_sets_result() {
        let mut app = app();
        assert!(app.prediction.is_none());
        app.predict();
        let prediction = app.prediction.as_ref().unwrap();
        assert!((prediction.score - 51.739837398373986).abs() < 1e-6);
        assert!(!app.stale);
    }

    #[test]
    fn test_adjust_after_predict_marks_stale() {
        let mut app = app();
        app.predict();
        app.selected = Field::ALL
            .iter()
            .position(|f| *f == Field::ExerciseFrequency)
            .unwrap();
        app.adjust_selected(1);
        assert_eq!(app.inputs.exercise_frequency, ExerciseFrequency::Medium);
        assert!(app.stale);

        app.predict();
        assert!(!app.stale);
    }

    #[test]
    fn test_adjust_at_bound_is_not_stale() {
        let mut app = app();
        app.inputs.age = 59;
        app.predict();
        app.adjust_selected(1); // Age is selected, already at max
        assert!(!app.stale);
    }

    #[test]
    fn test_reset_restores_initial_inputs() {
        let mut app = app();
        app.adjust_selected(5);
        app.predict();
        app.reset();
        assert_eq!(app.inputs, InputRecord::default());
        assert!(app.prediction.is_none());
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_breakdown_requires_prediction() {
        let mut app = app();
        app.toggle_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.flash_message.is_some());

        app.predict();
        app.toggle_breakdown();
        assert_eq!(app.input_mode, InputMode::ScoreBreakdown);
        app.toggle_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.toggle_help();
        assert_eq!(app.input_mode, InputMode::Help);
        app.toggle_help();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
