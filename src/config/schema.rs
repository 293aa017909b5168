use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::inputs::{InputOverrides, InputRecord};

/// Color palette selection for the interactive form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Contents of `~/.config/cogscore/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// defaults:
///   age: 42
///   sleep_duration: 7.5
///   exercise_frequency: Medium
/// sample_data: ~/data/cognitive_subset.csv
/// theme: dark
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Starting values for the form and for unset `predict` flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<InputOverrides>,

    /// CSV file with reference measurements and scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<PathBuf>,

    #[serde(default)]
    pub theme: ThemeMode,
}

impl Config {
    /// Built-in inputs with the configured defaults layered on top.
    pub fn starting_inputs(&self) -> InputRecord {
        let mut record = InputRecord::default();
        if let Some(ref defaults) = self.defaults {
            defaults.apply_to(&mut record);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DietType;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.defaults.is_none());
        assert!(config.sample_data.is_none());
        assert_eq!(config.theme, ThemeMode::Auto);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
defaults:
  age: 42
  diet_type: Vegetarian
sample_data: /tmp/data_subset.csv
theme: light
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let defaults = config.defaults.clone().unwrap();
        assert_eq!(defaults.age, Some(42));
        assert_eq!(defaults.diet_type, Some(DietType::Vegetarian));
        assert_eq!(config.sample_data, Some(PathBuf::from("/tmp/data_subset.csv")));
        assert_eq!(config.theme, ThemeMode::Light);
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let yaml = "queries: []\n";
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_starting_inputs_layers_defaults() {
        let config = Config {
            defaults: Some(InputOverrides {
                memory_test_score: Some(88),
                ..Default::default()
            }),
            ..Default::default()
        };
        let record = config.starting_inputs();
        assert_eq!(record.memory_test_score, 88);
        assert_eq!(record.age, 30);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            defaults: Some(InputOverrides::from_record(&InputRecord::default())),
            sample_data: Some(PathBuf::from("data.csv")),
            theme: ThemeMode::Dark,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
