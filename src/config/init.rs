use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, ThemeMode};
use crate::inputs::{DietType, ExerciseFrequency, Field, Gender, InputOverrides, InputRecord};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a numeric answer for `field`, checking it against the field's range.
pub(crate) fn parse_numeric(field: Field, input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    let Some(bounds) = field.bounds() else {
        return Err(format!("{} is not numeric", field.label()));
    };
    if !value.is_finite() || value < bounds.min || value > bounds.max {
        return Err(format!("must be between {} and {}", bounds.min, bounds.max));
    }
    if field.is_integer() && value.fract() != 0.0 {
        return Err("must be a whole number".to_string());
    }
    Ok(value)
}

/// Parse a categorical answer. Accepts the clap value names, case-insensitive.
fn parse_choice<T: ValueEnum>(input: &str) -> Result<T, String> {
    T::from_str(input, true)
}

fn choice_hint<T: ValueEnum>() -> String {
    T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|p| p.get_name().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ask for one field until a valid value is given, then store it in `record`.
fn prompt_field(field: Field, record: &mut InputRecord) -> Result<()> {
    let current = field.display_value(record);
    loop {
        let input = match field {
            Field::Gender => prompt_with_default(
                &format!("{} ({})", field.label(), choice_hint::<Gender>()),
                &current,
            )?,
            Field::DietType => prompt_with_default(
                &format!("{} ({})", field.label(), choice_hint::<DietType>()),
                &current,
            )?,
            Field::ExerciseFrequency => prompt_with_default(
                &format!("{} ({})", field.label(), choice_hint::<ExerciseFrequency>()),
                &current,
            )?,
            _ => prompt_with_default(field.label(), &current)?,
        };

        let outcome = match field {
            Field::Gender => parse_choice::<Gender>(&input).map(|v| record.gender = v),
            Field::DietType => parse_choice::<DietType>(&input).map(|v| record.diet_type = v),
            Field::ExerciseFrequency => {
                parse_choice::<ExerciseFrequency>(&input).map(|v| record.exercise_frequency = v)
            }
            _ => parse_numeric(field, &input).map(|v| {
                let overrides = numeric_override(field, v);
                overrides.apply_to(record);
            }),
        };

        match outcome {
            Ok(()) => return Ok(()),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

fn numeric_override(field: Field, value: f64) -> InputOverrides {
    let mut overrides = InputOverrides::default();
    match field {
        Field::Age => overrides.age = Some(value as u32),
        Field::SleepDuration => overrides.sleep_duration = Some(value),
        Field::StressLevel => overrides.stress_level = Some(value as u32),
        Field::DailyScreenTime => overrides.daily_screen_time = Some(value),
        Field::CaffeineIntake => overrides.caffeine_intake = Some(value as u32),
        Field::ReactionTime => overrides.reaction_time = Some(value),
        Field::MemoryTestScore => overrides.memory_test_score = Some(value as u32),
        Field::Gender | Field::DietType | Field::ExerciseFrequency => {}
    }
    overrides
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>, force: bool) -> Result<()> {
    println!();
    println!("Cognitive Score Configuration");
    println!("=============================");
    println!();

    // 1. Default inputs
    let mut record = InputRecord::default();
    let configure_defaults =
        prompt_yes_no("Set your own starting inputs? (n accepts built-in defaults)", true)?;

    if configure_defaults {
        let mut section = None;
        for field in Field::ALL {
            if section != Some(field.section()) {
                section = Some(field.section());
                println!();
                println!("{}", field.section().title());
            }
            prompt_field(field, &mut record)?;
        }
    }

    // 2. Sample data
    println!();
    println!("A CSV of reference measurements enables the sample score distribution.");
    let sample_input = prompt_with_default("Sample data CSV (leave empty to skip)", "")?;
    let sample_data = if sample_input.is_empty() {
        None
    } else {
        Some(PathBuf::from(sample_input))
    };

    // 3. Theme
    let theme = loop {
        let input = prompt_with_default("Form theme (auto/dark/light)", "auto")?;
        match input.to_lowercase().as_str() {
            "auto" => break ThemeMode::Auto,
            "dark" => break ThemeMode::Dark,
            "light" => break ThemeMode::Light,
            other => println!("  Invalid: '{}'. Try again.", other),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        defaults: configure_defaults.then(|| InputOverrides::from_record(&record)),
        sample_data,
        theme,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `cogscore form` to open the interactive form.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_in_range() {
        assert_eq!(parse_numeric(Field::SleepDuration, "7.5"), Ok(7.5));
        assert_eq!(parse_numeric(Field::Age, "59"), Ok(59.0));
    }

    #[test]
    fn test_parse_numeric_rejects_out_of_range() {
        let err = parse_numeric(Field::Age, "60").unwrap_err();
        assert!(err.contains("between 18 and 59"));
    }

    #[test]
    fn test_parse_numeric_rejects_fraction_for_integer_field() {
        assert!(parse_numeric(Field::StressLevel, "5.5").is_err());
    }

    #[test]
    fn test_parse_numeric_rejects_garbage() {
        assert!(parse_numeric(Field::CaffeineIntake, "lots").is_err());
    }

    #[test]
    fn test_parse_choice_case_insensitive() {
        assert_eq!(parse_choice::<DietType>("Vegan"), Ok(DietType::Vegan));
        assert_eq!(parse_choice::<DietType>("non-vegetarian"), Ok(DietType::NonVegetarian));
        assert_eq!(parse_choice::<ExerciseFrequency>("HIGH"), Ok(ExerciseFrequency::High));
        assert!(parse_choice::<Gender>("unknown").is_err());
    }

    #[test]
    fn test_numeric_override_targets_field() {
        let overrides = numeric_override(Field::ReactionTime, 420.5);
        assert_eq!(overrides.reaction_time, Some(420.5));
        assert!(overrides.age.is_none());
    }
}
