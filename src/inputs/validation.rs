use super::fields::Field;
use super::types::InputRecord;

/// Validate a record against the form's ranges before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_inputs(record: &InputRecord) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for field in Field::ALL {
        let (Some(bounds), Some(value)) = (field.bounds(), field.numeric_value(record)) else {
            // Categorical fields are closed enums
            continue;
        };

        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", field.key()));
            continue;
        }

        if value < bounds.min || value > bounds.max {
            errors.push(format!(
                "{}: {} is outside the allowed range {}..={}",
                field.key(),
                field.display_value(record),
                bounds.min,
                bounds.max
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
