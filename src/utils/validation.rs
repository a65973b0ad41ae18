//! Validation helpers
//!
//! Checks that the `validator` derive cannot express (strictly positive
//! numbers, fields of a partial update) and a collector that turns them
//! into a single `ValidationErrors`.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        let mut error = ValidationError::new("positive");
        error.message = Some(Cow::from("must be greater than zero"));
        error.add_param(Cow::from("value"), &value);
        return Err(error);
    }
    Ok(())
}

pub fn validate_non_negative(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        let mut error = ValidationError::new("non_negative");
        error.message = Some(Cow::from("must not be negative"));
        error.add_param(Cow::from("value"), &value);
        return Err(error);
    }
    Ok(())
}

pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::from("min"), &min);
        error.add_param(Cow::from("max"), &max);
        error.add_param(Cow::from("actual"), &len);
        return Err(error);
    }
    Ok(())
}

/// Accumulates per-field failures
#[derive(Debug)]
pub struct FieldChecks {
    errors: ValidationErrors,
}

impl Default for FieldChecks {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldChecks {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    pub fn check(mut self, field: &'static str, result: Result<(), ValidationError>) -> Self {
        if let Err(error) = result {
            self.errors.add(field, error);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
