use serde::Serialize;
use thiserror::Error;

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", describe(.0))]
    Validation(Vec<FieldError>),
}

impl ModelError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError { field: field.to_string(), message: message.into() }])
    }

    pub fn fields(&self) -> &[FieldError] {
        match self {
            Self::Validation(errs) => errs,
        }
    }
}

fn describe(errs: &[FieldError]) -> String {
    errs.iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates field errors so a request reports every problem at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    /// Non-blank string.
    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn required_opt(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.required(field, v);
        }
    }

    pub fn into_result(self) -> Result<(), ModelError> {
        if self.0.is_empty() { Ok(()) } else { Err(ModelError::Validation(self.0)) }
    }
}
