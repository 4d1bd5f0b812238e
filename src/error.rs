use thiserror::Error;

use crate::scenario::InputField;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Division by zero: {context}")]
    DivideByZero { context: String },

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Could not parse {field}: {reason}")]
    Parse { field: String, reason: String },

    #[error("Missing input: {}", .0.name())]
    MissingInput(InputField),

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Result out of range: {context}")]
    OutOfRange { context: String },
}

impl CalcError {
    pub(crate) fn divide_by_zero(context: impl Into<String>) -> Self {
        CalcError::DivideByZero {
            context: context.into(),
        }
    }

    pub(crate) fn out_of_range(context: impl Into<String>) -> Self {
        CalcError::OutOfRange {
            context: context.into(),
        }
    }
}
