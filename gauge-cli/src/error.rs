//! Structured tool errors
//!
//! Every failure a caller can trigger comes back as a value with a
//! machine-readable code and, where one helps, a suggestion.

use gauge_units::ConversionError;
use serde::Serialize;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const INVALID_QUANTITY: &str = "INVALID_QUANTITY";
    pub const NOT_SIMPLIFIABLE: &str = "NOT_SIMPLIFIABLE";
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
}

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code}] {message}")]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), suggestion: None }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn invalid_params(method: &str, details: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_PARAMS, format!("{}: {}", method, details))
            .with_suggestion("Use units/list to see accepted symbols, or check the parameter names")
    }
}

impl From<ConversionError> for ToolError {
    fn from(err: ConversionError) -> Self {
        let message = err.to_string();
        match err {
            ConversionError::UnknownUnit(_) => Self::new(codes::UNKNOWN_UNIT, message)
                .with_suggestion("Use units/list to see accepted symbols"),
            ConversionError::IncompatibleDimensions { to_dim, .. } => {
                Self::new(codes::INCOMPATIBLE_UNITS, message)
                    .with_suggestion(format!("Pick a target unit of the same family ({})", to_dim))
            }
            ConversionError::InvalidQuantity(_) => Self::new(codes::INVALID_QUANTITY, message)
                .with_suggestion("Write quantities as '<number> <unit>', e.g. '1.5 KB'"),
            ConversionError::NotSimplifiable { .. } => Self::new(codes::NOT_SIMPLIFIABLE, message),
            ConversionError::OutOfRange { .. } => Self::new(codes::INVALID_QUANTITY, message)
                .with_suggestion("Pick a larger target unit or a smaller value"),
        }
    }
}
