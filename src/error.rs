//! Error Types
//!
//! One error contract for every backend call and every draft edit.

use std::collections::BTreeMap;

use thiserror::Error;

/// Failure of a backend request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{status} - {status_text}")]
    Status { status: u16, status_text: String },

    #[error("{status} - {status_text} (response is not JSON)")]
    Decode { status: u16, status_text: String },

    #[error("unexpected response: {0}")]
    Malformed(String),

    /// The backend answered with `{success: false, error, errors}`
    #[error("{message}")]
    Rejected {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("no browser window")]
    NoWindow,
}

impl ApiError {
    /// Per-field messages reported by the backend, if any
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            ApiError::Rejected { field_errors, .. } => field_errors.clone(),
            _ => BTreeMap::new(),
        }
    }
}

/// A draft edit that is not allowed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("field '{0}' already exists")]
    FieldExists(String),

    #[error("field '{0}' comes from the template and cannot be removed")]
    NotRemovable(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field name must not be empty")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_message() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "404 - Not Found");
        assert!(err.field_errors().is_empty());
    }

    #[test]
    fn test_rejected_keeps_field_errors() {
        let mut field_errors = BTreeMap::new();
        field_errors.insert("weight".to_string(), "not a number".to_string());
        let err = ApiError::Rejected {
            message: "Invalid item".to_string(),
            field_errors,
        };
        assert_eq!(err.to_string(), "Invalid item");
        assert_eq!(err.field_errors()["weight"], "not a number");
    }
}
