//! Error taxonomy shared by the store, the collections and the REST layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::chat::ChatError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} with {field} `{value}` already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("invalid field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: &'static str },

    #[error("storage I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt document {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl Error {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures of the backing files rather than of the request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Corrupt { .. })
    }
}

/// Presence check for a required text field.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "missing required field"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("name", "Mahila Vikas").is_ok());
        let err = require("name", "   ").unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
        assert_eq!(err.to_string(), "invalid field `name`: missing required field");
    }

    #[test]
    fn storage_failures_are_distinguishable() {
        let io = Error::Io {
            path: PathBuf::from("data/loans.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(io.is_storage_failure());
        assert!(!Error::not_found("SHG", "SHG-MP-001").is_storage_failure());
    }
}
