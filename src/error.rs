//! Error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Terminal failure of a roster run.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The request is malformed; no attempt was made.
    #[error("invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The attempt budget ran out without an accepted schedule.
    #[error("no acceptable roster found after {attempts} attempts")]
    Infeasible {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// The run configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A serialized request could not be parsed.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] toml::de::Error),
}

impl RosterError {
    /// Whether the caller should relax the request and try again.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias.
pub type Result<T, E = RosterError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message() {
        let err = RosterError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate agent: Ana"),
            ValidationError::new(ValidationErrorKind::InvalidQuota, "Agent 'Bia' has quota 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate agent: Ana; Agent 'Bia' has quota 0"
        );
        assert!(!err.is_infeasible());
    }

    #[test]
    fn test_infeasible_message() {
        let err = RosterError::Infeasible { attempts: 1000 };
        assert_eq!(
            err.to_string(),
            "no acceptable roster found after 1000 attempts"
        );
        assert!(err.is_infeasible());
    }
}
