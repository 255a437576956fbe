//! Error types for statement construction and rendering.
//!
//! Every failure in this crate is a programmer-input error: nothing is
//! retried and nothing is recovered internally. Each variant carries the
//! alias value, expression text or field name needed to diagnose the
//! problem without reproducing the builder chain.

/// Result type for builder and render operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors raised while building or rendering a SELECT statement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    /// An alias value is already registered in the statement.
    #[error("Alias '{alias}' is already registered")]
    DuplicateAlias { alias: String },

    /// A field descriptor could not be constructed.
    #[error("Invalid field on entity '{entity}': {reason}")]
    InvalidField { entity: String, reason: String },

    /// A member expression could not be resolved to a column name.
    #[error("Cannot resolve member '{entity}.{member}': {reason}")]
    FieldResolution {
        entity: String,
        member: String,
        reason: String,
    },

    /// A join condition is not a usable equality between two entities.
    #[error("{message}: {expr}")]
    Join { message: String, expr: String },

    /// The statement references an alias that is not part of it.
    #[error("Alias '{alias}' for entity '{entity}' is not registered in the statement ({context})")]
    InvalidState {
        alias: String,
        entity: String,
        context: String,
    },

    /// A filter term is malformed.
    #[error("Invalid filter '{template}': {reason}")]
    InvalidFilter { template: String, reason: String },
}

impl SelectError {
    pub(crate) fn join(message: &str, expr: impl std::fmt::Display) -> Self {
        SelectError::Join {
            message: message.to_string(),
            expr: expr.to_string(),
        }
    }

    pub(crate) fn invalid_filter(template: &str, reason: impl Into<String>) -> Self {
        SelectError::InvalidFilter {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_alias_message() {
        let err = SelectError::DuplicateAlias { alias: "pa".into() };
        assert_eq!(err.to_string(), "Alias 'pa' is already registered");
    }

    #[test]
    fn test_join_message_carries_expression() {
        let err = SelectError::join("Invalid join expression", "Person.Id < Passport.PersonId");
        assert_eq!(
            err.to_string(),
            "Invalid join expression: Person.Id < Passport.PersonId"
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let err = SelectError::InvalidState {
            alias: "pa".into(),
            entity: "Person".into(),
            context: "select list".into(),
        };
        assert!(err.to_string().contains("'pa'"));
        assert!(err.to_string().contains("select list"));
    }
}
