//! Search criteria error types

/// Errors raised while building or compiling search criteria.
///
/// These are programmer errors and fail fast: a silently-dropped clause
/// would compile to a filter that returns more rows than intended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    /// An operator name that is not part of the filter dialect.
    #[error("Unknown operator '{operator}' for field '{field}'")]
    UnknownOperator { field: String, operator: String },

    /// A `between` operand list whose length is not exactly two.
    #[error("'between' on field '{field}' requires exactly two operands, got {len}")]
    BetweenArity { field: String, len: usize },

    /// A field name rejected by a strict mapping.
    #[error("Field '{field}' is not a known search field")]
    UnknownField { field: String },

    /// A value that cannot appear in a filter literal.
    #[error("Unsupported value for field '{field}': {message}")]
    Unsupported { field: String, message: String },
}

impl CriteriaError {
    /// Creates a new unknown-operator error.
    pub fn unknown_operator(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnknownOperator {
            field: field.into(),
            operator: operator.into(),
        }
    }

    /// Creates a new between-arity error.
    pub fn between_arity(field: impl Into<String>, len: usize) -> Self {
        Self::BetweenArity {
            field: field.into(),
            len,
        }
    }

    /// Creates a new unknown-field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a new unsupported-value error.
    pub fn unsupported(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unsupported {
            field: field.into(),
            message: message.into(),
        }
    }
}
