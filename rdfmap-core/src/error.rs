//! Error types for rdfmap-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, MappingError>;

/// Marshalling error
///
/// `toGraph`/`fromGraph` either succeed or fail with one of these. Low-level
/// literal failures are reclassified as `InvalidMapping` at the member
/// assignment boundary and keep the original error as their `source`.
#[derive(Error, Debug)]
pub enum MappingError {
    /// A type or instance lacks a required mapping capability, or a member
    /// assignment failed unrecoverably
    #[error("Invalid mapping: {message}")]
    InvalidMapping {
        message: String,
        #[source]
        source: Option<Box<MappingError>>,
    },

    /// A literal cannot be decoded to any usable native value
    #[error("Unsupported literal \"{lexical}\"^^<{datatype}>: {reason}")]
    UnsupportedLiteral {
        datatype: String,
        lexical: String,
        reason: String,
    },

    /// More than one acceptable value for a single-valued member
    #[error("Ambiguous value for member '{member}': {count} candidates for a single-valued member")]
    AmbiguousValue { member: String, count: usize },

    /// Asserted class has no registered type (soft; logged, never returned
    /// from the top-level operations)
    #[error("Unknown type: no registered type for class <{class}>")]
    UnknownType { class: String },

    /// Graph source failure
    #[error("Graph source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MappingError {
    /// Create an invalid mapping error
    pub fn invalid(msg: impl Into<String>) -> Self {
        MappingError::InvalidMapping {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an invalid mapping error chained to its cause
    pub fn invalid_with(msg: impl Into<String>, cause: MappingError) -> Self {
        MappingError::InvalidMapping {
            message: msg.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Create an unsupported literal error
    pub fn unsupported_literal(
        datatype: impl Into<String>,
        lexical: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MappingError::UnsupportedLiteral {
            datatype: datatype.into(),
            lexical: lexical.into(),
            reason: reason.into(),
        }
    }

    /// Follow the `InvalidMapping` chain down to the originating error
    pub fn root_cause(&self) -> &MappingError {
        match self {
            MappingError::InvalidMapping {
                source: Some(cause),
                ..
            } => cause.root_cause(),
            other => other,
        }
    }

    /// Check if this is (or wraps) an ambiguous value error
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.root_cause(), MappingError::AmbiguousValue { .. })
    }

    /// Check if this is an invalid mapping error
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self, MappingError::InvalidMapping { .. })
    }
}

/// Errors reported by a `GraphSource`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The source does not implement the requested capability
    #[error("Operation not supported by this source: {0}")]
    Unsupported(String),

    /// The source rejected or failed to evaluate a query
    #[error("Query failed: {0}")]
    Query(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Failure to store a value into a record member
///
/// `Mismatch` is the lenient case: the value decoded fine but does not fit
/// the member, so the member is left unset and a warning is logged. Every
/// other variant aborts materialization of the record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    /// Value kind does not fit the member
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Record has no member with this name
    #[error("unknown member '{0}'")]
    UnknownMember(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl AssignError {
    /// Create a mismatch error
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        AssignError::Mismatch { expected, found }
    }

    /// Check if this is the lenient mismatch case
    pub fn is_mismatch(&self) -> bool {
        matches!(self, AssignError::Mismatch { .. })
    }
}
