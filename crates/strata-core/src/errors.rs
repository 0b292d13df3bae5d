//! Unified validation error for Strata operations
//!
//! Every validator in the workspace reports the first invariant it finds
//! violated as a [`ValidationError`]. Variants map one-to-one onto the error
//! classes callers branch on: grammar, encoding, symbol mismatch, bounds,
//! structure and cryptographic verification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error class of a [`ValidationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Malformed account name or permlink
    Grammar,
    /// Non-UTF-8 text, invalid JSON, undecodable bytes
    Encoding,
    /// Wrong asset symbol in a monetary field
    TypeMismatch,
    /// Value outside its permitted bounds
    Range,
    /// Ordering, uniqueness or self-reference violation
    Structural,
    /// Recovered key or recomputed work does not match the claim
    Crypto,
    /// Rejected protocol configuration
    Config,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Grammar => "grammar",
            ErrorCategory::Encoding => "encoding",
            ErrorCategory::TypeMismatch => "type-mismatch",
            ErrorCategory::Range => "range",
            ErrorCategory::Structural => "structural",
            ErrorCategory::Crypto => "crypto",
            ErrorCategory::Config => "config",
        };
        f.write_str(name)
    }
}

/// Typed validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    /// A name or permlink failed its grammar check
    #[error("Invalid {field} '{value}': {reason}")]
    Grammar {
        /// Field holding the offending value
        field: String,
        /// The rejected value
        value: String,
        /// Which grammar rule was broken
        reason: String,
    },

    /// Text or binary payload could not be decoded
    #[error("Bad encoding in {field}: {reason}")]
    Encoding {
        /// Field holding the offending payload
        field: String,
        /// Decoder failure description
        reason: String,
    },

    /// Monetary field carries the wrong symbol
    #[error("Symbol mismatch in {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Field holding the offending asset
        field: String,
        /// Accepted symbol(s)
        expected: String,
        /// Symbol actually present
        actual: String,
    },

    /// Value out of bounds
    #[error("Out of range {field}: {message}")]
    Range {
        /// Field holding the offending value
        field: String,
        /// Description of the violated bound
        message: String,
    },

    /// Ordering, uniqueness or party constraint violated
    #[error("Structural: {message}")]
    Structural {
        /// Description of the violated constraint
        message: String,
    },

    /// Cryptographic verification failed
    #[error("Crypto: {message}")]
    Crypto {
        /// Description of the verification failure
        message: String,
    },

    /// Protocol configuration rejected
    #[error("Config: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl ValidationError {
    /// Create a grammar error
    pub fn grammar(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Grammar {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a symbol mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a range error
    pub fn range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a structural error
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Error class of this failure
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Grammar { .. } => ErrorCategory::Grammar,
            Self::Encoding { .. } => ErrorCategory::Encoding,
            Self::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            Self::Range { .. } => ErrorCategory::Range,
            Self::Structural { .. } => ErrorCategory::Structural,
            Self::Crypto { .. } => ErrorCategory::Crypto,
            Self::Config { .. } => ErrorCategory::Config,
        }
    }
}

/// Standard Result type for validation
pub type Result<T> = std::result::Result<T, ValidationError>;

impl From<secp256k1::Error> for ValidationError {
    fn from(err: secp256k1::Error) -> Self {
        Self::crypto(err.to_string())
    }
}

/// Return early with the given error unless the condition holds.
///
/// The error expression is only evaluated on failure.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}
