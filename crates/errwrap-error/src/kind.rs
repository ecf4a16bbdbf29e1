//! Error kinds for data-access failures

use strum_macros::{Display, EnumString, IntoStaticStr};

/// The kind of failure at the bottom of an error chain.
///
/// A chained error inherits the kind of whatever it wraps, so the business
/// layer can match on the kind without caring how many layers annotated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, EnumString)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Anything not classified below, including foreign errors
    Unexpected,

    /// The query matched no rows
    NoRows,

    /// The query was rejected before it reached the store
    InvalidQuery,

    /// The store could not be reached
    ConnectionFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Only an unreachable store is worth asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ConnectionFailed)
    }
}
