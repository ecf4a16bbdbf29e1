//! Terminal errors and the well-known sentinels.

use std::fmt;

use crate::ErrorKind;

/// An error with no cause.
///
/// Leaves are plain values: two leaves are the same error when kind and
/// message match, which is what [`is`](crate::is) compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafError {
    kind: ErrorKind,
    message: &'static str,
}

impl LeafError {
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for LeafError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for LeafError {}

/// Returned by the data layer when a query matched nothing.
///
/// Whether that is a failure is for the business layer to decide, so test for
/// it with [`is`](crate::is) rather than by matching the top-level error.
pub static NO_ROWS: LeafError = LeafError::new(ErrorKind::NoRows, "no rows in result set");
