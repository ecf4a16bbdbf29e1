//! Retry status of a chained error

use strum_macros::{Display, IntoStaticStr};

/// Whether the caller may re-issue the query that failed.
///
/// A chained error starts out `Temporary` when its kind is retryable and
/// `Permanent` otherwise. Once a retry loop gives up, it calls
/// [`ChainedError::persist`](crate::ChainedError::persist) and the status
/// becomes `Persistent`, which later wrapping keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorStatus {
    #[default]
    Permanent,
    Temporary,
    Persistent,
}

impl ErrorStatus {
    pub(crate) fn for_kind(kind: crate::ErrorKind) -> Self {
        if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        }
    }

    pub fn is_retryable(&self) -> bool {
        *self == ErrorStatus::Temporary
    }

    /// Give up on a temporary failure. Other statuses are unchanged.
    pub fn persist(self) -> Self {
        if self.is_retryable() {
            ErrorStatus::Persistent
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
