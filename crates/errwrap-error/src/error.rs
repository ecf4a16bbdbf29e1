//! The chained error type.

use crate::{ErrorKind, ErrorStatus};
use std::error::Error as StdError;
use std::fmt;

/// Any error that can sit underneath a [`ChainedError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error that annotates an underlying cause with context.
///
/// The data layer builds one when a query fails, recording the query
/// descriptor as `context` and the store's error as `cause`. Each layer above
/// may [`wrap`](ChainedError::wrap) it again. The cause is owned, so a chain
/// always ends at a leaf and cannot loop back on itself.
pub struct ChainedError {
    kind: ErrorKind,
    status: ErrorStatus,
    operation: &'static str,
    context: String,
    fields: Vec<(&'static str, String)>,
    cause: BoxError,
}

impl ChainedError {
    /// Wrap `cause` with a context payload.
    ///
    /// The kind is inherited from the first classified level of the cause's
    /// chain, falling back to [`ErrorKind::Unexpected`] for foreign errors.
    pub fn new<E>(context: impl Into<String>, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        let cause = cause.into();
        let kind = crate::kind_of(cause.as_ref()).unwrap_or(ErrorKind::Unexpected);
        let status = match cause.downcast_ref::<ChainedError>() {
            Some(inner) => inner.status,
            None => ErrorStatus::for_kind(kind),
        };

        Self {
            kind,
            status,
            operation: "",
            context: context.into(),
            fields: Vec::new(),
            cause,
        }
    }

    /// Wrap this error once more, so the caller's layer shows up in the chain.
    pub fn wrap(self, context: impl Into<String>) -> Self {
        Self::new(context, self)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The context payload this level added.
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// The error directly underneath this one.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    /// Check whether `target` appears anywhere in this chain.
    pub fn is<T>(&self, target: &T) -> bool
    where
        T: StdError + PartialEq + 'static,
    {
        crate::is(self, target)
    }

    /// Check whether this very error value sits somewhere in this chain.
    pub fn contains(&self, target: &(dyn StdError + 'static)) -> bool {
        crate::contains(self, target)
    }

    /// Mark as persistent after failed retries.
    pub fn persist(mut self) -> Self {
        self.status = self.status.persist();
        self
    }

    /// Set the function that raised this error.
    ///
    /// A previously set operation is kept in the fields as `called`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.fields.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.status.is_retryable()
    }
}

impl fmt::Display for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "err: {}, context: {}", self.cause, self.context)
    }
}

impl fmt::Debug for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.status)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        writeln!(f)?;
        writeln!(f, "    Context: {}", self.context)?;

        if !self.fields.is_empty() {
            writeln!(f, "    Fields:")?;
            for (key, value) in &self.fields {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        write!(f, "    Cause: {:?}", self.cause)
    }
}

impl StdError for ChainedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Wrap `err` with an extra layer of context.
pub fn wrap<E>(err: E, context: impl Into<String>) -> ChainedError
where
    E: Into<BoxError>,
{
    ChainedError::new(context, err)
}

/// Wrap the error side of a `Result` on its way up.
pub trait ResultExt<T> {
    fn wrap_err(self, context: impl Into<String>) -> crate::Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BoxError>,
{
    fn wrap_err(self, context: impl Into<String>) -> crate::Result<T> {
        self.map_err(|err| ChainedError::new(context, err))
    }
}
