//! Business-layer handling of data-access errors.
//!
//! An empty result can be ordinary (an account with no orders yet) or a hard
//! failure (an account id that resolves to nothing). Only this layer knows
//! which, so the decision lives here and not in [`crate::dao`].

use std::error::Error as StdError;

use errwrap_error::{NO_ROWS, Result, is, render_chain};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};

/// What to do when the data layer reports [`NO_ROWS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NoRowsPolicy {
    /// Treat the empty result as "nothing found" and carry on.
    Ignore,
    /// The record was required; report the failure upwards.
    #[default]
    Fail,
}

/// Whether `err` is, or wraps, the no-rows sentinel.
pub fn is_no_rows(err: &(dyn StdError + 'static)) -> bool {
    let found = is(err, &NO_ROWS);
    debug!(
        error = %err,
        chain = %render_chain(err),
        no_rows = found,
        "inspected data-layer error"
    );
    found
}

/// Apply `policy` to a data-layer result.
///
/// Successful rows come back as `Some`. A no-rows failure becomes `None`
/// under [`NoRowsPolicy::Ignore`], or is wrapped and returned under
/// [`NoRowsPolicy::Fail`]. Every other error is forwarded as is.
pub fn absorb_no_rows<T>(result: Result<T>, policy: NoRowsPolicy) -> Result<Option<T>> {
    let err = match result {
        Ok(value) => return Ok(Some(value)),
        Err(err) => err,
    };

    if !is_no_rows(&err) {
        return Err(err);
    }

    match policy {
        NoRowsPolicy::Ignore => {
            info!(query = err.context(), "no rows, continuing");
            Ok(None)
        }
        NoRowsPolicy::Fail => {
            warn!(query = err.context(), "required record missing");
            Err(err.wrap("required record missing"))
        }
    }
}

/// Run `query`, re-running it up to `retries` more times while it fails with
/// a retryable error.
///
/// When the budget runs out on a retryable failure the error is marked
/// persistent. Non-retryable errors return on the first attempt.
pub fn retry_query<T>(retries: u32, mut query: impl FnMut() -> Result<T>) -> Result<T> {
    let mut attempt = 0;
    loop {
        let err = match query() {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retryable() {
            return Err(err);
        }
        if attempt == retries {
            if retries > 0 {
                warn!(query = err.context(), attempts = attempt + 1, "giving up");
                return Err(err.persist());
            }
            return Err(err);
        }

        attempt += 1;
        debug!(query = err.context(), attempt, "retrying");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errwrap_error::{ChainedError, ErrorKind, ErrorStatus, LeafError};
    use std::str::FromStr;

    #[test]
    fn test_policy_parse() {
        assert_eq!(NoRowsPolicy::from_str("ignore"), Ok(NoRowsPolicy::Ignore));
        assert_eq!(NoRowsPolicy::default().to_string(), "fail");
    }

    #[test]
    fn test_ok_passes_through() {
        let out = absorb_no_rows(Ok(7), NoRowsPolicy::Fail).unwrap();
        assert_eq!(out, Some(7));
    }

    #[test]
    fn test_ignore_no_rows() {
        let result: Result<u32> = Err(ChainedError::new("q", NO_ROWS));
        assert_eq!(absorb_no_rows(result, NoRowsPolicy::Ignore).unwrap(), None);
    }

    #[test]
    fn test_fail_wraps_no_rows() {
        let result: Result<u32> = Err(ChainedError::new("q", NO_ROWS));
        let err = absorb_no_rows(result, NoRowsPolicy::Fail).unwrap_err();
        assert_eq!(err.context(), "required record missing");
        assert!(is_no_rows(&err));
    }

    #[test]
    fn test_other_errors_untouched() {
        let leaf = LeafError::new(ErrorKind::ConnectionFailed, "refused");
        let result: Result<u32> = Err(ChainedError::new("q", leaf));
        let err = absorb_no_rows(result, NoRowsPolicy::Ignore).unwrap_err();
        assert_eq!(err.context(), "q");
        assert!(err.is_retryable());
    }

    fn refused() -> Result<u32> {
        let leaf = LeafError::new(ErrorKind::ConnectionFailed, "refused");
        Err(ChainedError::new("q", leaf))
    }

    #[test]
    fn test_retry_until_success() {
        let mut calls = 0;
        let out = retry_query(3, || {
            calls += 1;
            if calls < 3 { refused() } else { Ok(calls) }
        });
        assert_eq!(out.unwrap(), 3);
    }

    #[test]
    fn test_retry_budget_exhausted() {
        let mut calls = 0;
        let err = retry_query(2, || {
            calls += 1;
            refused()
        })
        .unwrap_err();
        assert_eq!(calls, 3);
        assert_eq!(err.status(), ErrorStatus::Persistent);
    }

    #[test]
    fn test_no_budget_keeps_temporary() {
        let err = retry_query(0, refused).unwrap_err();
        assert_eq!(err.status(), ErrorStatus::Temporary);
    }

    #[test]
    fn test_permanent_not_retried() {
        let mut calls = 0;
        let err = retry_query(5, || -> Result<u32> {
            calls += 1;
            Err(ChainedError::new("q", NO_ROWS))
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.status(), ErrorStatus::Permanent);
    }
}
