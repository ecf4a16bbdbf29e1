//! Stub data-access layer.
//!
//! Nothing here talks to a store. Each query fails the way a real driver
//! would, and the layer only annotates the failure with the query it ran:
//! it cannot tell whether an empty result matters, so it forwards
//! [`NO_ROWS`] untouched for the business layer to judge.

use errwrap_error::{ChainedError, ErrorKind, LeafError, NO_ROWS, Result};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

/// A fetched row. The stubs never produce one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub values: Vec<String>,
}

/// The canned data-access failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Scenario {
    /// The query ran and matched nothing.
    NoRows,
    /// The query was malformed and never ran.
    InvalidQuery,
    /// Like `NoRows`, with one extra layer of wrapping.
    NoRowsWrapped,
    /// The store refused the connection; asking again may work.
    ConnectionRefused,
}

impl Scenario {
    /// Run the stub query behind this scenario.
    pub fn run(self) -> Result<Row> {
        match self {
            Scenario::NoRows => query_returning_no_rows(),
            Scenario::InvalidQuery => query_with_invalid_text(),
            Scenario::NoRowsWrapped => query_returning_no_rows_wrapped(),
            Scenario::ConnectionRefused => query_against_unreachable_store(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// A query the store answers with an empty result set.
pub fn query_returning_no_rows() -> Result<Row> {
    let query = "query_returning_no_rows";
    debug!(query, "store returned no rows");
    Err(ChainedError::new(query, NO_ROWS).with_operation("dao::query_returning_no_rows"))
}

/// A query rejected by validation before it reaches the store.
///
/// Validation belongs to this layer, so the leaf message carries the `dao:`
/// prefix.
pub fn query_with_invalid_text() -> Result<Row> {
    let query = "query_with_invalid_text";
    debug!(query, "query rejected");
    let cause = LeafError::new(ErrorKind::InvalidQuery, "dao: invalid query");
    Err(ChainedError::new(query, cause).with_operation("dao::query_with_invalid_text"))
}

pub fn query_returning_no_rows_wrapped() -> Result<Row> {
    let query = "query_returning_no_rows_wrapped";
    debug!(query, "store returned no rows");
    let err = ChainedError::new(query, NO_ROWS)
        .with_operation("dao::query_returning_no_rows_wrapped")
        .wrap("wrapped err");
    Err(err)
}

/// A query whose connection is refused before it runs.
pub fn query_against_unreachable_store() -> Result<Row> {
    let query = "query_against_unreachable_store";
    debug!(query, "store unreachable");
    let cause = LeafError::new(ErrorKind::ConnectionFailed, "dao: connection refused");
    Err(ChainedError::new(query, cause).with_operation("dao::query_against_unreachable_store"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use errwrap_error::ErrorStatus;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scenario_names() {
        let names: Vec<&str> = Scenario::iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["no-rows", "invalid-query", "no-rows-wrapped", "connection-refused"]
        );
        assert_eq!(Scenario::from_str("invalid-query"), Ok(Scenario::InvalidQuery));
    }

    #[test]
    fn test_every_scenario_fails() {
        for scenario in Scenario::iter() {
            assert!(scenario.run().is_err(), "{scenario} unexpectedly succeeded");
        }
    }

    #[test]
    fn test_context_is_query() {
        let err = query_returning_no_rows().unwrap_err();
        assert_eq!(err.context(), "query_returning_no_rows");
        assert_eq!(err.operation(), "dao::query_returning_no_rows");
    }

    #[test]
    fn test_refused_connection_is_temporary() {
        let err = query_against_unreachable_store().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
        assert_eq!(err.status(), ErrorStatus::Temporary);
    }

    #[test]
    fn test_wrapped_outer_context() {
        let err = query_returning_no_rows_wrapped().unwrap_err();
        assert_eq!(err.context(), "wrapped err");
        assert_eq!(err.kind(), ErrorKind::NoRows);
    }
}
