//! # errwrap-error
//!
//! Error chains that keep the original cause inspectable after every layer
//! has added its own context.
//!
//! ## Design Philosophy
//!
//! - **LeafError**: a terminal error with a fixed identity, such as [`NO_ROWS`]
//! - **ChainedError**: a cause plus the context the raising layer knew about
//! - **ErrorKind**: inherited from the bottom of the chain, for matching
//! - **ErrorStatus**: decide whether the failed query may be retried
//!
//! ## Usage
//!
//! ```rust
//! use errwrap_error::{ChainedError, NO_ROWS, is};
//!
//! fn find_account() -> errwrap_error::Result<()> {
//!     Err(ChainedError::new("select * from accounts where id = ?", NO_ROWS)
//!         .with_operation("dao::find_account"))
//! }
//!
//! let err = find_account().unwrap_err().wrap("loading profile");
//! assert!(is(&err, &NO_ROWS));
//! ```
//!
//! ## Principles
//!
//! - The data layer annotates and forwards, it never decides
//! - Test for sentinels with [`is`], never by comparing the top-level error
//! - Wrap once per layer so the chain reads like a trace

mod chain;
mod error;
mod kind;
mod leaf;
mod status;

pub use chain::{
    Chain, cause_of, chain, contains, describe, describe_level, is, kind_of, render_chain,
};
pub use error::{BoxError, ChainedError, ResultExt, wrap};
pub use kind::ErrorKind;
pub use leaf::{LeafError, NO_ROWS};
pub use status::ErrorStatus;

/// Result type alias using ChainedError
pub type Result<T> = std::result::Result<T, ChainedError>;
