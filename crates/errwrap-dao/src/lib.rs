//! Data-access and business layers wired through `errwrap-error`.
//!
pub mod business;
pub mod dao;

pub use business::{NoRowsPolicy, absorb_no_rows, is_no_rows, retry_query};
pub use dao::{Row, Scenario};
