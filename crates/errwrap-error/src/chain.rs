//! Walking an error chain.
//!
//! Every operation here goes through `std::error::Error::source`, so the
//! chain may mix [`ChainedError`] levels with foreign errors that expose their
//! own sources.

use std::error::Error as StdError;
use std::fmt::Write;

use crate::{ChainedError, ErrorKind, LeafError};

/// Iterator over an error and every cause beneath it, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// The immediate cause of `err`, or `None` at a leaf.
pub fn cause_of<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// One-level rendering: `err: <cause>, context: <context>` for chained errors.
pub fn describe(err: &dyn StdError) -> String {
    err.to_string()
}

/// Check whether `target` appears anywhere in the chain starting at `err`,
/// `err` itself included.
pub fn is<T>(err: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    chain(err).any(|level| level.downcast_ref::<T>() == Some(target))
}

/// Check whether `target`, compared by address, appears in the chain starting
/// at `err`.
///
/// Use this for errors without `PartialEq`, such as a [`ChainedError`] taken
/// from further down the same chain.
pub fn contains(err: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    chain(err).any(|level| std::ptr::addr_eq(level, target))
}

/// The first classified kind in the chain.
pub fn kind_of(err: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    chain(err).find_map(|level| {
        if let Some(leaf) = level.downcast_ref::<LeafError>() {
            Some(leaf.kind())
        } else {
            level.downcast_ref::<ChainedError>().map(ChainedError::kind)
        }
    })
}

/// What a single level contributes to the chain.
///
/// Chained levels print their context and, when set, the raising operation;
/// any other error prints its own message.
pub fn describe_level(level: &(dyn StdError + 'static)) -> String {
    match level.downcast_ref::<ChainedError>() {
        Some(chained) if chained.operation().is_empty() => chained.context().to_string(),
        Some(chained) => format!("{} ({})", chained.context(), chained.operation()),
        None => level.to_string(),
    }
}

/// Render every level on its own line, outermost first.
pub fn render_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = String::new();
    for (depth, level) in chain(err).enumerate() {
        if depth > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{depth}: {}", describe_level(level));
    }
    out
}
