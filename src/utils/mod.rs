//! Shared utilities.

pub mod date;

pub use date::{ResolvedAsOf, parse_as_of_date, resolve_as_of};
