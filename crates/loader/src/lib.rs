//! `lavka-loader` — one-shot JSON catalog loading.
//!
//! Parses a catalog file into record DTOs, then builds domain objects through
//! the guarded construction paths so counters, merging and hooks behave
//! exactly as they do for hand-built catalogs.

pub mod loader;
pub mod records;

pub use loader::{LoaderError, load_catalog};
pub use records::{CategoryRecord, KindRecord, ProductRecord};
