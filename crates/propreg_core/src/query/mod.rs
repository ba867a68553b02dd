//! Location and category query over stored listings.
//!
//! # Responsibility
//! - Parse the free-text location expression (`country[,city]`).
//! - Select listings by resolved location ids and category type, then
//!   compose their public views.
//!
//! # Invariants
//! - Location names are matched in the catalog default language; returned
//!   views use the requested display language.
//! - An unresolved location yields an empty result, never an error.
//! - Result order equals the input order of stored listings.

mod filter;
mod location;

pub use filter::{QueryFilter, ResolvedLocation};
pub use location::LocationFilter;
