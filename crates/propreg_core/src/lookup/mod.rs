//! Lookup resolution between catalog ids and display names.
//!
//! # Responsibility
//! - Turn reference ids embedded in documents into display names.
//! - Turn free-text names from queries into catalog ids.
//!
//! # Invariants
//! - An id `<= 0` is never looked up and never touches the catalog.
//! - A blank name is never looked up and never touches the catalog.
//! - Listings are scanned linearly; the first match wins.

mod resolver;

pub use resolver::{find_id_by_name, resolve_name, LookupResolver, Named};
