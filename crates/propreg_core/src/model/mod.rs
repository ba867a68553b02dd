//! Domain model for property listings, catalog references and views.
//!
//! # Responsibility
//! - Define the stored property record and its ownership row.
//! - Define read-only catalog reference entities.
//! - Define transient view projections returned to readers and owners.
//!
//! # Invariants
//! - A reference id `<= 0` means "unset"; no catalog lookup is made for it.
//! - Views are composed per read and never written back to storage.

pub mod catalog;
pub mod property;
pub mod view;
