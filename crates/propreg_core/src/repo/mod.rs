//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for listings.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod property_repo;

pub use property_repo::{
    PropertyRepository, RepoError, RepoResult, SqlitePropertyRepository,
};
