//! View composition over stored listings.
//!
//! # Responsibility
//! - Enrich one stored document into a public or owner-facing view.
//! - Run per-document work over a batch on a bounded worker pool.
//!
//! # Invariants
//! - Ownership is verified before any catalog call of the edit flow.
//! - Batch output order equals input order; the first error fails the batch.

mod batch;
mod composer;

pub use batch::BatchRunner;
pub use composer::{ensure_owner, ViewComposer};
