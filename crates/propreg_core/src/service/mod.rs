//! Listing use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads/writes and view composition into
//!   use-case level APIs.
//! - Keep CLI callers decoupled from storage and catalog details.
//!
//! # Invariants
//! - Owner-side operations verify ownership before touching the catalog or
//!   writing anything.

pub mod edit_service;
pub mod registration_service;
pub mod view_service;

use serde::de::IgnoredAny;

/// True when `json` is non-blank, syntactically valid JSON.
fn is_valid_json(json: &str) -> bool {
    !json.trim().is_empty() && serde_json::from_str::<IgnoredAny>(json).is_ok()
}
