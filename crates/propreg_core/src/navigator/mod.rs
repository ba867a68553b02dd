//! Document navigation over opaque property documents.
//!
//! # Responsibility
//! - Read and update the two known sub-trees of a hotel document (address and
//!   layout) through a typed partial schema.
//! - Keep every other key of the document untouched.
//!
//! # Invariants
//! - Only `DocumentType::HotelJson` is navigable; other types are rejected
//!   before any parsing happens.
//! - Parse followed by re-serialization with no names written reproduces the
//!   document text, key order and explicit `null`s included.

use crate::model::property::DocumentType;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod hotel;
mod peek;

pub(crate) use hotel::ensure_navigable;
pub use hotel::{AddressIds, HotelDocument, LayoutIds};
pub use peek::{peek_first_image_url, peek_property_name};

pub type NavigatorResult<T> = Result<T, NavigatorError>;

/// Failures while parsing or navigating a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// The document type has no navigable schema.
    UnsupportedDocumentType(DocumentType),
    /// The document text is not valid JSON for the expected schema.
    MalformedDocument(String),
    /// A required sub-tree is missing; carries its dotted path.
    UnsupportedDocumentShape(&'static str),
}

impl Display for NavigatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedDocumentType(doc_type) => {
                write!(f, "unsupported document type: {}", doc_type.as_str())
            }
            Self::MalformedDocument(message) => write!(f, "malformed document: {message}"),
            Self::UnsupportedDocumentShape(path) => {
                write!(f, "unsupported document shape: `{path}` is missing")
            }
        }
    }
}

impl Error for NavigatorError {}

impl From<serde_json::Error> for NavigatorError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedDocument(value.to_string())
    }
}
