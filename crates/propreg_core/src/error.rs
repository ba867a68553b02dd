//! Top-level error taxonomy of the view engine and its services.
//!
//! # Invariants
//! - Every variant rejects the whole requested operation; no partial views
//!   are returned alongside an error.
//! - An unresolvable reference id is not an error and never appears here.
//! - Transient catalog failures are carried unchanged, never downgraded to
//!   "not found".

use crate::catalog::CatalogError;
use crate::model::catalog::CatalogId;
use crate::model::property::{DocumentType, PropertyId, UserId};
use crate::navigator::NavigatorError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PropertyResult<T> = Result<T, PropertyError>;

#[derive(Debug)]
pub enum PropertyError {
    /// Stored JSON is broken or does not fit the typed sub-trees.
    MalformedDocument(String),
    /// Document kind has no navigable schema.
    UnsupportedDocumentType(DocumentType),
    /// A required sub-tree is missing; carries its dotted path.
    UnsupportedDocumentShape(&'static str),
    DocumentNotFound(PropertyId),
    /// Listing has no registered owner.
    UnknownOwner(PropertyId),
    /// Requester is not the registered owner.
    NotOwner {
        property_id: PropertyId,
        requester_id: UserId,
    },
    /// Category id no longer resolves in the catalog.
    UnsupportedCategory(CatalogId),
    /// Property type id no longer resolves in the catalog.
    UnsupportedPropertyType(CatalogId),
    TransientCatalogFailure(CatalogError),
    /// Registration input rejected.
    InvalidPropertyData(&'static str),
    /// Owner update input rejected.
    InvalidPropertyUpdate(&'static str),
    Repo(RepoError),
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDocument(message) => write!(f, "malformed document: {message}"),
            Self::UnsupportedDocumentType(doc_type) => {
                write!(f, "unsupported document type: {}", doc_type.as_str())
            }
            Self::UnsupportedDocumentShape(path) => {
                write!(f, "unsupported document shape: `{path}` is missing")
            }
            Self::DocumentNotFound(id) => write!(f, "property not found: {id}"),
            Self::UnknownOwner(id) => write!(f, "unknown owner of property {id}"),
            Self::NotOwner {
                property_id,
                requester_id,
            } => write!(
                f,
                "user {requester_id} is not the owner of property {property_id}"
            ),
            Self::UnsupportedCategory(id) => write!(f, "unsupported property category: {id}"),
            Self::UnsupportedPropertyType(id) => write!(f, "unsupported property type: {id}"),
            Self::TransientCatalogFailure(err) => write!(f, "{err}"),
            Self::InvalidPropertyData(details) => write!(f, "invalid property data: {details}"),
            Self::InvalidPropertyUpdate(details) => {
                write!(f, "invalid property update: {details}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PropertyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TransientCatalogFailure(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NavigatorError> for PropertyError {
    fn from(value: NavigatorError) -> Self {
        match value {
            NavigatorError::UnsupportedDocumentType(doc_type) => {
                Self::UnsupportedDocumentType(doc_type)
            }
            NavigatorError::MalformedDocument(message) => Self::MalformedDocument(message),
            NavigatorError::UnsupportedDocumentShape(path) => Self::UnsupportedDocumentShape(path),
        }
    }
}

impl From<CatalogError> for PropertyError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::CategoryNotFound(id) => Self::UnsupportedCategory(id),
            transient @ CatalogError::Transient(_) => Self::TransientCatalogFailure(transient),
        }
    }
}

impl From<RepoError> for PropertyError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::DocumentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl PropertyError {
    /// Short stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) => "malformed_document",
            Self::UnsupportedDocumentType(_) => "unsupported_document_type",
            Self::UnsupportedDocumentShape(_) => "unsupported_document_shape",
            Self::DocumentNotFound(_) => "document_not_found",
            Self::UnknownOwner(_) => "unknown_owner",
            Self::NotOwner { .. } => "not_owner",
            Self::UnsupportedCategory(_) => "unsupported_category",
            Self::UnsupportedPropertyType(_) => "unsupported_property_type",
            Self::TransientCatalogFailure(_) => "transient_catalog_failure",
            Self::InvalidPropertyData(_) => "invalid_property_data",
            Self::InvalidPropertyUpdate(_) => "invalid_property_update",
            Self::Repo(_) => "repo_failure",
        }
    }
}
