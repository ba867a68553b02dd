//! View projections composed on every read.

use crate::model::catalog::{CatalogId, CategoryType, PropertyKind};
use crate::model::property::{DocumentType, PropertyId};
use serde::Serialize;
use serde_json::Value;

/// Public, fully enriched projection of one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id: PropertyId,
    /// Stored document with address and layout names filled in.
    pub document: Value,
    pub document_type: DocumentType,
    /// Owning category id, raw (not resolved to a type).
    pub category_id: CatalogId,
}

/// Owner-facing projection used by the edit flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEditView {
    /// Stored document with address names only; layout is left raw.
    pub document: Value,
    pub document_type: DocumentType,
    pub category_id: CatalogId,
    pub category_type: CategoryType,
}

/// Short entry of an owner's listing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEditItem {
    pub property_id: PropertyId,
    pub property_name: Option<String>,
    pub property_kind: PropertyKind,
    pub category_type: CategoryType,
    pub image_url: Option<String>,
    pub is_active: bool,
}
