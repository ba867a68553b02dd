//! Core of the property registration service.
//! Resolves catalog references inside stored listings, composes public and
//! owner views, and filters listings by location and category.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod navigator;
pub mod query;
pub mod repo;
pub mod service;
pub mod view;

pub use catalog::{CachedCatalogClient, CatalogClient, CatalogError, SnapshotCatalog};
pub use config::{ConfigError, EngineConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use error::{PropertyError, PropertyResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{CatalogId, CategoryType, PropertyKind};
pub use model::property::{
    DocumentType, NewProperty, PropertyDocument, PropertyId, PropertyOwner, PropertyUpdate,
    StoredProperty, UserId,
};
pub use model::view::{PropertyEditItem, PropertyEditView, PropertyView};
pub use query::{LocationFilter, QueryFilter, ResolvedLocation};
pub use repo::{PropertyRepository, RepoError, RepoResult, SqlitePropertyRepository};
pub use service::edit_service::PropertyEditService;
pub use service::registration_service::PropertyRegService;
pub use service::view_service::PropertyViewService;
pub use view::{BatchRunner, ViewComposer};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
