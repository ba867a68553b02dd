//! Listing repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist listings (`properties`) together with their ownership rows
//!   (`user_properties`).
//! - Serve the read orders the view and edit flows depend on.
//!
//! # Invariants
//! - A listing and its ownership row are inserted in one transaction.
//! - Listing reads are ordered newest first (`id DESC`).
//! - A listing without an ownership row is returned with `owner == None`.

use crate::db::DbError;
use crate::model::property::{
    DocumentType, NewProperty, PropertyDocument, PropertyId, PropertyOwner, StoredProperty,
    UserId,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROPERTY_SELECT_SQL: &str = "SELECT
    p.id,
    p.property_json,
    p.property_json_type,
    p.is_active,
    u.ref_property_type_id,
    u.ref_property_category_id,
    u.ref_user_id
FROM properties p
LEFT JOIN user_properties u ON u.property_id = p.id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for listing persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(PropertyId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "property not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted property data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for listing storage.
pub trait PropertyRepository {
    /// Stores a listing and its ownership row; returns the new id.
    fn insert_property(&self, property: &NewProperty) -> RepoResult<PropertyId>;
    fn find_by_id(&self, id: PropertyId) -> RepoResult<Option<StoredProperty>>;
    fn find_all_newest_first(&self) -> RepoResult<Vec<StoredProperty>>;
    /// Listings whose ownership row names `user_id`, newest first.
    fn find_all_owned_by(&self, user_id: UserId) -> RepoResult<Vec<StoredProperty>>;
    fn set_active(&self, id: PropertyId, active: bool) -> RepoResult<()>;
    /// Replaces the stored document text and type as a whole.
    fn replace_document(&self, id: PropertyId, document: &PropertyDocument) -> RepoResult<()>;
}

/// SQLite-backed listing repository.
pub struct SqlitePropertyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePropertyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_many(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<StoredProperty>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut properties = Vec::new();

        while let Some(row) = rows.next()? {
            properties.push(parse_property_row(row)?);
        }

        Ok(properties)
    }
}

impl PropertyRepository for SqlitePropertyRepository<'_> {
    fn insert_property(&self, property: &NewProperty) -> RepoResult<PropertyId> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO properties (property_json, property_json_type, is_active)
             VALUES (?1, ?2, 1);",
            params![
                property.document.json.as_str(),
                property.document.doc_type.as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO user_properties (
                property_id,
                ref_property_type_id,
                ref_property_category_id,
                ref_user_id
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                id,
                property.owner.property_type_id,
                property.owner.category_id,
                property.owner.user_id,
            ],
        )?;

        tx.commit()?;
        Ok(id)
    }

    fn find_by_id(&self, id: PropertyId) -> RepoResult<Option<StoredProperty>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPERTY_SELECT_SQL} WHERE p.id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_property_row(row)?));
        }

        Ok(None)
    }

    fn find_all_newest_first(&self) -> RepoResult<Vec<StoredProperty>> {
        self.query_many(&format!("{PROPERTY_SELECT_SQL} ORDER BY p.id DESC;"), [])
    }

    fn find_all_owned_by(&self, user_id: UserId) -> RepoResult<Vec<StoredProperty>> {
        self.query_many(
            &format!("{PROPERTY_SELECT_SQL} WHERE u.ref_user_id = ?1 ORDER BY p.id DESC;"),
            [user_id],
        )
    }

    fn set_active(&self, id: PropertyId, active: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE properties
             SET
                is_active = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![bool_to_int(active), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn replace_document(&self, id: PropertyId, document: &PropertyDocument) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE properties
             SET
                property_json = ?1,
                property_json_type = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![document.json.as_str(), document.doc_type.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_property_row(row: &Row<'_>) -> RepoResult<StoredProperty> {
    let id: PropertyId = row.get("id")?;

    let type_text: String = row.get("property_json_type")?;
    let doc_type = DocumentType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid document type `{type_text}` in properties.property_json_type"
        ))
    })?;

    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in properties.is_active"
            )));
        }
    };

    let owner = match (
        row.get::<_, Option<i64>>("ref_property_type_id")?,
        row.get::<_, Option<i64>>("ref_property_category_id")?,
        row.get::<_, Option<i64>>("ref_user_id")?,
    ) {
        (Some(property_type_id), Some(category_id), Some(user_id)) => Some(PropertyOwner {
            property_type_id,
            category_id,
            user_id,
        }),
        _ => None,
    };

    Ok(StoredProperty {
        id,
        document: PropertyDocument::new(row.get::<_, String>("property_json")?, doc_type),
        is_active,
        owner,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
