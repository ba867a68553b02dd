use propreg_core::db::open_db_in_memory;
use propreg_core::{
    DocumentType, NewProperty, PropertyDocument, PropertyOwner, PropertyRepository, RepoError,
    SqlitePropertyRepository,
};

fn new_property(json: &str, user_id: i64) -> NewProperty {
    NewProperty {
        document: PropertyDocument::new(json, DocumentType::HotelJson),
        owner: PropertyOwner {
            property_type_id: 3,
            category_id: 50,
            user_id,
        },
    }
}

#[test]
fn insert_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);

    let id = repo.insert_property(&new_property(r#"{"a":1}"#, 7)).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.document.json, r#"{"a":1}"#);
    assert_eq!(loaded.document.doc_type, DocumentType::HotelJson);
    assert!(loaded.is_active);
    assert_eq!(
        loaded.owner,
        Some(PropertyOwner {
            property_type_id: 3,
            category_id: 50,
            user_id: 7,
        })
    );
    assert!(repo.find_by_id(id + 1).unwrap().is_none());
}

#[test]
fn listings_are_read_newest_first_and_scoped_by_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);

    let first = repo.insert_property(&new_property("{}", 7)).unwrap();
    let foreign = repo.insert_property(&new_property("{}", 8)).unwrap();
    let third = repo.insert_property(&new_property("{}", 7)).unwrap();

    let all: Vec<i64> = repo
        .find_all_newest_first()
        .unwrap()
        .iter()
        .map(|property| property.id)
        .collect();
    assert_eq!(all, vec![third, foreign, first]);

    let owned: Vec<i64> = repo
        .find_all_owned_by(7)
        .unwrap()
        .iter()
        .map(|property| property.id)
        .collect();
    assert_eq!(owned, vec![third, first]);
    assert!(repo.find_all_owned_by(99).unwrap().is_empty());
}

#[test]
fn listing_without_ownership_row_has_no_owner() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO properties (property_json, property_json_type, is_active)
         VALUES ('{}', 'MOTEL_JSON', 0);",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let loaded = SqlitePropertyRepository::new(&conn)
        .find_by_id(id)
        .unwrap()
        .unwrap();

    assert_eq!(loaded.owner, None);
    assert_eq!(loaded.document.doc_type, DocumentType::MotelJson);
    assert!(!loaded.is_active);
}

#[test]
fn updates_on_missing_listing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);

    assert!(matches!(repo.set_active(5, false), Err(RepoError::NotFound(5))));
    assert!(matches!(
        repo.replace_document(5, &PropertyDocument::new("{}", DocumentType::HotelJson)),
        Err(RepoError::NotFound(5))
    ));
}

#[test]
fn replace_document_swaps_text_and_type() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);
    let id = repo.insert_property(&new_property(r#"{"v":1}"#, 7)).unwrap();

    repo.replace_document(id, &PropertyDocument::new(r#"{"v":2}"#, DocumentType::HostelJson))
        .unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.document.json, r#"{"v":2}"#);
    assert_eq!(loaded.document.doc_type, DocumentType::HostelJson);
    assert!(loaded.owner.is_some());
}

#[test]
fn corrupt_document_type_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);
    let id = repo.insert_property(&new_property("{}", 7)).unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "UPDATE properties SET property_json_type = 'CASTLE_JSON' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    assert!(matches!(repo.find_by_id(id), Err(RepoError::InvalidData(_))));
}
