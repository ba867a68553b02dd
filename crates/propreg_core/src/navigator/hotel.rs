//! Hotel document over an order-preserving JSON object.
//!
//! The document is kept as the parsed `Map`, so every key keeps its position
//! through a parse/serialize cycle. A typed partial schema of the reference
//! ids is read alongside it; names are written back with `Map::insert`, which
//! keeps an existing key in place and appends a new one.

use super::{NavigatorError, NavigatorResult};
use crate::model::catalog::CatalogId;
use crate::model::property::{DocumentType, PropertyDocument};
use serde::Deserialize;
use serde_json::{Map, Value};

const ADDRESS_PATH: &str = "hotelAboutData.address";
const LAYOUT_AREA_PATH: &str = "hotelLayoutData.layoutArea";

const COUNTRY_REF: [&str; 3] = ["hotelAboutData", "address", "country"];
const CITY_REF: [&str; 3] = ["hotelAboutData", "address", "city"];
const ROOM_TYPE_REF: [&str; 3] = ["hotelLayoutData", "layoutArea", "roomType"];
const ROOM_NAME_REF: [&str; 3] = ["hotelLayoutData", "layoutArea", "roomName"];

/// Reference ids read from the address sub-tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressIds {
    pub country_id: Option<CatalogId>,
    pub city_id: Option<CatalogId>,
}

/// Reference ids read from the layout sub-tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutIds {
    pub room_type_id: Option<CatalogId>,
    pub room_name_id: Option<CatalogId>,
}

/// Hotel-type property document.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelDocument {
    root: Map<String, Value>,
    refs: HotelRefs,
}

// Read-only views of the reference slots. Absent and `null` both read as
// `None`; a known key with the wrong JSON type rejects the document.

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct HotelRefs {
    #[serde(rename = "hotelAboutData")]
    about: Option<AboutRefs>,
    #[serde(rename = "hotelLayoutData")]
    layout: Option<LayoutRefs>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AboutRefs {
    address: Option<AddressRefs>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AddressRefs {
    country: Option<LookupRef>,
    city: Option<LookupRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LayoutRefs {
    #[serde(rename = "layoutArea")]
    area: Option<AreaRefs>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AreaRefs {
    #[serde(rename = "roomType")]
    room_type: Option<LookupRef>,
    #[serde(rename = "roomName")]
    room_name: Option<LookupRef>,
}

/// `{ "id": .., "name": .. }` reference object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LookupRef {
    id: Option<CatalogId>,
}

impl HotelDocument {
    /// Parses a stored document after checking its type.
    ///
    /// # Errors
    /// - `UnsupportedDocumentType` for anything but `HOTEL_JSON`; no parsing
    ///   is attempted in that case.
    /// - `MalformedDocument` when the JSON is broken, the root is not an
    ///   object, or a known key has the wrong JSON type.
    pub fn parse(document: &PropertyDocument) -> NavigatorResult<Self> {
        ensure_navigable(document.doc_type)?;
        Self::from_json_str(&document.json)
    }

    /// Parses hotel JSON without a type check.
    pub fn from_json_str(json: &str) -> NavigatorResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(root) = value else {
            return Err(NavigatorError::MalformedDocument(
                "document root is not a JSON object".to_string(),
            ));
        };
        let refs = HotelRefs::deserialize(&root)?;
        Ok(Self { root, refs })
    }

    /// Reads country/city reference ids.
    ///
    /// Fails with `UnsupportedDocumentShape` when the address sub-tree is
    /// absent or `null`. A missing country/city object is just an unset id.
    pub fn address_ids(&self) -> NavigatorResult<AddressIds> {
        let address = self
            .address()
            .ok_or(NavigatorError::UnsupportedDocumentShape(ADDRESS_PATH))?;
        Ok(AddressIds {
            country_id: ref_id(&address.country),
            city_id: ref_id(&address.city),
        })
    }

    /// Writes resolved names next to the address ids.
    ///
    /// `None` leaves the corresponding reference untouched.
    pub fn set_address_names(
        &mut self,
        country_name: Option<String>,
        city_name: Option<String>,
    ) -> NavigatorResult<()> {
        if self.address().is_none() {
            return Err(NavigatorError::UnsupportedDocumentShape(ADDRESS_PATH));
        }
        set_ref_name(&mut self.root, COUNTRY_REF, country_name);
        set_ref_name(&mut self.root, CITY_REF, city_name);
        Ok(())
    }

    /// Reads room-type/room-name reference ids.
    pub fn layout_ids(&self) -> NavigatorResult<LayoutIds> {
        let area = self
            .layout_area()
            .ok_or(NavigatorError::UnsupportedDocumentShape(LAYOUT_AREA_PATH))?;
        Ok(LayoutIds {
            room_type_id: ref_id(&area.room_type),
            room_name_id: ref_id(&area.room_name),
        })
    }

    /// Writes resolved names next to the layout ids.
    pub fn set_layout_names(
        &mut self,
        room_type_name: Option<String>,
        room_name_name: Option<String>,
    ) -> NavigatorResult<()> {
        if self.layout_area().is_none() {
            return Err(NavigatorError::UnsupportedDocumentShape(LAYOUT_AREA_PATH));
        }
        set_ref_name(&mut self.root, ROOM_TYPE_REF, room_type_name);
        set_ref_name(&mut self.root, ROOM_NAME_REF, room_name_name);
        Ok(())
    }

    /// Hands back the document as a generic JSON value, key order intact.
    pub fn into_value(self) -> NavigatorResult<Value> {
        Ok(Value::Object(self.root))
    }

    fn address(&self) -> Option<&AddressRefs> {
        self.refs.about.as_ref()?.address.as_ref()
    }

    fn layout_area(&self) -> Option<&AreaRefs> {
        self.refs.layout.as_ref()?.area.as_ref()
    }
}

/// Rejects document types without a navigable schema.
pub(crate) fn ensure_navigable(doc_type: DocumentType) -> NavigatorResult<()> {
    if doc_type == DocumentType::HotelJson {
        Ok(())
    } else {
        Err(NavigatorError::UnsupportedDocumentType(doc_type))
    }
}

fn ref_id(slot: &Option<LookupRef>) -> Option<CatalogId> {
    slot.as_ref()?.id
}

/// Sets `name` on the reference object at `path`; a missing or `null`
/// reference object is left alone.
fn set_ref_name(root: &mut Map<String, Value>, path: [&str; 3], name: Option<String>) {
    let Some(name) = name else {
        return;
    };
    let [head, tail @ ..] = path;
    let mut node = root.get_mut(head);
    for key in tail {
        node = node
            .and_then(Value::as_object_mut)
            .and_then(|object| object.get_mut(key));
    }
    if let Some(Value::Object(reference)) = node {
        reference.insert("name".to_string(), Value::String(name));
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressIds, HotelDocument, LayoutIds};
    use crate::model::property::{DocumentType, PropertyDocument};
    use crate::navigator::NavigatorError;
    use serde_json::{json, Value};

    const FULL_DOC: &str = r#"{"hotelAboutData":{"propName":"Sea View","address":{"country":{"id":1},"city":{"id":10},"street":"Main 1"}},"hotelLayoutData":{"layoutArea":{"roomType":{"id":9},"roomName":{"id":388},"size":24}},"hotelPhotosData":{"images":[{"url":"a.png"}]}}"#;

    fn parse(json: &str) -> HotelDocument {
        HotelDocument::from_json_str(json).expect("document should parse")
    }

    #[test]
    fn reads_address_and_layout_ids() {
        let doc = parse(FULL_DOC);
        assert_eq!(
            doc.address_ids().unwrap(),
            AddressIds {
                country_id: Some(1),
                city_id: Some(10)
            }
        );
        assert_eq!(
            doc.layout_ids().unwrap(),
            LayoutIds {
                room_type_id: Some(9),
                room_name_id: Some(388)
            }
        );
    }

    #[test]
    fn round_trip_without_names_is_identity() {
        let original: Value = serde_json::from_str(FULL_DOC).unwrap();
        let mut doc = parse(FULL_DOC);
        doc.set_address_names(None, None).unwrap();
        doc.set_layout_names(None, None).unwrap();
        assert_eq!(doc.into_value().unwrap(), original);
    }

    #[test]
    fn round_trip_keeps_explicit_nulls_and_unknown_keys() {
        let source = r#"{"hotelAboutData":{"address":{"country":{"id":null,"name":null,"code":"PL"},"city":null}},"hotelLayoutData":null,"extra":[1,2,{"deep":true}]}"#;
        let original: Value = serde_json::from_str(source).unwrap();
        let doc = parse(source);

        assert_eq!(doc.address_ids().unwrap(), AddressIds::default());
        assert_eq!(doc.into_value().unwrap(), original);
    }

    #[test]
    fn round_trip_keeps_key_order_of_unknown_keys() {
        let source = r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#;
        let text = serde_json::to_string(&parse(source).into_value().unwrap()).unwrap();
        assert_eq!(text, source);
    }

    #[test]
    fn round_trip_keeps_position_of_known_keys() {
        let source = r#"{"hotelPhotosData":{"images":[]},"hotelAboutData":{"address":{"street":"Main 1","city":{"id":0},"country":{"name":"x","id":0}}},"hotelLayoutData":{"layoutArea":{}}}"#;
        let text = serde_json::to_string(&parse(source).into_value().unwrap()).unwrap();
        assert_eq!(text, source);
    }

    #[test]
    fn written_names_keep_existing_slot_or_append() {
        let source = r#"{"hotelAboutData":{"address":{"city":{"id":10},"country":{"name":"stale","id":1}}}}"#;
        let mut doc = parse(source);
        doc.set_address_names(Some("Poland".to_string()), Some("Warsaw".to_string()))
            .unwrap();

        let text = serde_json::to_string(&doc.into_value().unwrap()).unwrap();
        assert_eq!(
            text,
            r#"{"hotelAboutData":{"address":{"city":{"id":10,"name":"Warsaw"},"country":{"name":"Poland","id":1}}}}"#
        );
    }

    #[test]
    fn writes_names_next_to_ids_only() {
        let mut doc = parse(FULL_DOC);
        doc.set_address_names(Some("Poland".to_string()), None)
            .unwrap();
        doc.set_layout_names(None, Some("family view on sea".to_string()))
            .unwrap();

        let value = doc.into_value().unwrap();
        assert_eq!(
            value["hotelAboutData"]["address"]["country"],
            json!({"id": 1, "name": "Poland"})
        );
        assert_eq!(value["hotelAboutData"]["address"]["city"], json!({"id": 10}));
        assert_eq!(value["hotelAboutData"]["address"]["street"], "Main 1");
        assert_eq!(
            value["hotelLayoutData"]["layoutArea"]["roomName"]["name"],
            "family view on sea"
        );
        assert_eq!(value["hotelLayoutData"]["layoutArea"]["size"], 24);
        assert_eq!(value["hotelPhotosData"]["images"][0]["url"], "a.png");
    }

    #[test]
    fn name_for_missing_reference_object_is_dropped() {
        let mut doc = parse(r#"{"hotelAboutData":{"address":{}}}"#);
        doc.set_address_names(Some("Poland".to_string()), Some("Warsaw".to_string()))
            .unwrap();
        assert_eq!(
            doc.into_value().unwrap(),
            json!({"hotelAboutData": {"address": {}}})
        );
    }

    #[test]
    fn missing_sub_trees_are_shape_errors() {
        let doc = parse(r#"{"hotelAboutData":{"propName":"x"}}"#);
        assert_eq!(
            doc.address_ids().unwrap_err(),
            NavigatorError::UnsupportedDocumentShape("hotelAboutData.address")
        );
        assert_eq!(
            doc.layout_ids().unwrap_err(),
            NavigatorError::UnsupportedDocumentShape("hotelLayoutData.layoutArea")
        );
    }

    #[test]
    fn broken_json_is_malformed() {
        let err = HotelDocument::from_json_str("{INVALID_JSON}").unwrap_err();
        assert!(matches!(err, NavigatorError::MalformedDocument(_)));

        let err = HotelDocument::from_json_str(r#"{"hotelAboutData":{"address":{"country":{"id":"one"}}}}"#)
            .unwrap_err();
        assert!(matches!(err, NavigatorError::MalformedDocument(_)));

        let err = HotelDocument::from_json_str("[1,2]").unwrap_err();
        assert!(matches!(err, NavigatorError::MalformedDocument(_)));
    }

    #[test]
    fn non_hotel_types_are_rejected_before_parsing() {
        let document = PropertyDocument::new("{INVALID_JSON}", DocumentType::GuestHouseJson);
        let err = HotelDocument::parse(&document).unwrap_err();
        assert_eq!(
            err,
            NavigatorError::UnsupportedDocumentType(DocumentType::GuestHouseJson)
        );
    }
}
