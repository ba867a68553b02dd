#![allow(dead_code)]

use propreg_core::catalog::CatalogResult;
use propreg_core::model::catalog::{
    City, Country, PropertyCategory, PropertyKind, PropertyType, RoomName, RoomType,
};
use propreg_core::{
    CatalogClient, CatalogError, CatalogId, CategoryType, DocumentType, PropertyDocument,
    PropertyOwner, SnapshotCatalog, StoredProperty,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const HOTEL_CATEGORY_ID: CatalogId = 50;
pub const HOSTEL_CATEGORY_ID: CatalogId = 51;
pub const ACCOMMODATION_TYPE_ID: CatalogId = 3;

/// One observed catalog call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    PropertyTypes,
    PropertyCategories(CatalogId),
    PropertyCategory(CatalogId),
    RoomTypes(CatalogId, Option<String>),
    Countries(Option<String>),
    Cities(CatalogId, Option<String>),
}

/// Catalog wrapper that records every call and can simulate outages.
pub struct RecordingCatalog {
    inner: SnapshotCatalog,
    calls: Mutex<Vec<CatalogCall>>,
    unavailable: AtomicBool,
}

impl RecordingCatalog {
    pub fn new(inner: SnapshotCatalog) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&CatalogCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn countries_calls(&self) -> usize {
        self.count(|call| matches!(call, CatalogCall::Countries(_)))
    }

    pub fn cities_calls(&self) -> usize {
        self.count(|call| matches!(call, CatalogCall::Cities(..)))
    }

    pub fn category_calls(&self) -> usize {
        self.count(|call| matches!(call, CatalogCall::PropertyCategory(_)))
    }

    pub fn room_type_calls(&self) -> usize {
        self.count(|call| matches!(call, CatalogCall::RoomTypes(..)))
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn record(&self, call: CatalogCall) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Transient("catalog timed out".to_string()));
        }
        Ok(())
    }
}

impl CatalogClient for RecordingCatalog {
    fn property_types(&self) -> CatalogResult<Vec<PropertyType>> {
        self.record(CatalogCall::PropertyTypes)?;
        self.inner.property_types()
    }

    fn property_categories(
        &self,
        property_type_id: CatalogId,
    ) -> CatalogResult<Vec<PropertyCategory>> {
        self.record(CatalogCall::PropertyCategories(property_type_id))?;
        self.inner.property_categories(property_type_id)
    }

    fn property_category(&self, category_id: CatalogId) -> CatalogResult<PropertyCategory> {
        self.record(CatalogCall::PropertyCategory(category_id))?;
        self.inner.property_category(category_id)
    }

    fn property_room_types(
        &self,
        category_id: CatalogId,
        lang: Option<&str>,
    ) -> CatalogResult<Vec<RoomType>> {
        self.record(CatalogCall::RoomTypes(category_id, lang.map(str::to_string)))?;
        self.inner.property_room_types(category_id, lang)
    }

    fn all_countries(&self, lang: Option<&str>) -> CatalogResult<Vec<Country>> {
        self.record(CatalogCall::Countries(lang.map(str::to_string)))?;
        self.inner.all_countries(lang)
    }

    fn all_cities(&self, country_id: CatalogId, lang: Option<&str>) -> CatalogResult<Vec<City>> {
        self.record(CatalogCall::Cities(country_id, lang.map(str::to_string)))?;
        self.inner.all_cities(country_id, lang)
    }
}

pub fn country(id: CatalogId, name: &str) -> Country {
    Country {
        id,
        display_name: name.to_string(),
    }
}

pub fn city(id: CatalogId, name: &str) -> City {
    City {
        id,
        display_name: name.to_string(),
    }
}

pub fn category(id: CatalogId, category_type: CategoryType) -> PropertyCategory {
    PropertyCategory {
        id,
        display_name: category_type.as_str().to_string(),
        description: String::new(),
        category_type,
        active: true,
    }
}

/// Ukraine (Kiev, Lvov), Poland (Warsaw, Lodz, Poznan) and an empty
/// Netherlands, in English (default) and Russian; one hotel and one hostel
/// category; a `family` room type for the hotel category.
pub fn europe_catalog() -> SnapshotCatalog {
    let mut catalog = SnapshotCatalog::new("en")
        .with_property_type(PropertyType {
            id: ACCOMMODATION_TYPE_ID,
            display_name: "Accommodation".to_string(),
            property_kind: PropertyKind::Accommodation,
        })
        .with_category(
            ACCOMMODATION_TYPE_ID,
            category(HOTEL_CATEGORY_ID, CategoryType::Hotel),
        )
        .with_category(
            ACCOMMODATION_TYPE_ID,
            category(HOSTEL_CATEGORY_ID, CategoryType::Hostel),
        );

    for (lang, names) in [
        (
            "en",
            [
                "Ukraine", "Poland", "Netherlands", "Kiev", "Lvov", "Warsaw", "Lodz", "Poznan",
                "family", "family view on sea",
            ],
        ),
        (
            "ru",
            [
                "Украина",
                "Польша",
                "Нидерланды",
                "Киев",
                "Львов",
                "Варшава",
                "Лодзь",
                "Познань",
                "Семейный",
                "Семейный с видом на море",
            ],
        ),
    ] {
        catalog = catalog
            .with_country(lang, country(1, names[0]))
            .with_country(lang, country(2, names[1]))
            .with_country(lang, country(3, names[2]))
            .with_city(lang, 1, city(101, names[3]))
            .with_city(lang, 1, city(102, names[4]))
            .with_city(lang, 2, city(103, names[5]))
            .with_city(lang, 2, city(104, names[6]))
            .with_city(lang, 2, city(105, names[7]))
            .with_room_type(
                lang,
                HOTEL_CATEGORY_ID,
                RoomType {
                    id: 9,
                    display_name: names[8].to_string(),
                    room_names: vec![RoomName {
                        id: 388,
                        display_name: names[9].to_string(),
                    }],
                },
            );
    }
    catalog
}

/// Hotel document with address ids and an optional room layout.
pub fn hotel_json(country_id: i64, city_id: i64, room: Option<(i64, i64)>) -> Value {
    let layout_area = match room {
        Some((room_type_id, room_name_id)) => json!({
            "roomType": {"id": room_type_id},
            "roomName": {"id": room_name_id}
        }),
        None => json!({}),
    };
    json!({
        "hotelAboutData": {
            "propName": format!("Hotel {country_id}/{city_id}"),
            "address": {
                "country": {"id": country_id},
                "city": {"id": city_id}
            }
        },
        "hotelLayoutData": {"layoutArea": layout_area}
    })
}

pub fn stored(id: i64, document: &Value, category_id: CatalogId) -> StoredProperty {
    StoredProperty {
        id,
        document: PropertyDocument::new(document.to_string(), DocumentType::HotelJson),
        is_active: true,
        owner: Some(PropertyOwner {
            property_type_id: ACCOMMODATION_TYPE_ID,
            category_id,
            user_id: 7,
        }),
    }
}

/// Kiev, Lvov, Warsaw, Lodz, Poznan listings (ids 1005..=1001), newest first,
/// all in the hotel category.
pub fn europe_listings() -> Vec<StoredProperty> {
    vec![
        stored(1005, &hotel_json(2, 105, None), HOTEL_CATEGORY_ID),
        stored(1004, &hotel_json(2, 104, None), HOTEL_CATEGORY_ID),
        stored(1003, &hotel_json(2, 103, None), HOTEL_CATEGORY_ID),
        stored(1002, &hotel_json(1, 102, None), HOTEL_CATEGORY_ID),
        stored(1001, &hotel_json(1, 101, None), HOTEL_CATEGORY_ID),
    ]
}
