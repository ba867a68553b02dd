//! Lenient single-field reads used by the owner listing list.
//!
//! Unlike [`super::HotelDocument`], these never fail: broken JSON or a
//! missing key yields `None`.

use serde_json::Value;

/// Reads `hotelAboutData.propName`.
pub fn peek_property_name(json: &str) -> Option<String> {
    let root: Value = serde_json::from_str(json).ok()?;
    root.pointer("/hotelAboutData/propName")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Reads the `url` of the first entry of `hotelPhotosData.images`.
pub fn peek_first_image_url(json: &str) -> Option<String> {
    let root: Value = serde_json::from_str(json).ok()?;
    root.pointer("/hotelPhotosData/images")?
        .as_array()?
        .first()?
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
