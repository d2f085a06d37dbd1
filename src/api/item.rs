//! Item Endpoints

use std::collections::BTreeMap;

use serde::Serialize;

use super::{get_json, request_json, ApiEnvelope, Method};
use crate::error::ApiError;
use crate::models::{FieldValue, Item};

#[derive(Serialize)]
struct SaveItemArgs<'a> {
    fields: &'a BTreeMap<String, FieldValue>,
}

fn item_endpoint(id: i64) -> String {
    format!("/api/item/{}", id)
}

/// Load an item together with its resolved template
pub async fn get_item(id: i64) -> Result<Item, ApiError> {
    get_json(&item_endpoint(id)).await
}

/// Replace all fields of an item; the stored item comes back
pub async fn save_item(id: i64, fields: &BTreeMap<String, FieldValue>) -> Result<Item, ApiError> {
    let envelope: ApiEnvelope<Item> =
        request_json(&item_endpoint(id), Method::Put, Some(&SaveItemArgs { fields })).await?;
    envelope.into_result()
}
