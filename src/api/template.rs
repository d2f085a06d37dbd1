//! Template Endpoints

use std::collections::BTreeMap;

use serde::Serialize;

use super::{get_json, request_json, ApiEnvelope, Method};
use crate::error::ApiError;
use crate::models::{FieldType, Template};

#[derive(Serialize)]
pub struct SaveTemplateArgs<'a> {
    pub item_name: &'a str,
    pub fields: BTreeMap<&'a str, FieldType>,
}

#[derive(Serialize)]
pub struct CreateTemplateArgs<'a> {
    pub name: &'a str,
    pub item_name: &'a str,
    pub parent: i64,
    pub fields: BTreeMap<String, FieldType>,
}

fn template_endpoint(id: i64) -> String {
    format!("/api/template/{}", id)
}

pub async fn get_template(id: i64) -> Result<Template, ApiError> {
    get_json(&template_endpoint(id)).await
}

/// Store the naming template and own fields of a template
pub async fn save_template(id: i64, args: &SaveTemplateArgs<'_>) -> Result<Template, ApiError> {
    let envelope: ApiEnvelope<Template> =
        request_json(&template_endpoint(id), Method::Put, Some(args)).await?;
    envelope.into_result()
}

pub async fn create_template(args: &CreateTemplateArgs<'_>) -> Result<Template, ApiError> {
    let envelope: ApiEnvelope<Template> = request_json("/api/template", Method::Post, Some(args)).await?;
    envelope.into_result()
}

pub async fn delete_template(id: i64) -> Result<(), ApiError> {
    let envelope: ApiEnvelope<serde_json::Value> =
        request_json::<_, ()>(&template_endpoint(id), Method::Delete, None).await?;
    envelope.into_unit()
}
