//! File Upload Endpoint

use web_sys::{File, FormData};

use super::{request_form, ApiEnvelope};
use crate::error::ApiError;

pub const UPLOAD_URL: &str = "/api/upload_file";

/// Upload one file, returning the path the backend stored it under
pub async fn upload_file(file: &File) -> Result<String, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Malformed("cannot create form data".to_string()))?;
    form.append_with_blob("file", file)
        .map_err(|_| ApiError::Malformed("cannot attach file".to_string()))?;
    let envelope: ApiEnvelope<String> = request_form(UPLOAD_URL, &form).await?;
    envelope.into_result()
}
