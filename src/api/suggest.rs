//! Suggestion Vocabulary Endpoints

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::get_json;
use crate::error::ApiError;

pub const COMMON_KEYS_URL: &str = "/api/common_keys";

/// Endpoint listing frequent values of one key
pub fn common_values_url(key: &str) -> String {
    format!("/api/common_values/{}", utf8_percent_encode(key, NON_ALPHANUMERIC))
}

/// Fetch a suggestion list; numbers and other scalars are rendered as text
pub async fn fetch_options(url: &str) -> Result<Vec<String>, ApiError> {
    let values: Vec<serde_json::Value> = get_json(url).await?;
    Ok(values.into_iter().map(option_text).collect())
}

pub async fn common_keys() -> Result<Vec<String>, ApiError> {
    fetch_options(COMMON_KEYS_URL).await
}

pub async fn common_values(key: &str) -> Result<Vec<String>, ApiError> {
    fetch_options(&common_values_url(key)).await
}

fn option_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_values_url_escapes_key() {
        assert_eq!(common_values_url("color"), "/api/common_values/color");
        assert_eq!(common_values_url("max temp"), "/api/common_values/max%20temp");
    }

    #[test]
    fn test_option_text() {
        assert_eq!(option_text(serde_json::json!("red")), "red");
        assert_eq!(option_text(serde_json::json!(4.5)), "4.5");
    }
}
