//! Page Configuration
//!
//! Bootstrap data the server embeds into each page as JSON.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::models::{Container, ListedItem};
use crate::tree::ContainerTable;

/// Id of the `<script type="application/json">` element holding the props
pub const PROPS_ELEMENT_ID: &str = "page-props";

/// Which view to mount, with its server-provided data
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Browser {
        #[serde(deserialize_with = "container_table")]
        containers: ContainerTable,
        #[serde(default)]
        root: u32,
    },
    Templates {
        #[serde(deserialize_with = "container_table")]
        containers: ContainerTable,
        #[serde(default)]
        root: u32,
    },
    ItemEdit {},
    ItemList {
        #[serde(default)]
        items: Vec<ListedItem>,
        #[serde(default)]
        keys: Vec<String>,
        #[serde(default)]
        queried_keys: Vec<String>,
        #[serde(default)]
        common_keys: Vec<String>,
    },
    Search {
        #[serde(default)]
        items: Vec<ListedItem>,
    },
}

/// JSON object keys are strings; tagged enums do not convert them to ids
fn container_table<'de, D>(deserializer: D) -> Result<ContainerTable, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, Container>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, container)| {
            key.parse::<u32>()
                .map(|id| (id, container))
                .map_err(|e| D::Error::custom(format!("container id {:?}: {}", key, e)))
        })
        .collect()
}

impl Page {
    pub fn kind(&self) -> &'static str {
        match self {
            Page::Browser { .. } => "browser",
            Page::Templates { .. } => "templates",
            Page::ItemEdit {} => "item_edit",
            Page::ItemList { .. } => "item_list",
            Page::Search { .. } => "search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub log_level: Option<String>,
    pub page: Page,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            page: Page::ItemEdit {},
        }
    }
}

impl PageConfig {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the props embedded in the current document, falling back to the
    /// default page when they are missing or invalid.
    pub fn from_document() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(PROPS_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match text {
            Some(text) => Self::parse(&text).unwrap_or_else(|e| {
                log::warn!("Invalid page props: {}", e);
                Self::default()
            }),
            None => {
                log::warn!("No #{} element, using defaults", PROPS_ELEMENT_ID);
                Self::default()
            }
        }
    }
}

/// Initial visibility of item-list columns: queried and common keys shown
pub fn initial_columns(keys: &[String], queried: &[String], common: &[String]) -> BTreeMap<String, bool> {
    let mut columns: BTreeMap<String, bool> = queried
        .iter()
        .chain(common)
        .map(|k| (k.clone(), true))
        .collect();
    for key in keys {
        columns.entry(key.clone()).or_insert(false);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browser_page() {
        let config = PageConfig::parse(
            r#"{"log_level": "debug", "page": {"kind": "browser", "root": 0,
                "containers": {"0": {"name": "Root", "children": [1], "parent": 0},
                               "1": {"name": "Shelf", "children": [], "parent": 0}}}}"#,
        )
        .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        match config.page {
            Page::Browser { containers, root } => {
                assert_eq!(root, 0);
                assert_eq!(containers[&1].name, "Shelf");
            }
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn test_parse_templates_page() {
        let config = PageConfig::parse(
            r#"{"page": {"kind": "templates", "root": 1,
                "containers": {"1": {"name": "Parts", "children": [4]},
                               "4": {"name": "Resistors", "parent": 1}}}}"#,
        )
        .unwrap();
        match config.page {
            Page::Templates { containers, root } => {
                assert_eq!(root, 1);
                assert_eq!(containers[&4].parent, Some(1));
                assert_eq!(containers[&1].children, vec![4]);
            }
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_container_id_fails() {
        let err = PageConfig::parse(
            r#"{"page": {"kind": "browser", "containers": {"shelf": {"name": "Shelf"}}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("container id"));
    }

    #[test]
    fn test_parse_item_list_defaults() {
        let config = PageConfig::parse(r#"{"page": {"kind": "item_list", "keys": ["color"]}}"#).unwrap();
        assert_eq!(
            config.page,
            Page::ItemList {
                items: vec![],
                keys: vec!["color".to_string()],
                queried_keys: vec![],
                common_keys: vec![],
            }
        );
    }

    #[test]
    fn test_unknown_page_kind_fails() {
        assert!(PageConfig::parse(r#"{"page": {"kind": "dashboard"}}"#).is_err());
    }

    #[test]
    fn test_default_is_item_editor() {
        assert_eq!(PageConfig::default().page.kind(), "item_edit");
        let config = PageConfig::parse(r#"{"page": {"kind": "search"}}"#).unwrap();
        assert_eq!(config.page.kind(), "search");
    }

    #[test]
    fn test_initial_columns() {
        let keys: Vec<String> = ["color", "size", "weight"].iter().map(|s| s.to_string()).collect();
        let columns = initial_columns(&keys, &["size".to_string()], &["color".to_string()]);
        assert_eq!(columns["color"], true);
        assert_eq!(columns["size"], true);
        assert_eq!(columns["weight"], false);
    }
}
