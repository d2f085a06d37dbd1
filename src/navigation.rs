//! Navigation
//!
//! Page changes go through an injected `Navigator` instead of writing
//! `window.location` from inside views.

use std::sync::Arc;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// Performs full-page navigation
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigator backed by `window.location`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to navigate to {}", path);
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            log::error!("Navigation to {} failed: {:?}", path, e);
        }
    }
}

/// Shared handle provided via context
#[derive(Clone)]
pub struct Navigation(pub Arc<dyn Navigator + Send + Sync>);

impl Navigation {
    pub fn browser() -> Self {
        Self(Arc::new(BrowserNavigator))
    }

    pub fn go(&self, path: &str) {
        log::info!("Navigating to {}", path);
        self.0.navigate(path);
    }
}

// ========================
// Routes
// ========================

pub fn container_path(id: u32) -> String {
    format!("/browse/{}/", id)
}

pub fn new_container_path(parent: u32) -> String {
    format!("/browse/{}/new/", parent)
}

pub fn template_path(id: i64) -> String {
    format!("/template/{}", id)
}

pub fn media_path(stored: &str) -> String {
    format!("/media/{}", stored)
}

pub const NEW_ITEM_PATH: &str = "/item/new";

/// `pathname` with its `?query=` parameter set to `query`
pub fn search_path(pathname: &str, query: &str) -> String {
    format!("{}?query={}", pathname, utf8_percent_encode(query, NON_ALPHANUMERIC))
}

// ========================
// Location Parsing
// ========================

/// Trailing numeric segment of a path such as `/item/12` or `/template/3/`
pub fn trailing_id(pathname: &str) -> Option<i64> {
    pathname
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Value of a query-string parameter, with `+` as space and percent-decoding
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let spaced = value.replace('+', " ");
            percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
        })
}

pub fn current_pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.visited.lock().unwrap().push(path.to_string());
        }
    }

    #[test]
    fn test_navigation_delegates() {
        let recorder = Arc::new(RecordingNavigator::default());
        let nav = Navigation(recorder.clone());
        nav.go(&template_path(4));
        nav.go(&container_path(2));
        assert_eq!(*recorder.visited.lock().unwrap(), vec!["/template/4", "/browse/2/"]);
    }

    #[test]
    fn test_trailing_id() {
        assert_eq!(trailing_id("/item/12"), Some(12));
        assert_eq!(trailing_id("/template/3/"), Some(3));
        assert_eq!(trailing_id("/template/"), None);
        assert_eq!(trailing_id(""), None);
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(
            query_param("?page=2&query=color%3Dred+%26+size%3E3", "query").as_deref(),
            Some("color=red & size>3")
        );
        assert_eq!(query_param("?query=", "query").as_deref(), Some(""));
        assert_eq!(query_param("?other=1", "query"), None);
        assert_eq!(query_param("", "query"), None);
    }

    #[test]
    fn test_search_path_round_trips() {
        let path = search_path("/items/", "size>=3 & name=R1");
        let (pathname, search) = path.split_once('?').unwrap();
        assert_eq!(pathname, "/items/");
        assert_eq!(query_param(search, "query").as_deref(), Some("size>=3 & name=R1"));
    }
}
