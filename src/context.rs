//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::navigation::Navigation;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    navigation: StoredValue<Navigation>,
}

impl AppContext {
    pub fn new(navigation: Navigation) -> Self {
        Self {
            navigation: StoredValue::new(navigation),
        }
    }

    /// Full-page navigation to `path`
    pub fn navigate(&self, path: &str) {
        self.navigation.with_value(|nav| nav.go(path));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
