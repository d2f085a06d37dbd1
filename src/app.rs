//! Organizer Frontend App
//!
//! Picks the page view named by the embedded page props.

use leptos::prelude::*;

use crate::config::{Page, PageConfig};
use crate::context::AppContext;
use crate::navigation::Navigation;
use crate::pages::{Browser, EditItem, ItemList, SearchList, TemplatesPage};

#[component]
pub fn App(config: PageConfig) -> impl IntoView {
    // Provide context to all children
    provide_context(AppContext::new(Navigation::browser()));

    match config.page {
        Page::Browser { containers, root } => view! { <Browser containers=containers root=root /> }.into_any(),
        Page::Templates { containers, root } => {
            view! { <TemplatesPage containers=containers root=root /> }.into_any()
        }
        Page::ItemEdit {} => view! { <EditItem /> }.into_any(),
        Page::ItemList {
            items,
            keys,
            queried_keys,
            common_keys,
        } => view! {
            <ItemList items=items keys=keys queried_keys=queried_keys common_keys=common_keys />
        }
        .into_any(),
        Page::Search { items } => view! { <SearchList items=items /> }.into_any(),
    }
}
