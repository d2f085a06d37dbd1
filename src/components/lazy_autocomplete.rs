//! Lazy Autocomplete Component
//!
//! Single-value autocomplete whose options are fetched from the backend
//! the first time the input gains focus.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::AutoComplete;
use crate::suggest::{Completion, ValueAssist};

#[component]
pub fn LazyAutocomplete(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    /// Endpoint answering with a JSON array of options
    #[prop(into)] url: String,
    #[prop(optional, into)] name: String,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let assist = RwSignal::new(ValueAssist::new(&value.get_untracked()));
    let url = StoredValue::new(url);

    // Follow changes made by the owner, e.g. after a save
    Effect::new(move |_| {
        let current = value.get();
        if assist.with_untracked(|a| a.value() != current) {
            assist.update(|a| {
                a.set_value(&current);
                a.suggestions.hide();
            });
        }
    });

    let load_options = move |_: ()| {
        if !assist.try_update(|a| a.source.begin_load()).unwrap_or(false) {
            return;
        }
        let url = url.get_value();
        spawn_local(async move {
            let options = match api::fetch_options(&url).await {
                Ok(options) => options,
                Err(e) => {
                    log::error!("Loading options from {} failed: {}", url, e);
                    Vec::new()
                }
            };
            log::debug!("{} options from {}", options.len(), url);
            assist.update(|a| a.receive(options));
        });
    };

    view! {
        <AutoComplete
            assist=assist
            name=name
            placeholder=placeholder
            on_input=move |(text, _): (String, usize)| {
                assist.update(|a| a.set_value(&text));
                on_change.run(text);
            }
            on_focus=load_options
            on_commit=move |_: ()| on_change.run(assist.with_untracked(|a| a.text().to_string()))
        />
    }
}
