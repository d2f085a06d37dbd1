//! Add Key Row Component
//!
//! Names a new field, optionally with a declared type, using the common
//! keys as suggestions.

use leptos::prelude::*;

use crate::api::COMMON_KEYS_URL;
use crate::components::{FieldTypeSelector, LazyAutocomplete};
use crate::models::FieldType;

/// Row for adding a field
///
/// Props:
/// - can_add: whether (name, type) would be accepted; disables the button
/// - on_add: called with the trimmed name and chosen type
/// - with_type: show the type selector, otherwise fields are text
#[component]
pub fn AddKeyRow(
    #[prop(into)] can_add: Callback<(String, FieldType), bool>,
    #[prop(into)] on_add: Callback<(String, FieldType)>,
    #[prop(optional)] with_type: bool,
) -> impl IntoView {
    let (key, set_key) = signal(String::new());
    let (kind, set_kind) = signal(FieldType::default());

    let acceptable = move || can_add.run((key.get().trim().to_string(), kind.get()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = key.get_untracked().trim().to_string();
        if !can_add.run((name.clone(), kind.get_untracked())) {
            log::debug!("Field '{}' cannot be added", name);
            return;
        }
        on_add.run((name, kind.get_untracked()));
        set_key.set(String::new());
    };

    view! {
        <form class="add-key-row" on:submit=on_submit>
            <LazyAutocomplete
                value=key
                on_change=move |value: String| set_key.set(value)
                url=COMMON_KEYS_URL
                placeholder="New attribute"
            />
            <Show when=move || with_type>
                <FieldTypeSelector current=kind on_change=move |value: FieldType| set_kind.set(value) />
            </Show>
            <button type="submit" disabled=move || !acceptable()>"Add"</button>
        </form>
    }
}
