//! Text Input Component
//!
//! Controlled single-line text input.

use leptos::prelude::*;

/// Plain controlled input: shows `value`, reports every edit
#[component]
pub fn TextInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] name: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    view! {
        <input
            type="text"
            name=name
            class=class
            placeholder=placeholder
            autocomplete="off"
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}
