//! Field Type Selector Component
//!
//! Buttons choosing one of the closed set of field types.

use leptos::prelude::*;

use crate::models::FieldType;

/// Field type options with their labels
pub const FIELD_TYPES: &[(FieldType, &str)] = &[
    (FieldType::String, "Text"),
    (FieldType::Number, "Number"),
    (FieldType::Unit, "Unit"),
    (FieldType::File, "File"),
];

/// Type selector buttons for fields
#[component]
pub fn FieldTypeSelector(
    #[prop(into)] current: Signal<FieldType>,
    #[prop(into)] on_change: Callback<FieldType>,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {FIELD_TYPES.iter().map(|&(kind, label)| {
                let is_selected = move || current.get() == kind;
                view! {
                    <button
                        type="button"
                        title=kind.as_str()
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| on_change.run(kind)
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
