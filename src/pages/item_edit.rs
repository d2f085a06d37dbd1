//! Item Editor Page
//!
//! Schema fields of the item's template, free-form additional attributes,
//! and file fields uploaded right before the item is saved.

use std::collections::BTreeMap;

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api;
use crate::components::{AddKeyRow, LazyAutocomplete};
use crate::draft::{DraftField, ItemCommand, ItemDraft};
use crate::error::ApiError;
use crate::models::{FieldType, Item};
use crate::navigation::{current_pathname, media_path, trailing_id};

/// File inputs of the rendered file fields, by field name
type FileInputs = BTreeMap<String, NodeRef<html::Input>>;

/// Upload the chosen files, then store the whole draft
async fn store(id: i64, mut draft: ItemDraft, uploads: Vec<(String, File)>) -> Result<Item, ApiError> {
    for (key, file) in uploads {
        let stored = api::upload_file(&file).await?;
        log::info!("Uploaded {} as {}", key, stored);
        draft.fields.insert(
            key,
            DraftField {
                kind: FieldType::File,
                input: stored,
            },
        );
    }
    let fields = draft.to_payload().map_err(|field_errors| ApiError::Rejected {
        message: "Some fields have invalid values".to_string(),
        field_errors,
    })?;
    api::save_item(id, &fields).await
}

/// Files picked in the inputs of fields that are still file fields
fn chosen_files(inputs: &FileInputs, draft: &ItemDraft) -> Vec<(String, File)> {
    inputs
        .iter()
        .filter(|(key, _)| {
            draft.kind_of(key) == FieldType::File
                && (draft.is_schema_field(key) || draft.fields.contains_key(*key))
        })
        .filter_map(|(key, input)| {
            let files = input.get_untracked()?.files()?;
            if files.length() != 1 {
                return None;
            }
            files.get(0).map(|file| (key.clone(), file))
        })
        .collect()
}

#[component]
pub fn EditItem() -> impl IntoView {
    let item_id = trailing_id(&current_pathname());
    let draft = RwSignal::new(ItemDraft::default());
    let file_inputs = StoredValue::new(FileInputs::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (field_errors, set_field_errors) = signal(BTreeMap::<String, String>::new());
    let (reloading, set_reloading) = signal(false);

    match item_id {
        Some(id) => spawn_local(async move {
            match api::get_item(id).await {
                Ok(item) => draft.set(ItemDraft::from_item(&item)),
                Err(e) => {
                    log::error!("Couldn't load item {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        }),
        None => {
            log::error!("No item id in {}", current_pathname());
            set_error.set(Some("No item selected".to_string()));
        }
    }

    let apply = move |command: ItemCommand| match draft.with_untracked(|d| d.apply(command)) {
        Ok(next) => draft.set(next),
        Err(e) => log::warn!("Item edit rejected: {}", e),
    };

    let save = move |_| {
        let Some(id) = item_id else {
            return;
        };
        let snapshot = draft.get_untracked();
        let uploads = file_inputs.with_value(|inputs| chosen_files(inputs, &snapshot));
        set_reloading.set(true);
        set_error.set(None);
        set_field_errors.set(BTreeMap::new());
        spawn_local(async move {
            match store(id, snapshot, uploads).await {
                Ok(item) => {
                    log::info!("Saved item {}", id);
                    draft.set(ItemDraft::from_item(&item));
                }
                Err(e) => {
                    log::error!("Couldn't save item {}: {}", id, e);
                    set_field_errors.set(e.field_errors());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_reloading.set(false);
        });
    };

    let render_field = move |(key, kind): (String, FieldType)| {
        let is_custom = draft.with_untracked(|d| !d.is_schema_field(&key));
        let editor = if kind == FieldType::File {
            let input_ref = NodeRef::<html::Input>::new();
            file_inputs.update_value(|inputs| {
                inputs.insert(key.clone(), input_ref);
            });
            let key = key.clone();
            let stored = move || draft.with(|d| d.input(&key));
            let link = stored.clone();
            view! {
                <span class="file-field">
                    <a href=move || media_path(&link()) target="_blank">{stored}</a>
                    <input type="file" node_ref=input_ref />
                </span>
            }
            .into_any()
        } else {
            let value_key = key.clone();
            let change_key = key.clone();
            view! {
                <LazyAutocomplete
                    name=key.clone()
                    url=api::common_values_url(&key)
                    value=Signal::derive(move || draft.with(|d| d.input(&value_key)))
                    on_change=move |input: String| apply(ItemCommand::SetValue {
                        key: change_key.clone(),
                        input,
                    })
                />
            }
            .into_any()
        };
        let remove_key = key.clone();
        let error_key = key.clone();
        let colspan = if is_custom { "3" } else { "2" };
        view! {
            <tr>
                <td><label>{key}</label></td>
                <td>{editor}</td>
                {is_custom.then(|| view! {
                    <td>
                        <button
                            type="button"
                            on:click=move |_| apply(ItemCommand::RemoveField { key: remove_key.clone() })
                        >
                            "Remove"
                        </button>
                    </td>
                })}
            </tr>
            {move || field_errors.with(|errors| errors.get(&error_key).cloned()).map(|message| view! {
                <tr>
                    <td colspan=colspan style="color: red;">{message}</td>
                </tr>
            })}
        }
    };

    let schema_fields = move || {
        draft.with(|d| {
            d.template
                .fields
                .iter()
                .map(|(key, kind)| (key.clone(), *kind))
                .collect::<Vec<_>>()
        })
    };
    let extension_fields = move || {
        draft.with(|d| {
            d.extension_fields()
                .into_iter()
                .map(|key| {
                    let kind = d.kind_of(&key);
                    (key, kind)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="flex-vertical">
            <h1>{move || draft.with(|d| d.title())}</h1>
            <table>
                <For each=schema_fields key=|field| field.clone() children=render_field />
            </table>
            <h2>"Additional Attributes"</h2>
            <table>
                <For each=extension_fields key=|field| field.clone() children=render_field />
            </table>
            <AddKeyRow
                with_type=true
                can_add=move |(key, kind): (String, FieldType)| draft.with(|d| d.can_add(&key, kind))
                on_add=move |(key, kind): (String, FieldType)| apply(ItemCommand::AddField { key, kind })
            />
            <button type="button" disabled=move || reloading.get() on:click=save>"Save"</button>
            {move || error.get().map(|e| view! { <span class="error" style="color: red;">{e}</span> })}
            {move || (error.with(Option::is_none) && reloading.get()).then_some("Reloading...")}
        </div>
    }
}

