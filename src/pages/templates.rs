//! Template Pages
//!
//! Template tree on the left, editor for the opened template (or the form
//! for a new child template) on the right.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateTemplateArgs, SaveTemplateArgs};
use crate::components::{AddKeyRow, ContainerTree, DeleteConfirmButton, SplitScreen, TextInput};
use crate::context::use_app_context;
use crate::draft::{TemplateCommand, TemplateDraft};
use crate::error::DraftError;
use crate::models::FieldType;
use crate::navigation::{current_pathname, template_path, trailing_id};
use crate::tree::ContainerTable;

/// What the right pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Editor {
    Edit(i64),
    New { parent: i64 },
}

impl Editor {
    /// Tree node highlighted while this editor is open
    fn selected(self) -> Option<u32> {
        match self {
            Editor::Edit(id) | Editor::New { parent: id } => u32::try_from(id).ok(),
        }
    }
}

#[component]
pub fn TemplatesPage(containers: ContainerTable, root: u32) -> impl IntoView {
    let initial = trailing_id(&current_pathname()).unwrap_or(i64::from(root));
    let (editor, set_editor) = signal(Editor::Edit(initial));
    // Reopening the same template keeps its editor
    let current = Memo::new(move |_| editor.get());
    let (new_item_name, set_new_item_name) = signal(String::new());
    let table = StoredValue::new(containers);

    let open_template = move |id: i64| set_editor.set(Editor::Edit(id));

    let create_template = move |parent: u32| {
        let parent = i64::from(parent);
        set_new_item_name.set(String::new());
        set_editor.set(Editor::New { parent });
        // A child starts with its parent's naming template
        spawn_local(async move {
            match api::get_template(parent).await {
                Ok(template) => set_new_item_name.set(template.item_name),
                Err(e) => log::error!("Couldn't load template {}: {}", parent, e),
            }
        });
    };

    let opened: Vec<u32> = u32::try_from(initial).ok().into_iter().collect();
    let selected = move || current.get().selected();

    view! {
        <SplitScreen
            left=move || view! {
                <ContainerTree
                    containers=table.get_value()
                    root=root
                    initially_opened=opened.clone()
                    selected=Signal::derive(selected)
                    on_open=move |id: u32| open_template(i64::from(id))
                    on_create=create_template
                />
            }
            right=move || match current.get() {
                Editor::Edit(id) => view! {
                    <EditTemplate id=id open_template=open_template />
                }
                .into_any(),
                Editor::New { parent } => view! {
                    <NewTemplate parent=parent item_name=new_item_name />
                }
                .into_any(),
            }
        />
    }
}

/// Editor of one template's naming pattern and own fields
#[component]
pub fn EditTemplate(id: i64, #[prop(into)] open_template: Callback<i64>) -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(TemplateDraft::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        match api::get_template(id).await {
            Ok(template) => draft.set(TemplateDraft::new(template)),
            Err(e) => {
                log::error!("Couldn't load template {}: {}", id, e);
                set_error.set(Some(e.to_string()));
            }
        }
    });

    let apply = move |command: TemplateCommand| match draft.with_untracked(|d| d.apply(command)) {
        Ok(next) => draft.set(next),
        Err(e) => {
            log::warn!("Template edit rejected: {}", e);
            set_error.set(Some(e.to_string()));
        }
    };

    let save = move |_| {
        let snapshot = draft.get_untracked();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let args = SaveTemplateArgs {
                item_name: &snapshot.template.item_name,
                fields: snapshot.own_field_types(),
            };
            match api::save_template(id, &args).await {
                Ok(template) => {
                    log::info!("Saved template {}", id);
                    draft.set(TemplateDraft::new(template));
                }
                Err(e) => {
                    log::error!("Couldn't save template {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
        });
    };

    let delete = move |_: ()| {
        let parent = draft.with_untracked(|d| d.template.parent.id);
        spawn_local(async move {
            match api::delete_template(id).await {
                Ok(()) => ctx.navigate(&template_path(parent)),
                Err(e) => {
                    log::error!("Couldn't delete template {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let parent_fields = move || draft.with(|d| d.parent_fields());
    let own_fields = move || {
        draft.with(|d| {
            d.own_fields()
                .iter()
                .map(|name| (name.clone(), d.template.fields.get(name).copied().unwrap_or_default()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="flex-vertical">
            <h1>{move || draft.with(|d| d.template.name.clone())}</h1>
            <label>
                "Item name "
                <TextInput
                    value=Signal::derive(move || draft.with(|d| d.template.item_name.clone()))
                    on_input=move |value: String| apply(TemplateCommand::SetItemName(value))
                />
            </label>
            <h1
                class="clickable"
                on:click=move |_| open_template.run(draft.with_untracked(|d| d.template.parent.id))
            >
                "Inherited from " {move || draft.with(|d| d.template.parent.name.clone())}
            </h1>
            {move || {
                let fields = parent_fields();
                if fields.is_empty() {
                    view! { <p>"Nothing"</p> }.into_any()
                } else {
                    view! {
                        <ul>{fields.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}</ul>
                    }
                    .into_any()
                }
            }}
            <h1>"Own fields"</h1>
            <table>
                <For
                    each=own_fields
                    key=|field| field.clone()
                    children=move |(name, kind): (String, FieldType)| {
                        let to_remove = name.clone();
                        view! {
                            <tr>
                                <td>{name}</td>
                                <td>{kind.as_str()}</td>
                                <td>
                                    <button
                                        type="button"
                                        on:click=move |_| apply(TemplateCommand::RemoveField { name: to_remove.clone() })
                                    >
                                        "Remove"
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </table>
            <AddKeyRow
                with_type=true
                can_add=move |(name, _): (String, FieldType)| draft.with(|d| d.can_add(&name))
                on_add=move |(name, kind): (String, FieldType)| apply(TemplateCommand::AddField { name, kind })
            />
            <div class="button-row">
                <button type="button" disabled=move || saving.get() on:click=save>"Save"</button>
                <DeleteConfirmButton label="Delete" on_confirm=delete />
            </div>
            {move || error.get().map(|e| view! { <span class="error" style="color: red;">{e}</span> })}
        </div>
    }
}

/// Form creating a child template
#[component]
pub fn NewTemplate(parent: i64, #[prop(into)] item_name: Signal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let send = move || {
        let name = name.get_untracked().trim().to_string();
        if name.is_empty() {
            set_error.set(Some(DraftError::EmptyName.to_string()));
            return;
        }
        let item_name = item_name.get_untracked();
        set_error.set(None);
        spawn_local(async move {
            let args = CreateTemplateArgs {
                name: &name,
                item_name: &item_name,
                parent,
                fields: BTreeMap::new(),
            };
            match api::create_template(&args).await {
                Ok(template) => {
                    log::info!("Created template {} under {}", template.id, parent);
                    ctx.navigate(&template_path(template.id));
                }
                Err(e) => {
                    log::error!("Couldn't create template: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="flex-vertical">
            <form on:submit=move |ev| {
                ev.prevent_default();
                send();
            }>
                <label>
                    "Template Name "
                    <TextInput value=name on_input=move |value: String| set_name.set(value) />
                </label>
            </form>
            <p class="hint">"Items will be named " <code>{move || item_name.get()}</code></p>
            <button type="button" on:click=move |_| send()>"Create"</button>
            {move || error.get().map(|e| view! { <span class="error" style="color: red;">{e}</span> })}
        </div>
    }
}
