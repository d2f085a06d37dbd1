//! Container Tree Component
//!
//! Expand/collapse view of a container hierarchy. Rows come from
//! `visible_rows`, so nesting depth never turns into nested components.

use leptos::prelude::*;

use crate::tree::{visible_rows, ContainerTable, TreeRow, TreeState};

/// Tree of containers
///
/// Props:
/// - containers/root: the hierarchy to show
/// - initially_opened: nodes whose ancestors start expanded
/// - selected: node drawn as current
/// - on_open: a node's name was clicked; the node is expanded as well
/// - on_create: when given, every expanded node offers "Create new entry here"
#[component]
pub fn ContainerTree(
    containers: ContainerTable,
    root: u32,
    #[prop(optional)] initially_opened: Vec<u32>,
    #[prop(optional, into)] selected: MaybeProp<u32>,
    #[prop(into)] on_open: Callback<u32>,
    #[prop(optional, into)] on_create: Option<Callback<u32>>,
) -> impl IntoView {
    let state = RwSignal::new(TreeState::new(&containers, root, &initially_opened));
    let table = StoredValue::new(containers);

    let rows = move || {
        let state = state.get();
        table.with_value(|t| visible_rows(t, root, &state, on_create.is_some()))
    };

    let render_row = move |row: TreeRow| match row {
        TreeRow::Node { id, depth, expanded } => {
            let (name, has_children) = table.with_value(|t| {
                t.get(&id)
                    .map(|ct| (ct.name.clone(), !ct.children.is_empty()))
                    .unwrap_or_default()
            });
            let is_selected = move || selected.get() == Some(id);
            view! {
                <div
                    class=move || if is_selected() { "tree-row selected" } else { "tree-row" }
                    style=format!("padding-left: {}em;", depth as f32 * 1.5)
                >
                    <span
                        class=if has_children { "tree-caret" } else { "tree-caret leaf" }
                        on:click=move |_| state.update(|s| s.toggle(id))
                    >
                        {if expanded { "▼" } else { "▶" }}
                    </span>
                    <span
                        class="tree-name"
                        on:click=move |_| {
                            state.update(|s| s.expand(id));
                            on_open.run(id);
                        }
                    >
                        {name}
                    </span>
                </div>
            }
            .into_any()
        }
        TreeRow::Create { parent, depth } => {
            let Some(on_create) = on_create else {
                return view! { <div></div> }.into_any();
            };
            view! {
                <div
                    class="tree-row tree-create darker"
                    style=format!("padding-left: {}em;", depth as f32 * 1.5)
                    on:click=move |_| on_create.run(parent)
                >
                    "★ Create new entry here"
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="container-tree">
            <For each=rows key=|row| row.clone() children=render_row />
        </div>
    }
}
