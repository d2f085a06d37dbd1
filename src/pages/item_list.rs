//! Item List Page
//!
//! Query bar with key/value suggestions, the matching items and a column
//! chooser.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::AutoComplete;
use crate::config::initial_columns;
use crate::context::use_app_context;
use crate::models::ListedItem;
use crate::navigation::{current_pathname, current_search, query_param, search_path, NEW_ITEM_PATH};
use crate::query::QueryAssist;
use crate::suggest::Completion;

#[component]
pub fn ItemList(
    items: Vec<ListedItem>,
    keys: Vec<String>,
    queried_keys: Vec<String>,
    common_keys: Vec<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let initial = query_param(&current_search(), "query").unwrap_or_default();
    let assist = RwSignal::new(QueryAssist::new(&initial));
    let columns = RwSignal::new(initial_columns(&keys, &queried_keys, &common_keys));
    let keys = StoredValue::new(keys);
    let items = StoredValue::new(items);

    spawn_local(async move {
        match api::common_keys().await {
            Ok(keys) => {
                log::debug!("{} common keys", keys.len());
                assist.update(|a| a.receive_keys(keys));
            }
            Err(e) => log::error!("Couldn't load common keys: {}", e),
        }
    });

    // Fetch the value vocabularies the parser asked for
    Effect::new(move |_| {
        assist.track();
        let requests = assist
            .try_update_untracked(|a| a.take_requests())
            .unwrap_or_default();
        for key in requests {
            spawn_local(async move {
                match api::common_values(&key).await {
                    Ok(values) => assist.update(|a| a.receive_values(&key, values)),
                    Err(e) => {
                        log::error!("Couldn't load values of {}: {}", key, e);
                        assist.update(|a| a.forget_pending(&key));
                    }
                }
            });
        }
    });

    let shown_keys = move || {
        columns.with(|shown| {
            keys.with_value(|keys| {
                keys.iter()
                    .filter(|key| shown.get(*key).copied().unwrap_or(false))
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    };

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let query = assist.with_untracked(|a| a.text().to_string());
        ctx.navigate(&search_path(&current_pathname(), &query));
    };

    let rows = move || {
        let shown = shown_keys();
        items.with_value(|items| {
            items
                .iter()
                .map(|item| {
                    let cells = shown
                        .iter()
                        .map(|key| view! { <td>{item.cell(key)}</td> })
                        .collect_view();
                    view! {
                        <tr>
                            <td><b><a href=item.url.clone()>{item.name.clone()}</a></b></td>
                            {cells}
                            <td>{item.amount_text()}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let column_toggles = keys.with_value(|keys| {
        keys.iter()
            .map(|key| {
                let toggle_key = key.clone();
                let dot_key = key.clone();
                let is_shown = move || columns.with(|c| c.get(&dot_key).copied().unwrap_or(false));
                view! {
                    <div
                        class="clickable"
                        on:click=move |_| columns.update(|c| {
                            let shown = c.entry(toggle_key.clone()).or_insert(false);
                            *shown = !*shown;
                        })
                    >
                        <span style=move || if is_shown() { "color: white;" } else { "color: gray;" }>"• "</span>
                        {key.clone()}
                    </div>
                }
            })
            .collect_view()
    });

    view! {
        <div class="flex-vertical">
            <form on:submit=on_search>
                <AutoComplete
                    assist=assist
                    name="query"
                    class="searchbar"
                    on_input=move |(text, cursor): (String, usize)| assist.update(|a| a.set_query(&text, cursor))
                />
                <input type="submit" value="Search" />
            </form>
            <div class="flex-horizontal">
                <table class="itemtable">
                    <thead>
                        <tr>
                            <th></th>
                            {move || shown_keys().into_iter().map(|key| view! { <th>{key}</th> }).collect_view()}
                            <th>"#"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                <div class="flex-vertical column-toggles">{column_toggles}</div>
            </div>
            <button type="button" on:click=move |_| ctx.navigate(NEW_ITEM_PATH)>"Create new item"</button>
        </div>
    }
}
