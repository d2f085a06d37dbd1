//! Search Page

use leptos::prelude::*;

use crate::components::TextInput;
use crate::context::use_app_context;
use crate::models::ListedItem;
use crate::navigation::{current_pathname, current_search, query_param, search_path, NEW_ITEM_PATH};

/// Plain query field over a server-rendered result list
#[component]
pub fn SearchList(items: Vec<ListedItem>) -> impl IntoView {
    let ctx = use_app_context();
    let (query, set_query) = signal(query_param(&current_search(), "query").unwrap_or_default());

    view! {
        <div>
            <a href=NEW_ITEM_PATH>"Create new item"</a>
            <form on:submit=move |ev| {
                ev.prevent_default();
                ctx.navigate(&search_path(&current_pathname(), &query.get_untracked()));
            }>
                <label>
                    <TextInput name="query" value=query on_input=move |value: String| set_query.set(value) />
                </label>
                <input type="submit" value="Search" />
            </form>
            <table>
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"#"</th>
                    </tr>
                </thead>
                <tbody>
                    {items
                        .into_iter()
                        .map(|item| view! {
                            <tr>
                                <td><a href=item.url.clone()>{item.name.clone()}</a></td>
                                <td>{item.amount_text()}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
