//! Container Browser Page

use leptos::prelude::*;

use crate::components::ContainerTree;
use crate::context::use_app_context;
use crate::navigation::{container_path, current_pathname, new_container_path, trailing_id};
use crate::tree::ContainerTable;

#[component]
pub fn Browser(containers: ContainerTable, root: u32) -> impl IntoView {
    let ctx = use_app_context();
    let current = trailing_id(&current_pathname()).and_then(|id| u32::try_from(id).ok());

    view! {
        <div class="browser">
            <ContainerTree
                containers=containers
                root=root
                initially_opened=current.into_iter().collect()
                selected=current
                on_open=move |id: u32| ctx.navigate(&container_path(id))
                on_create=move |parent: u32| ctx.navigate(&new_container_path(parent))
            />
        </div>
    }
}
