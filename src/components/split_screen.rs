//! Split Screen Component
//!
//! Two panes with a draggable separator.

use leptos::html;
use leptos::prelude::*;

use crate::layout::{Orientation, SplitState, SEPARATOR_WIDTH};

#[component]
pub fn SplitScreen(
    #[prop(into)] left: ViewFn,
    #[prop(into)] right: ViewFn,
    #[prop(optional)] orientation: Orientation,
    #[prop(default = SEPARATOR_WIDTH)] separator_width: &'static str,
) -> impl IntoView {
    let split = RwSignal::new(SplitState::default());
    let outer = NodeRef::<html::Div>::new();

    // The drag ends on the first move without the primary button,
    // so no mouseup listener is needed.
    let on_mousemove = move |ev: web_sys::MouseEvent| {
        if !split.with_untracked(|s| s.dragging) {
            return;
        }
        let Some(div) = outer.get_untracked() else {
            return;
        };
        let rect = div.get_bounding_client_rect();
        let pointer = orientation.pick(ev.client_x() as f64, ev.client_y() as f64);
        let origin = orientation.pick(rect.left(), rect.top());
        let size = orientation.pick(rect.width(), rect.height());
        let buttons = ev.buttons();
        split.update(|s| s.on_move(pointer, origin, size, buttons));
    };

    let style = move |pane: usize| {
        split.with(|s| s.pane_styles(orientation, separator_width)[pane].clone())
    };

    view! {
        <div
            node_ref=outer
            class="split-screen"
            class:dragging=move || split.with(|s| s.dragging)
            style="position: relative; width: 100%; height: 100%;"
            on:mousemove=on_mousemove
        >
            // Panes re-render when signals read by their view functions change
            <div class="split-pane" style=move || style(0)>{move || left.run()}</div>
            <div
                class="split-separator"
                style=move || style(1)
                on:mousedown=move |ev| {
                    ev.prevent_default();
                    split.update(|s| s.grab());
                }
            ></div>
            <div class="split-pane" style=move || style(2)>{move || right.run()}</div>
        </div>
    }
}
