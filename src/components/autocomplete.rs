//! Autocomplete Component
//!
//! Text input with a keyboard-driven suggestion dropdown. Text and
//! suggestion state live in the caller's `Completion` value.

use leptos::html;
use leptos::prelude::*;

use crate::query::{byte_to_utf16, utf16_to_byte};
use crate::suggest::{Completion, Key, KeyAction};

/// Current text and byte cursor of an input
fn read_input(input: &web_sys::HtmlInputElement) -> (String, usize) {
    let text = input.value();
    let cursor = match input.selection_start() {
        Ok(Some(pos)) => utf16_to_byte(&text, pos),
        _ => text.len(),
    };
    (text, cursor)
}

/// Input with suggestion dropdown
///
/// Props:
/// - assist: owner of the text and suggestion state
/// - on_input: receives (text, byte cursor) after every edit or caret move
/// - on_focus: runs after the dropdown is shown on focus
/// - on_commit: runs after a suggestion changed the text
#[component]
pub fn AutoComplete<A>(
    assist: RwSignal<A>,
    #[prop(into)] on_input: Callback<(String, usize)>,
    #[prop(optional, into)] on_focus: Option<Callback<()>>,
    #[prop(optional, into)] on_commit: Option<Callback<()>>,
    #[prop(optional, into)] name: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView
where
    A: Completion + Send + Sync + 'static,
{
    let input_ref = NodeRef::<html::Input>::new();

    let report = move || {
        if let Some(input) = input_ref.get_untracked() {
            on_input.run(read_input(&input));
        }
    };

    // Write the completed text back and park the caret behind the completion
    let sync_input = move || {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let (text, caret) = assist.with_untracked(|a| (a.text().to_string(), a.caret()));
        input.set_value(&text);
        let pos = byte_to_utf16(&text, caret);
        if let Err(e) = input.set_selection_range(pos, pos) {
            log::warn!("Cannot move caret: {:?}", e);
        }
    };

    let commit = move || {
        let changed = assist.try_update(|a| a.complete()).unwrap_or(false);
        if changed {
            sync_input();
            if let Some(on_commit) = on_commit {
                on_commit.run(());
            }
        }
        changed
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = Key::from_name(&ev.key());
        if key == Key::Other {
            return;
        }
        let action = assist
            .try_update(|a| a.suggestions_mut().on_key(key))
            .unwrap_or(KeyAction::Ignored);
        match action {
            KeyAction::Moved => ev.prevent_default(),
            KeyAction::Commit => {
                // Enter only suppresses form submission when the text changed
                if commit() || key == Key::Tab {
                    ev.prevent_default();
                }
            }
            KeyAction::Ignored => {}
        }
    };

    // Caret moves without edits still re-anchor the suggestions
    let on_keyup = move |ev: web_sys::KeyboardEvent| {
        if matches!(ev.key().as_str(), "ArrowLeft" | "ArrowRight" | "Home" | "End") {
            report();
        }
    };

    let dropdown = move || {
        let shown = assist.with(|a| {
            let s = a.suggestions();
            s.shows_dropdown()
                .then(|| (s.options.clone().unwrap_or_default(), s.index))
        });
        let Some((options, index)) = shown else {
            return view! { <div></div> }.into_any();
        };
        view! {
            <div class="autocomplete-list">
                {options.into_iter().enumerate().map(|(i, option)| {
                    view! {
                        <div
                            class=if index == Some(i) { "autocomplete-item selected" } else { "autocomplete-item" }
                            on:mouseenter=move |_| assist.update(|a| a.suggestions_mut().index = Some(i))
                            on:mousedown=move |ev| {
                                // Keep focus in the input
                                ev.prevent_default();
                                assist.update(|a| a.suggestions_mut().index = Some(i));
                                commit();
                            }
                        >
                            {option}
                        </div>
                    }
                }).collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="autocomplete">
            <input
                type="text"
                node_ref=input_ref
                name=name
                class=class
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || assist.with(|a| a.text().to_string())
                on:input=move |_| report()
                on:keydown=on_keydown
                on:keyup=on_keyup
                on:click=move |_| report()
                on:focus=move |_| {
                    assist.update(|a| a.suggestions_mut().show());
                    if let Some(on_focus) = on_focus {
                        on_focus.run(());
                    }
                }
                on:blur=move |_| assist.update(|a| a.suggestions_mut().hide())
            />
            {dropdown}
        </div>
    }
}
