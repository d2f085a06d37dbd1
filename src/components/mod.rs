//! UI Components
//!
//! Reusable Leptos components.

mod add_key_row;
mod autocomplete;
mod container_tree;
mod delete_confirm_button;
mod lazy_autocomplete;
mod split_screen;
mod text_input;
mod type_selector;

pub use add_key_row::AddKeyRow;
pub use autocomplete::AutoComplete;
pub use container_tree::ContainerTree;
pub use delete_confirm_button::DeleteConfirmButton;
pub use lazy_autocomplete::LazyAutocomplete;
pub use split_screen::SplitScreen;
pub use text_input::TextInput;
pub use type_selector::FieldTypeSelector;
