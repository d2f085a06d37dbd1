//! Pages
//!
//! One top-level view per server-rendered page.

mod browser;
mod item_edit;
mod item_list;
mod search;
mod templates;

pub use browser::Browser;
pub use item_edit::EditItem;
pub use item_list::ItemList;
pub use search::SearchList;
pub use templates::{EditTemplate, NewTemplate, TemplatesPage};
