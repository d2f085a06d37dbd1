//! Organizer Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod draft;
mod error;
mod format;
mod layout;
mod models;
mod navigation;
mod pages;
mod query;
mod suggest;
mod tree;

use app::App;
use config::PageConfig;
use console_logger::{parse_level, ConsoleLogger};
use leptos::prelude::*;

/// Read the page config with the logger already installed, so problems with
/// the props are reported, then switch to the configured level.
fn load_config(read: impl FnOnce() -> PageConfig) -> PageConfig {
    ConsoleLogger::init(parse_level(None));
    let config = read();
    log::set_max_level(parse_level(config.log_level.as_deref()));
    config
}

fn main() {
    console_error_panic_hook::set_once();
    let config = load_config(PageConfig::from_document);
    log::info!("Mounting {} page", config.page.kind());
    mount_to_body(move || view! { <App config=config.clone() /> });
}
