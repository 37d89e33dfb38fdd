use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;

pub use presentation::BubblePlotApi;

/// Install panic hook, console logger and browser clock
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = if cfg!(debug_assertions) {
        infrastructure::ConsoleLogger::new_development()
    } else {
        infrastructure::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(console_logger));
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "bubble plot module initialized");
}

/// Mount the range exercise page on `<body>`, talking to the API at `api_base`.
#[wasm_bindgen(js_name = mountApp)]
pub fn mount_app(api_base: String) {
    leptos::mount_to_body(move || {
        leptos::view! { <app::App api_base=api_base.clone() /> }
    });
}
