//! Caseboard Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod markdown;
mod store;
mod toast;

use app::App;
use leptos::prelude::*;
use rolling_logger::{Level, LevelFilter, LoggerConfig};

fn to_console(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let logger = LoggerConfig::default().with_level(level).with_sink(to_console);
    if let Err(e) = rolling_logger::init_logger("Caseboard", logger) {
        web_sys::console::warn_1(&format!("logger unavailable: {}", e).into());
    }
    let _ = rolling_logger::info("Caseboard starting");

    mount_to_body(App);
}
