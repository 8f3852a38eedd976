use gloo::net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static LOG_ENDPOINT: RefCell<Option<String>> = RefCell::new(None);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Serialize)]
struct LogRequest {
    level: String,
    message: String,
    component: Option<String>,
}

pub struct Logger;

impl Logger {
    /// Forward log entries to `endpoint` in addition to the console
    pub fn set_endpoint(endpoint: Option<String>) {
        let endpoint = endpoint.filter(|url| !url.trim().is_empty());
        LOG_ENDPOINT.with(|cell| *cell.borrow_mut() = endpoint);
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, message, component);
    }

    fn log(level: LogLevel, message: &str, component: &str) {
        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }

        let Some(endpoint) = LOG_ENDPOINT.with(|cell| cell.borrow().clone()) else {
            return;
        };
        let request = LogRequest {
            level: level.as_str().to_string(),
            message: message.to_string(),
            component: Some(component.to_string()),
        };

        // Fire and forget; a lost log line must never affect the form
        spawn_local(async move {
            if let Ok(request) = Request::post(&endpoint).json(&request) {
                let _ = request.send().await;
            }
        });
    }
}
