//! Single-line JSON event logging shared by the page and the static host.
//!
//! Every event is one object: `{"ts": <unix seconds>, "level": ..., "event": ..., ...fields}`.
//! The browser build writes to the console, the native build to stdout.

use serde_json::{Map, Number, Value};

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl Logger {
    pub const fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Unknown or blank values fall back to [`DEFAULT_LOG_LEVEL`].
    pub fn from_value(value: Option<&str>) -> Self {
        Self::new(value.and_then(LogLevel::parse).unwrap_or(DEFAULT_LOG_LEVEL))
    }

    /// Level baked in at compile time, used by the browser build.
    pub fn from_build_env() -> Self {
        Self::from_value(option_env!("PORTFOLIO_LOG_LEVEL"))
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: Value) {
        if !self.enabled(level) {
            return;
        }

        emit(&render_event(now_unix_seconds(), level, event, fields));
    }
}

/// Builds the log line. Non-object `fields` are ignored.
pub fn render_event(ts: u64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &Value) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&line.to_string()));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &Value) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1_000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}
