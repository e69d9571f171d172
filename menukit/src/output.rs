//! Handler results and their per-surface renderings

use serde::Serialize;
use serde_json::Value;

/// What a handler produced
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Passed through verbatim everywhere
    Text(String),
    /// Passed through verbatim, decoded lossily where text is required
    Bytes(Vec<u8>),
    /// Joined by newlines on line-oriented surfaces, a list elsewhere
    Lines(Vec<String>),
    /// Any structured document
    Json(Value),
}

impl Output {
    /// Serialize any value into [`Output::Json`]
    pub fn json<S: Serialize>(value: &S) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Output::Json)
    }

    /// Rendering for the command line: text as-is, lines joined, JSON indented
    pub fn render_lines(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Output::Lines(lines) => lines.join("\n"),
            Output::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Rendering for protocol text content: text as-is, everything else compact JSON
    pub fn render_compact(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Output::Lines(lines) => Value::from(lines.clone()).to_string(),
            Output::Json(value) => value.to_string(),
        }
    }

    /// Rendering as a JSON value for structured envelopes
    pub fn to_value(&self) -> Value {
        match self {
            Output::Text(text) => Value::String(text.clone()),
            Output::Bytes(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            Output::Lines(lines) => Value::from(lines.clone()),
            Output::Json(value) => value.clone(),
        }
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Output::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Output {
    fn from(bytes: Vec<u8>) -> Self {
        Output::Bytes(bytes)
    }
}

impl From<Vec<String>> for Output {
    fn from(lines: Vec<String>) -> Self {
        Output::Lines(lines)
    }
}

impl From<Value> for Output {
    fn from(value: Value) -> Self {
        Output::Json(value)
    }
}
