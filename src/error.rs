// Errors hit while mounting an effect onto the page. None of these are fatal:
// the exported effects log them and stay inert.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum FxError {
    NoWindow,
    NoDocument,
    NoBody,
    MissingElement(String),
    NotACanvas(String),
    NoContext,
    Js(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::NoWindow => write!(f, "no global window"),
            FxError::NoDocument => write!(f, "window has no document"),
            FxError::NoBody => write!(f, "document has no body"),
            FxError::MissingElement(id) => write!(f, "no element with id '{}'", id),
            FxError::NotACanvas(id) => write!(f, "element '{}' is not a canvas", id),
            FxError::NoContext => write!(f, "canvas has no 2d context"),
            FxError::Js(msg) => write!(f, "javascript error: {}", msg),
        }
    }
}

impl std::error::Error for FxError {}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        FxError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FxError> for JsValue {
    fn from(err: FxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
