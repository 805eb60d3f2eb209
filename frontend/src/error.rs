use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("window is not available")]
    NoWindow,
    #[error("IntersectionObserver is not supported")]
    ObserverUnsupported,
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Js(message)
    }
}
