use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("no element matches {0}")]
    MissingElement(&'static str),

    #[error("browser does not support {0}")]
    Unsupported(&'static str),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl InteractionError {
    /// Expected absence on a page (no markup, no capability), as opposed to a fault.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            InteractionError::MissingElement(_) | InteractionError::Unsupported(_)
        )
    }
}

impl From<JsValue> for InteractionError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        InteractionError::Js(message)
    }
}
