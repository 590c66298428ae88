//! Structured error types for figgrid.
//!
//! Errors only originate at the host seams (clipboard, configuration, JS
//! value conversion). `GridEditor` turns them into status messages; none of
//! its operations propagate an error to the caller.

/// All errors that can occur at figgrid's host boundaries.
#[derive(Debug, thiserror::Error)]
pub enum FiggridError {
    /// The host clipboard refused or failed a read/write.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// Invalid editor configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization of a dataset or configuration.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A host-provided object had an unexpected shape.
    #[error("Host error: {0}")]
    Host(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FiggridError>;

impl From<String> for FiggridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FiggridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FiggridError> for wasm_bindgen::JsValue {
    fn from(e: FiggridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
