use thiserror::Error;

pub type WarpResult<T> = Result<T, WarpError>;

#[derive(Debug, Error)]
pub enum WarpError {
    /// Rejected configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// Exception thrown by the 2D context or the DOM.
    #[error("canvas error: {0}")]
    Canvas(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl WarpError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WarpError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Canvas(msg)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WarpError> for wasm_bindgen::JsValue {
    fn from(err: WarpError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
