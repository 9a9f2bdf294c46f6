//! Locating the page's [`RoadmapConfig`].

use roadmap_core::{ConfigError, RoadmapConfig};
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

/// Id of the optional inline JSON block carrying page overrides.
pub const CONFIG_SCRIPT_ID: &str = "roadmap-config";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config object rejected: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<serde_wasm_bindgen::Error> for LoadError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::Js(err.to_string())
    }
}

/// Deserialize a config handed over from JavaScript.
///
/// # Errors
/// Returns an error if the object does not match the config shape or fails
/// validation.
pub fn from_js(value: JsValue) -> Result<RoadmapConfig, LoadError> {
    let config: RoadmapConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate()?;
    Ok(config)
}

/// Parse the inline `<script type="application/json" id="roadmap-config">`
/// block. `Ok(None)` when the page has none.
///
/// # Errors
/// Returns an error if the block is present but malformed.
pub fn from_script(doc: &Document) -> Result<Option<RoadmapConfig>, LoadError> {
    let Some(text) = doc
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(RoadmapConfig::from_json(&text)?))
}

/// Pick the explicit config, then the inline block, then defaults. Broken
/// sources are reported and skipped so the page still gets its behavior.
#[must_use]
pub fn resolve(explicit: Option<JsValue>, doc: &Document) -> RoadmapConfig {
    if let Some(value) = explicit.filter(|v| !v.is_undefined() && !v.is_null()) {
        match from_js(value) {
            Ok(config) => return config,
            Err(err) => dom::console_error(&format!("Ignoring roadmap config: {err}")),
        }
    }
    match from_script(doc) {
        Ok(Some(config)) => config,
        Ok(None) => RoadmapConfig::default(),
        Err(err) => {
            dom::console_error(&format!("Ignoring #{CONFIG_SCRIPT_ID} block: {err}"));
            RoadmapConfig::default()
        }
    }
}
