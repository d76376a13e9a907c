//! Browser drawing backends for the ring.

mod scene;
mod svg;

pub use scene::SceneRenderer;
pub use svg::SvgRenderer;

use wasm_bindgen::JsValue;

pub(crate) fn backend_err(what: &str, e: JsValue) -> pulse_core::RenderError {
    pulse_core::RenderError::Backend(format!("{}: {:?}", what, e))
}
