use pulse_core::{FrameSequence, StateConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub fn frames_url(base: &str, state: &StateConfig) -> String {
    format!("{}/{}", base.trim_end_matches('/'), state.frame_file())
}

/// Fetch and parse a state's frame file, applying the state's frame prep.
pub async fn load_frames(base: &str, state: &StateConfig) -> anyhow::Result<FrameSequence> {
    let url = frames_url(base, state);
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let text = JsFuture::from(
        resp.text()
            .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?
    .as_string()
    .ok_or_else(|| anyhow::anyhow!("read {}: body is not text", url))?;

    let frames = FrameSequence::from_json_with(&text, &state.prep)?;
    log::info!("[fetch] {} -> {} frames", url, frames.len());
    Ok(frames)
}
