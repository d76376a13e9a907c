use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use pulse_core::SpectrumSource;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Microphone spectrum read straight from an analyser node.
pub struct MicSpectrum {
    // Kept alive for as long as the analyser is read.
    _audio_ctx: web::AudioContext,
    _source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
    sample_rate: f32,
    bins: usize,
}

impl SpectrumSource for MicSpectrum {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read(&mut self, buf: &mut [u8]) -> bool {
        if buf.len() != self.bins {
            return false;
        }
        self.analyser.get_byte_frequency_data(buf);
        true
    }
}

fn js_err(what: &str, e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{}: {:?}", what, e)
}

// Create analyser with the ring's fft size and smoothing
pub fn create_analyser(audio_ctx: &web::AudioContext) -> anyhow::Result<web::AnalyserNode> {
    let analyser = web::AnalyserNode::new(audio_ctx).map_err(|e| js_err("AnalyserNode", e))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
    Ok(analyser)
}

/// Ask for the microphone and wire it into an analyser.
///
/// Fails when permission is denied or the browser has no `mediaDevices`;
/// the caller keeps the session idle in that case.
pub async fn init_microphone() -> anyhow::Result<MicSpectrum> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| js_err("mediaDevices", e))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| js_err("getUserMedia", e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| js_err("getUserMedia", e))?
        .dyn_into()
        .map_err(|e| js_err("MediaStream", e))?;

    let audio_ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
    let source = audio_ctx
        .create_media_stream_source(&stream)
        .map_err(|e| js_err("MediaStreamSource", e))?;
    let analyser = create_analyser(&audio_ctx)?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| js_err("connect", e))?;

    log::info!("[audio] context state: {:?}", audio_ctx.state());
    if audio_ctx.state() == web::AudioContextState::Suspended {
        if let Ok(p) = audio_ctx.resume() {
            if let Err(e) = JsFuture::from(p).await {
                log::warn!("[audio] resume failed: {:?}", e);
            } else {
                log::info!("[audio] context resumed");
            }
        }
    }

    let bins = analyser.frequency_bin_count() as usize;
    let sample_rate = audio_ctx.sample_rate();
    Ok(MicSpectrum {
        _audio_ctx: audio_ctx,
        _source: source,
        analyser,
        sample_rate,
        bins,
    })
}
