#![cfg(target_arch = "wasm32")]
//! Browser entry point: reads page settings, builds a [`Session`] and a
//! renderer, then drives it from `requestAnimationFrame`.

use pulse_core::{InputKind, Mode, Renderer, Session, StateStep, Transition, VisualizerConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod fetch;
mod frame;
mod render;

use constants::*;

struct PageSettings {
    mode: Mode,
    frames_base: Rc<str>,
    initial_state: Option<String>,
    config: VisualizerConfig,
}

// `data-mode`, `data-frames-base`, `data-state` and `data-config` on #visualizer; all optional
fn read_page_settings(document: &web::Document) -> PageSettings {
    let root = document.get_element_by_id(ROOT_ID);
    let attr = |key: &str| root.as_ref().and_then(|el| dom::data_attr(el, key));

    let mode = match attr("mode") {
        Some(raw) => Mode::parse(&raw).unwrap_or_else(|| {
            log::warn!("[init] unknown data-mode '{}', using live", raw);
            Mode::default()
        }),
        None => Mode::default(),
    };
    let preset = mode.config();
    let config = match attr("config") {
        Some(json) => preset.with_overrides(&json).unwrap_or_else(|e| {
            log::error!("[init] ignoring data-config: {}", e);
            preset.clone()
        }),
        None => preset,
    };
    let frames_base = attr("framesBase").unwrap_or_else(|| DEFAULT_FRAMES_BASE.to_string());
    PageSettings {
        mode,
        frames_base: frames_base.into(),
        initial_state: attr("state"),
        config,
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn svg_renderer(document: &web::Document) -> anyhow::Result<Box<dyn Renderer>> {
    let pattern = document
        .get_element_by_id(PATTERN_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", PATTERN_ID))?;
    let shadow = document.get_element_by_id(SHADOW_ID);
    Ok(Box::new(render::SvgRenderer::new(
        document.clone(),
        pattern,
        shadow,
    )))
}

fn build_renderer(
    document: &web::Document,
    input: InputKind,
) -> anyhow::Result<Box<dyn Renderer>> {
    if input == InputKind::Frames {
        if let Some(el) = document.get_element_by_id(SCENE_CANVAS_ID) {
            let canvas: web::HtmlCanvasElement = el
                .dyn_into()
                .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", SCENE_CANVAS_ID, e))?;
            wire_canvas_resize(&canvas);
            return Ok(Box::new(render::SceneRenderer::new(canvas)?));
        }
        log::warn!("[init] no #{}, falling back to SVG", SCENE_CANVAS_ID);
    }
    svg_renderer(document)
}

fn spawn_transition(session: Rc<RefCell<Session>>, frames_base: Rc<str>, transition: Transition) {
    spawn_local(async move {
        let frames = fetch::load_frames(&frames_base, &transition.state).await;
        let failed = frames.is_err();
        let entered = session.borrow_mut().complete_transition(&transition, frames);
        if entered {
            if let Some(document) = dom::window_document() {
                let text = if failed {
                    format!("Frames for '{}' unavailable.", transition.state.name)
                } else {
                    String::new()
                };
                dom::set_status(&document, STATUS_ID, &text);
            }
        }
    });
}

fn wire_navigation(document: &web::Document, session: &Rc<RefCell<Session>>, frames_base: &Rc<str>) {
    let session_nav = session.clone();
    let base_nav = frames_base.clone();
    let navigate: Rc<dyn Fn(StateStep)> = Rc::new(move |step| {
        let transition = session_nav.borrow_mut().request_transition(step);
        log::info!(
            "[nav] #{} -> '{}'",
            transition.request_id,
            transition.state.name
        );
        spawn_transition(session_nav.clone(), base_nav.clone(), transition);
    });
    events::wire_nav_buttons(document, navigate.clone());
    events::keyboard::wire_keydown(navigate);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pulse-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let PageSettings {
        mode,
        frames_base,
        initial_state,
        config,
    } = read_page_settings(&document);
    log::info!(
        "[init] mode={:?} segments={} dots={} tick={:?}",
        mode,
        config.layout.total_segments,
        config.layout.dot_count,
        config.tick_rate
    );

    let input = config.input;
    let mut renderer = build_renderer(&document, input)?;
    let session = Rc::new(RefCell::new(Session::new(config)?));
    session.borrow_mut().attach(renderer.as_mut())?;

    let running = Rc::new(Cell::new(true));
    frame::wire_pagehide(running.clone());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        session.clone(),
        renderer,
    )));
    frame::start_loop(frame_ctx, running);

    match input {
        InputKind::Microphone => match audio::init_microphone().await {
            Ok(mic) => {
                session.borrow_mut().set_spectrum_source(Box::new(mic));
                dom::set_status(&document, STATUS_ID, "");
            }
            Err(e) => {
                log::error!("[audio] microphone unavailable: {:?}", e);
                dom::set_status(&document, STATUS_ID, MIC_DENIED_TEXT);
            }
        },
        InputKind::Frames => {
            wire_navigation(&document, &session, &frames_base);
            let named = initial_state.and_then(|name| {
                let t = session.borrow_mut().request_named(&name);
                if t.is_none() {
                    log::warn!("[init] unknown data-state '{}', starting at the first state", name);
                }
                t
            });
            let first = match named {
                Some(t) => t,
                None => session.borrow_mut().request_state(0),
            };
            spawn_transition(session.clone(), frames_base, first);
        }
    }
    Ok(())
}
