use instant::Instant;
use pulse_core::{IdleReason, Renderer, Session, TickClock, TickOutcome};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub renderer: Box<dyn Renderer>,
    pub clock: TickClock,
    pub started: Instant,
    pub idle: Option<IdleReason>,
}

impl FrameContext {
    pub fn new(session: Rc<RefCell<Session>>, renderer: Box<dyn Renderer>) -> Self {
        let clock = TickClock::new(session.borrow().config().tick_rate);
        Self {
            session,
            renderer,
            clock,
            started: Instant::now(),
            idle: None,
        }
    }

    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if !self.clock.due(now_ms) {
            return;
        }
        let outcome = self.session.borrow_mut().tick(self.renderer.as_mut());
        let idle = match outcome {
            TickOutcome::Idle(reason) => Some(reason),
            TickOutcome::Rendered { .. } => None,
        };
        if idle != self.idle {
            match idle {
                Some(reason) => log::info!("[frame] idle: {:?}", reason),
                None => log::info!("[frame] rendering"),
            }
            self.idle = idle;
        }
    }
}

/// Flip `running` off when the page is hidden for good.
pub fn wire_pagehide(running: Rc<Cell<bool>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || {
            running.set(false);
            log::info!("[frame] pagehide, stopping loop");
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, running: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
