use crate::controls::step_for_key;
use pulse_core::StateStep;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, navigate: &dyn Fn(StateStep)) {
    if ev.repeat() {
        return;
    }
    if let Some(step) = step_for_key(&ev.key()) {
        log::debug!("[keys] {} -> {:?}", ev.key(), step);
        navigate(step);
        ev.prevent_default();
    }
}

pub fn wire_keydown(navigate: Rc<dyn Fn(StateStep)>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_keydown(&ev, navigate.as_ref());
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
