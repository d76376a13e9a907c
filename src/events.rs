pub mod keyboard;

use crate::controls::NAV_BUTTONS;
use crate::dom;
use pulse_core::StateStep;
use std::rc::Rc;
use web_sys as web;

/// Hook `#next-btn` / `#prev-btn` to `navigate`. Missing buttons are skipped.
pub fn wire_nav_buttons(document: &web::Document, navigate: Rc<dyn Fn(StateStep)>) {
    for (id, step) in NAV_BUTTONS {
        let nav = navigate.clone();
        if !dom::add_click_listener(document, id, move || (*nav)(step)) {
            log::debug!("[events] no #{} on page", id);
        }
    }
}
