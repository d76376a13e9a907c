// Pure key/button mapping for state navigation; no DOM types so it runs on the host.
use pulse_core::StateStep;

/// Navigation buttons and the step each one triggers.
pub const NAV_BUTTONS: [(&str, StateStep); 2] = [
    ("next-btn", StateStep::Advance),
    ("prev-btn", StateStep::Retreat),
];

#[inline]
pub fn step_for_key(key: &str) -> Option<StateStep> {
    match key {
        "ArrowRight" => Some(StateStep::Advance),
        "ArrowLeft" => Some(StateStep::Retreat),
        _ => None,
    }
}
