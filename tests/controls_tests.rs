// Host-side tests for key and button navigation mapping.

mod controls {
    include!("../src/controls.rs");
}

use controls::*;
use pulse_core::{StateMachine, StateStep};

#[test]
fn arrow_keys_step_through_states() {
    assert_eq!(step_for_key("ArrowRight"), Some(StateStep::Advance));
    assert_eq!(step_for_key("ArrowLeft"), Some(StateStep::Retreat));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["ArrowUp", "ArrowDown", " ", "Enter", "a", "arrowright", ""] {
        assert_eq!(step_for_key(key), None, "key {:?}", key);
    }
}

#[test]
fn buttons_cover_both_directions() {
    let ids: Vec<&str> = NAV_BUTTONS.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec!["next-btn", "prev-btn"]);
    assert_eq!(NAV_BUTTONS[0].1, StateStep::Advance);
    assert_eq!(NAV_BUTTONS[1].1, StateStep::Retreat);
}

#[test]
fn right_then_left_returns_to_start() {
    let mut states = StateMachine::default();
    let start = states.current().name.clone();
    for key in ["ArrowRight", "ArrowLeft"] {
        if let Some(step) = step_for_key(key) {
            states.step(step);
        }
    }
    assert_eq!(states.current().name, start);
    for key in ["ArrowLeft"; 5] {
        if let Some(step) = step_for_key(key) {
            states.step(step);
        }
    }
    assert_eq!(states.current().name, start);
}
