// Host-side tests for the visual state table and state machine.

use pulse_core::*;

#[test]
fn default_table_has_five_named_states() {
    let states = default_states();
    let names: Vec<&str> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["company", "homepage", "partner", "platform", "solutions"]);
    let platform = &states[3];
    assert_eq!(platform.color_a, 0x8faae2);
    assert_eq!(platform.color_b, 0xb1e088);
    assert_eq!(platform.rotation_deg, -90.0);
    assert!(platform.prep.normalize.is_some());
    assert_eq!(states[0].frame_file(), "company.json");
}

#[test]
fn advance_and_retreat_wrap_around() {
    let mut machine = StateMachine::default();
    assert_eq!(machine.current().name, "company");
    assert_eq!(machine.retreat().name, "solutions");
    assert_eq!(machine.advance().name, "company");
    for _ in 0..5 {
        machine.advance();
    }
    assert_eq!(machine.current_index(), 0);
}

#[test]
fn peek_does_not_move() {
    let machine = StateMachine::default();
    assert_eq!(machine.peek(StateStep::Advance), 1);
    assert_eq!(machine.peek(StateStep::Retreat), 4);
    assert_eq!(machine.current_index(), 0);
}

#[test]
fn lookup_by_name() {
    let machine = StateMachine::default();
    assert_eq!(machine.index_of("partner"), Some(2));
    assert_eq!(machine.index_of("missing"), None);
}

#[test]
fn select_wraps_out_of_range_indices() {
    let mut machine = StateMachine::default();
    assert_eq!(machine.select(7).name, "partner");
}

#[test]
fn empty_table_is_rejected() {
    assert_eq!(StateMachine::new(Vec::new()).err(), Some(ConfigError::NoStates));
}

#[test]
fn state_colors_become_gradient_mode() {
    let state = StateConfig::new("x", 0x111111, 0x222222, 0.0);
    assert_eq!(
        state.color_mode(),
        ColorMode::Gradient {
            color_a: 0x111111,
            color_b: 0x222222
        }
    );
}

#[test]
fn company_frames_are_extended_at_load() {
    let company = &default_states()[0];
    let variations = company.prep.variations.unwrap();
    assert_eq!(variations.repeats, 10);
    let seq = FrameSequence::from_json_with("[[0.5, 0.5], [0.2, 0.3]]", &company.prep).unwrap();
    assert_eq!(seq.len(), 20);
    for frame in seq.frames() {
        assert_eq!(frame.len(), 2);
        for &v in frame {
            assert!((0.0..=1.0).contains(&v));
            assert_eq!((v * 100.0).round() / 100.0, v, "{v} not rounded to 2 places");
        }
    }
    // the other states play their files as-is, apart from platform's normalization
    assert!(default_states()[1..].iter().all(|s| s.prep.variations.is_none()));
}
