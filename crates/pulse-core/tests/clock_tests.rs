// Host-side tests for fixed-rate tick scheduling against display frames.

use pulse_core::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn count_ticks(clock: &mut TickClock, frame_times: impl Iterator<Item = f64>) -> usize {
    frame_times.filter(|&t| clock.due(t)).count()
}

#[test]
fn every_frame_rate_always_ticks() {
    let mut clock = TickClock::new(TickRate::EveryFrame);
    assert_eq!(count_ticks(&mut clock, (0..120).map(|k| k as f64 * FRAME_MS)), 120);
}

#[test]
fn twelve_per_second_holds_on_a_60hz_display() {
    let mut clock = TickClock::new(TickRate::PerSecond(12));
    // 10 seconds of frames
    let ticks = count_ticks(&mut clock, (0..600).map(|k| k as f64 * FRAME_MS));
    assert!((119..=121).contains(&ticks), "got {ticks} ticks in 10s");
}

#[test]
fn frame_jitter_does_not_lower_the_rate() {
    let mut clock = TickClock::new(TickRate::PerSecond(12));
    // frames land up to 2ms late, alternating, the way rAF timestamps wobble
    let jitter = |k: usize| if k % 2 == 0 { 1.9 } else { 0.3 };
    let ticks = count_ticks(&mut clock, (0..600).map(|k| k as f64 * FRAME_MS + jitter(k)));
    assert!((119..=121).contains(&ticks), "got {ticks} ticks in 10s");
}

#[test]
fn slow_displays_tick_every_frame_without_bursts() {
    let mut clock = TickClock::new(TickRate::PerSecond(12));
    // 10 Hz display is slower than the tick rate: one tick per frame, never more
    let ticks = count_ticks(&mut clock, (0..100).map(|k| k as f64 * 100.0));
    assert_eq!(ticks, 100);
}

#[test]
fn long_stall_resyncs_instead_of_catching_up() {
    let mut clock = TickClock::new(TickRate::PerSecond(10));
    assert!(clock.due(0.0));
    assert!(clock.due(5_000.0));
    // the next deadline is one interval after the stall, not back at 200ms
    assert!(!clock.due(5_050.0));
    assert!(clock.due(5_100.0));
}

#[test]
fn reset_fires_on_the_next_frame() {
    let mut clock = TickClock::new(TickRate::PerSecond(12));
    assert!(clock.due(0.0));
    assert!(!clock.due(10.0));
    clock.reset();
    assert!(clock.due(11.0));
    assert_eq!(clock.interval_ms(), 1000.0 / 12.0);
}
