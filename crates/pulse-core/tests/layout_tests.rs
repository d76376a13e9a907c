// Host-side tests for radial layout, colors and the shadow aggregate.

use glam::Vec3;
use pulse_core::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn silence_leaves_every_dot_on_its_base_ring() {
    for taper in [PulseTaper::Linear, PulseTaper::Uniform] {
        let config = LayoutConfig {
            taper,
            ..LayoutConfig::default()
        };
        let engine = LayoutEngine::new(config, ColorMode::AmplitudeHue);
        let points = engine.layout(&vec![0.0; config.total_segments]);
        assert_eq!(points.len(), config.total_segments * config.dot_count);
        for p in &points {
            assert_eq!(p.distance, config.base_radius + p.dot as f32 * config.dot_spacing);
        }
    }
}

#[test]
fn linear_taper_leaves_inner_dot_and_drives_outer_dots() {
    let config = LayoutConfig::default();
    let engine = LayoutEngine::new(config, ColorMode::AmplitudeHue);
    let points = engine.layout(&vec![1.0; config.total_segments]);
    let line: Vec<_> = points.iter().filter(|p| p.segment == 0).collect();
    assert_eq!(line.len(), 11);
    assert_eq!(line[0].distance, 100.0);
    let outer = 100.0 + 10.0 * 5.0 + 50.0 * (10.0 / 11.0);
    assert!(close(line[10].distance, outer));
    // pulse share grows outward
    let pulses: Vec<f32> = line
        .iter()
        .map(|p| p.distance - config.rest_distance(p.dot))
        .collect();
    assert!(pulses.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn uniform_taper_moves_every_dot_fully() {
    let config = LayoutConfig {
        dot_spacing: 10.0,
        taper: PulseTaper::Uniform,
        ..LayoutConfig::default()
    };
    assert_eq!(config.distance(0, 0.5), 125.0);
    assert_eq!(config.distance(3, 0.5), 155.0);
}

#[test]
fn segments_occupy_fixed_angular_slots() {
    let config = LayoutConfig::default();
    assert_eq!(config.angle_degrees(0), 0.0);
    assert!(close(config.angle_degrees(45), 90.0));
    assert!(close(config.angle_radians(90), std::f32::consts::PI));

    let engine = LayoutEngine::new(config, ColorMode::AmplitudeHue);
    let points = engine.layout(&[]);
    let quarter = points
        .iter()
        .find(|p| p.segment == 45 && p.dot == 0)
        .copied()
        .unwrap();
    let pos = quarter.position();
    assert!(pos.x.abs() < 1e-3);
    assert!(close(pos.y, 100.0));
}

#[test]
fn missing_amplitudes_count_as_silence() {
    let config = LayoutConfig {
        total_segments: 4,
        dot_count: 2,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::new(config, ColorMode::AmplitudeHue);
    let points = engine.layout(&[1.0]);
    assert!(points[1].distance > config.rest_distance(1));
    assert_eq!(points[3].distance, config.rest_distance(1));
}

#[test]
fn amplitude_hue_runs_from_blue_to_pink() {
    assert_eq!(amplitude_hue(0.0).hue_degrees(), Some(200.0));
    assert_eq!(amplitude_hue(1.0).hue_degrees(), Some(0.0));
    assert_eq!(amplitude_hue(0.5).hue_degrees(), Some(280.0));
    assert_eq!(amplitude_hue(0.0).to_css(), "hsl(200, 100%, 50%)");
    assert_eq!(amplitude_hue(1.0).to_css(), "hsl(360, 100%, 50%)");
}

#[test]
fn hsl_converts_to_expected_rgb() {
    let blue = amplitude_hue(0.0).to_rgb();
    // hsl(200, 100%, 50%) = #00aaff
    assert!(close(blue.x, 0.0));
    assert!(close(blue.y, 2.0 / 3.0));
    assert!(close(blue.z, 1.0));
    let red = amplitude_hue(1.0).to_rgb();
    assert!(close(red.x, 1.0) && close(red.y, 0.0) && close(red.z, 0.0));
}

#[test]
fn gradient_is_triangular_around_the_ring() {
    let a = Vec3::new(1.0, 0.0, 0.0);
    let b = Vec3::new(0.0, 0.0, 1.0);
    assert_eq!(ring_gradient(0, 180, a, b), a);
    assert_eq!(ring_gradient(90, 180, a, b), b);
    let q1 = ring_gradient(45, 180, a, b);
    let q3 = ring_gradient(135, 180, a, b);
    assert!((q1 - q3).length() < 1e-5);
    assert!((q1 - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-5);
    // last segment heads back toward A
    let last = ring_gradient(179, 180, a, b);
    assert!(last.x > 0.95);
}

#[test]
fn gradient_colors_ignore_amplitude() {
    let config = LayoutConfig {
        total_segments: 8,
        dot_count: 1,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::new(
        config,
        ColorMode::Gradient {
            color_a: 0x8faae2,
            color_b: 0xec5935,
        },
    );
    let quiet = engine.layout(&[0.0; 8]);
    let loud = engine.layout(&[1.0; 8]);
    for (q, l) in quiet.iter().zip(&loud) {
        assert_eq!(q.color, l.color);
    }
    assert_eq!(quiet[0].color, Color::from_hex(0x8faae2));
    assert!((quiet[4].color.to_rgb() - hex_to_rgb(0xec5935)).length() < 1e-5);
    assert_eq!(quiet[0].color.to_css(), "rgb(143, 170, 226)");
}

#[test]
fn hex_colors_unpack_channels() {
    let c = hex_to_rgb(0xff8000);
    assert_eq!(c.x, 1.0);
    assert!(close(c.y, 128.0 / 255.0));
    assert_eq!(c.z, 0.0);
}

#[test]
fn shadow_rests_at_base_values_on_silence() {
    let shadow = ShadowConfig::default();
    let agg = shadow.aggregate(&[0.0; 180]);
    assert_eq!(agg.mean_amplitude, 0.0);
    assert_eq!(agg.stroke_width, 1.0);
    assert_eq!(agg.opacity, 0.25);
}

#[test]
fn shadow_mean_skips_near_silent_segments() {
    let shadow = ShadowConfig::default();
    assert!(close(shadow.mean(&[0.5, 0.0, 0.005, 0.3]), 0.4));
    let agg = shadow.aggregate(&[0.5, 0.0]);
    assert!(close(agg.stroke_width, 1.0 + 0.5 * 20.0));
    assert!(close(agg.opacity, 0.25 + 0.5 * 1.8));

    let all = ShadowConfig {
        exclude_below: None,
        ..ShadowConfig::default()
    };
    assert!(close(all.mean(&[0.5, 0.0]), 0.25));
}

#[test]
fn layout_config_rejects_empty_rings() {
    let config = LayoutConfig {
        dot_count: 0,
        ..LayoutConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyRing { segments: 180, dots: 0 })
    ));
}
