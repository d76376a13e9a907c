// Host-side tests for spectrum → segment mapping.

use pulse_core::*;

// sample rate = 2 * bins puts bin k at exactly k Hz
fn hz_per_bin_spectrum(bins: usize) -> (Vec<u8>, f32) {
    (vec![0u8; bins], (bins * 2) as f32)
}

fn nearest(min_hz: f32, max_hz: Option<f32>, tie_break: TieBreak) -> MapperConfig {
    MapperConfig {
        policy: MappingPolicy::NearestFrequency {
            min_hz: Some(min_hz),
            max_hz,
            span_divisor: 1.0,
            tie_break,
        },
        divisor: 255.0,
    }
}

#[test]
fn output_length_always_matches_segment_count() {
    let policies = [
        MappingPolicy::live_default(),
        MappingPolicy::LinearInterpolation,
        MappingPolicy::Logarithmic,
        MappingPolicy::BinRange {
            low_bin: 4,
            high_bin: 90,
        },
    ];
    for policy in policies {
        for &segments in &[1usize, 7, 180, 400] {
            for &bins in &[0usize, 1, 16, 128] {
                let mut mapper = SegmentMapper::new(MapperConfig { policy, divisor: 255.0 }, segments);
                let out = mapper.map(&vec![200u8; bins], 44_100.0);
                assert_eq!(out.len(), segments, "{policy:?} segments={segments} bins={bins}");
            }
        }
    }
}

#[test]
fn values_stay_within_divisor_range() {
    let full = vec![255u8; 128];
    for divisor in [255.0f32, 128.0] {
        for policy in [
            MappingPolicy::live_default(),
            MappingPolicy::LinearInterpolation,
            MappingPolicy::Logarithmic,
        ] {
            let mut mapper = SegmentMapper::new(MapperConfig { policy, divisor }, 180);
            for v in mapper.map(&full, 44_100.0) {
                assert!(v >= 0.0 && v <= 255.0 / divisor + 1e-6, "{v} out of range");
            }
        }
    }
}

#[test]
fn silent_spectrum_maps_to_silence() {
    let mut mapper = SegmentMapper::new(MapperConfig::default(), 180);
    let out = mapper.map(&[0u8; 128], 44_100.0);
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn single_hot_bin_lights_only_its_segment() {
    let (mut spectrum, rate) = hz_per_bin_spectrum(16);
    spectrum[8] = 255;
    // targets 0, 4, 8, 12, 16 Hz
    let mut mapper = SegmentMapper::new(nearest(0.0, Some(16.0), TieBreak::FirstAtOrAbove), 5);
    let out = mapper.map(&spectrum, rate);
    assert_eq!(out, vec![0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn first_at_or_above_drops_targets_past_last_bin() {
    let (mut spectrum, rate) = hz_per_bin_spectrum(16);
    spectrum[15] = 255;
    let mut first = SegmentMapper::new(nearest(0.0, Some(16.0), TieBreak::FirstAtOrAbove), 5);
    let mut closest = SegmentMapper::new(nearest(0.0, Some(16.0), TieBreak::Closest), 5);
    assert_eq!(first.map(&spectrum, rate)[4], 0.0);
    assert_eq!(closest.map(&spectrum, rate)[4], 1.0);
}

#[test]
fn tie_breaks_differ_between_bins() {
    // 16 bins over 0..16 Hz, target 4.4 Hz
    assert_eq!(pick_bin(4.4, 16, 16.0, TieBreak::FirstAtOrAbove), Some(5));
    assert_eq!(pick_bin(4.4, 16, 16.0, TieBreak::Closest), Some(4));
    // exact hit agrees
    assert_eq!(pick_bin(4.0, 16, 16.0, TieBreak::FirstAtOrAbove), Some(4));
    assert_eq!(pick_bin(4.0, 16, 16.0, TieBreak::Closest), Some(4));
    // equidistant goes low
    assert_eq!(pick_bin(4.5, 16, 16.0, TieBreak::Closest), Some(4));
    assert_eq!(pick_bin(100.0, 16, 16.0, TieBreak::FirstAtOrAbove), None);
}

#[test]
fn live_targets_stretch_past_max_frequency() {
    let targets = segment_target_frequencies(180, 20.0, 12_000.0, 0.75);
    assert!((targets[0] - 20.0).abs() < 1e-4);
    let top = 20.0 + 11_980.0 / 0.75;
    assert!((targets[179] - top).abs() < 1e-2);
    assert!(targets.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn linear_interpolation_blends_neighbours_and_pads_with_zero() {
    let spectrum = [0u8, 100, 200, 50];
    let mut mapper = SegmentMapper::new(
        MapperConfig {
            policy: MappingPolicy::LinearInterpolation,
            divisor: 128.0,
        },
        8,
    );
    let out = mapper.map(&spectrum, 44_100.0);
    // fractional indices 0, .5, 1, 1.5, 2, 2.5, 3, 3.5
    let expected = [0.0, 50.0, 100.0, 150.0, 200.0, 125.0, 50.0, 25.0];
    for (got, want) in out.iter().zip(expected) {
        assert!((got - want / 128.0).abs() < 1e-6, "{got} vs {}", want / 128.0);
    }
}

#[test]
fn log_bins_span_the_buffer_and_never_decrease() {
    assert_eq!(log_bin(0, 180, 128), 1);
    assert_eq!(log_bin(179, 180, 128), 127);
    let mut prev = 0;
    for i in 0..180 {
        let b = log_bin(i, 180, 128);
        assert!(b >= prev && b < 128);
        prev = b;
    }
    // single segment reads the first bin above DC
    assert_eq!(log_bin(0, 1, 128), 1);
}

#[test]
fn logarithmic_policy_normalizes_linearly() {
    let mut spectrum = vec![0u8; 128];
    spectrum[1] = 255;
    let mut mapper = SegmentMapper::new(
        MapperConfig {
            policy: MappingPolicy::Logarithmic,
            divisor: 255.0,
        },
        180,
    );
    let out = mapper.map(&spectrum, 44_100.0);
    assert_eq!(out[0], 1.0);
}

#[test]
fn bin_range_averages_contiguous_buckets() {
    let spectrum: Vec<u8> = (0..10u8).map(|k| k * 10).collect();
    let mut mapper = SegmentMapper::new(
        MapperConfig {
            policy: MappingPolicy::BinRange {
                low_bin: 2,
                high_bin: 8,
            },
            divisor: 255.0,
        },
        3,
    );
    let out = mapper.map(&spectrum, 44_100.0);
    let expected = [25.0, 45.0, 65.0];
    for (got, want) in out.iter().zip(expected) {
        assert!((got - want / 255.0).abs() < 1e-6);
    }
}

#[test]
fn bin_range_empty_buckets_are_zero() {
    let spectrum = vec![255u8; 10];
    let mut mapper = SegmentMapper::new(
        MapperConfig {
            policy: MappingPolicy::BinRange {
                low_bin: 0,
                high_bin: 3,
            },
            divisor: 255.0,
        },
        6,
    );
    let out = mapper.map(&spectrum, 44_100.0);
    assert_eq!(out.len(), 6);
    assert!(out.iter().any(|&v| v == 0.0));
    assert!(out.iter().filter(|&&v| v > 0.0).count() == 3);
}

#[test]
fn bin_range_past_buffer_end_is_clamped() {
    let mut mapper = SegmentMapper::new(
        MapperConfig {
            policy: MappingPolicy::BinRange {
                low_bin: 200,
                high_bin: 400,
            },
            divisor: 255.0,
        },
        4,
    );
    assert_eq!(mapper.map(&[255u8; 128], 44_100.0), vec![0.0; 4]);
}

#[test]
fn bin_table_follows_sample_rate_changes() {
    let mut spectrum = vec![0u8; 16];
    spectrum[8] = 255;
    let mut mapper = SegmentMapper::new(nearest(0.0, Some(16.0), TieBreak::FirstAtOrAbove), 5);
    assert_eq!(mapper.map(&spectrum, 32.0)[2], 1.0);
    // doubling the rate moves 8 Hz down to bin 4
    assert_eq!(mapper.map(&spectrum, 64.0)[2], 0.0);
}

#[test]
fn config_validation_rejects_bad_values() {
    let mut cfg = MapperConfig::default();
    cfg.divisor = 0.0;
    assert_eq!(cfg.validate(), Err(ConfigError::BadDivisor(0.0)));

    let cfg = nearest(500.0, Some(100.0), TieBreak::Closest);
    assert!(matches!(cfg.validate(), Err(ConfigError::InvertedRange { .. })));

    let cfg = MapperConfig {
        policy: MappingPolicy::BinRange {
            low_bin: 9,
            high_bin: 3,
        },
        divisor: 255.0,
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvertedBins { .. })));
    assert!(MapperConfig::default().validate().is_ok());
}
