use ws2812_clock::governor::{
    BrightnessGovernor, BrightnessSmoothing, CurrentBudget, GovernorInput, TimeRange,
    WindowBoundary,
};

const BOUNDARIES: [WindowBoundary; 2] = [WindowBoundary::HalfOpen, WindowBoundary::Inclusive];

const SMOOTHINGS: [BrightnessSmoothing; 4] = [
    BrightnessSmoothing::Exponential { factor: 0.9 },
    BrightnessSmoothing::Exponential { factor: 0.5 },
    BrightnessSmoothing::Step { step: 1 },
    BrightnessSmoothing::Step { step: 7 },
];

// ============================================================================
// Secondary brightness window
// ============================================================================

#[test]
fn test_same_day_window_boundaries() {
    let range = TimeRange::from_hm((8, 0), (20, 0));
    for boundary in BOUNDARIES {
        assert!(range.contains(8, 0, boundary), "{:?}", boundary);
        assert!(!range.contains(7, 59, boundary), "{:?}", boundary);
        assert!(range.contains(12, 0, boundary), "{:?}", boundary);
        assert!(range.contains(19, 59, boundary), "{:?}", boundary);
        assert!(!range.contains(20, 1, boundary), "{:?}", boundary);
        assert!(!range.contains(0, 0, boundary), "{:?}", boundary);
    }
    assert!(!range.contains(20, 0, WindowBoundary::HalfOpen));
    assert!(range.contains(20, 0, WindowBoundary::Inclusive));
}

#[test]
fn test_midnight_crossing_window_boundaries() {
    let range = TimeRange::from_hm((22, 0), (6, 0));
    assert!(range.crosses_midnight());
    for boundary in BOUNDARIES {
        assert!(range.contains(23, 0, boundary), "{:?}", boundary);
        assert!(!range.contains(12, 0, boundary), "{:?}", boundary);
        assert!(range.contains(22, 0, boundary), "{:?}", boundary);
        assert!(!range.contains(21, 59, boundary), "{:?}", boundary);
        assert!(range.contains(0, 0, boundary), "{:?}", boundary);
        assert!(range.contains(5, 59, boundary), "{:?}", boundary);
        assert!(!range.contains(6, 1, boundary), "{:?}", boundary);
    }
    assert!(!range.contains(6, 0, WindowBoundary::HalfOpen));
    assert!(range.contains(6, 0, WindowBoundary::Inclusive));
}

#[test]
fn test_window_uses_minute_resolution() {
    // 08:30:45 - 09:15:10
    let range = TimeRange::new(8 * 3600 + 30 * 60 + 45, 9 * 3600 + 15 * 60 + 10);
    assert!(range.contains(8, 30, WindowBoundary::HalfOpen));
    assert!(!range.contains(8, 29, WindowBoundary::HalfOpen));
    assert!(range.contains(9, 14, WindowBoundary::HalfOpen));
    assert!(!range.contains(9, 15, WindowBoundary::HalfOpen));
}

#[test]
fn test_window_ending_at_midnight() {
    let range = TimeRange::from_hm((18, 0), (24, 0));
    assert!(!range.crosses_midnight());
    assert!(range.contains(23, 59, WindowBoundary::HalfOpen));
    assert!(!range.contains(0, 0, WindowBoundary::HalfOpen));
}

// ============================================================================
// Smoothing
// ============================================================================

fn converge(smoothing: BrightnessSmoothing, from: u8, to: u8) -> Vec<f32> {
    let mut governor = BrightnessGovernor::new(smoothing);
    while governor.step_towards(from) != from || governor.raw() != f32::from(from) {}

    let mut values = vec![governor.raw()];
    for _ in 0..1000 {
        governor.step_towards(to);
        values.push(governor.raw());
        if governor.raw() == f32::from(to) {
            break;
        }
    }
    values
}

#[test]
fn test_smoothing_reaches_target_exactly() {
    for smoothing in SMOOTHINGS {
        for (from, to) in [(0u8, 255u8), (255, 0), (50, 10), (10, 50), (0, 1), (200, 199)] {
            let values = converge(smoothing, from, to);
            assert_eq!(
                *values.last().unwrap(),
                f32::from(to),
                "{:?} {} -> {} did not converge",
                smoothing,
                from,
                to
            );
            assert!(values.len() < 1000);
        }
    }
}

#[test]
fn test_smoothing_is_monotonic_without_overshoot() {
    for smoothing in SMOOTHINGS {
        for (from, to) in [(0u8, 200u8), (200, 0), (50, 10)] {
            let values = converge(smoothing, from, to);
            let target = f32::from(to);
            for pair in values.windows(2) {
                let (before, after) = (pair[0], pair[1]);
                assert!(
                    (after - target).abs() < (before - target).abs(),
                    "{:?}: {} -> {} not strictly closer to {}",
                    smoothing,
                    before,
                    after,
                    target
                );
                if to > from {
                    assert!(after <= target);
                } else {
                    assert!(after >= target);
                }
            }
        }
    }
}

#[test]
fn test_exponential_first_step() {
    let mut governor = BrightnessGovernor::new(BrightnessSmoothing::Exponential { factor: 0.9 });
    governor.step_towards(100);
    assert!((governor.raw() - 10.0).abs() < 1e-4);
    assert_eq!(governor.brightness(), 10);
}

#[test]
fn test_snaps_within_one_unit() {
    let mut governor = BrightnessGovernor::new(BrightnessSmoothing::Exponential { factor: 0.99 });
    governor.step_towards(1);
    // 0.01 away from 0, but within one of the target
    assert_eq!(governor.raw(), 1.0);
}

// ============================================================================
// Governance
// ============================================================================

#[test]
fn test_govern_targets_zero_when_invisible() {
    let mut governor = BrightnessGovernor::new(BrightnessSmoothing::Step { step: 255 });
    let mut input = GovernorInput {
        visible: true,
        in_secondary_window: false,
        brightness: 80,
        secondary_brightness: 5,
        high_current_source: true,
    };
    let budget = CurrentBudget::default();

    let out = governor.govern(&input, &budget);
    assert_eq!(out.brightness, 80);
    assert_eq!((out.volts, out.milliamps), (5, 8000));

    input.in_secondary_window = true;
    input.high_current_source = false;
    let out = governor.govern(&input, &budget);
    assert_eq!(out.brightness, 5);
    assert_eq!(out.milliamps, 3000);

    input.visible = false;
    assert_eq!(governor.govern(&input, &budget).brightness, 0);
}
