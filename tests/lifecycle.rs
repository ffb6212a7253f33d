//! Contract-level properties that every engine must honor, driven through
//! the `AdaptiveFilter` trait the way a host would.

use adaptfilt::{build, AdaptiveFilter, Algorithm, FilterConfig, UpdateMode};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const ALL: [Algorithm; 6] = [
    Algorithm::Bypass,
    Algorithm::Lms,
    Algorithm::Nlms,
    Algorithm::Rls,
    Algorithm::Ap,
    Algorithm::QssmAp,
];

fn config() -> FilterConfig {
    // Step size chosen inside the LMS stability region for N=8 unit-variance
    // noise, so every engine stays well-behaved under the shared drive.
    FilterConfig::new(8)
        .with_projection_order(2)
        .with_step_size(0.05)
        .with_forgetting(0.99)
}

fn white_noise(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..len).map(|_| normal.sample(&mut rng)).collect()
}

#[test]
fn zero_input_invariance() {
    for algorithm in ALL {
        let mut filter = build(algorithm, &config()).unwrap();
        for _ in 0..200 {
            let out = filter.step(0.0, 0.0, UpdateMode::Adapt);
            assert_eq!(out.error, 0.0, "{:?}", algorithm);
        }
        assert!(
            filter.coefficients().iter().all(|&w| w == 0.0),
            "{:?} drifted on silence",
            algorithm
        );
    }
}

#[test]
fn update_disable_purity() {
    let drive = white_noise(50, 3);
    for algorithm in ALL {
        let mut filter = build(algorithm, &config()).unwrap();
        // Adapt on some signal first so the coefficients are non-trivial.
        for &x in &drive {
            filter.step(x, 0.5 * x, UpdateMode::Adapt);
        }
        let snapshot = filter.coefficients().to_vec();

        // With updates disabled, coefficients must never move again.
        for &x in &drive {
            let out = filter.step(3.0 * x, -x, UpdateMode::Hold);
            assert!(!out.updated, "{:?} updated under Hold", algorithm);
            assert_eq!(
                filter.coefficients(),
                snapshot.as_slice(),
                "{:?} mutated coefficients under Hold",
                algorithm
            );
        }
    }
}

#[test]
fn restart_is_indistinguishable_from_fresh() {
    let drive = white_noise(100, 5);
    for algorithm in ALL {
        let mut used = build(algorithm, &config()).unwrap();
        for &x in &drive {
            used.step(x, x * 0.25, UpdateMode::Adapt);
        }
        used.restart();
        assert_eq!(used.steps_taken(), 0, "{:?}", algorithm);

        let mut fresh = build(algorithm, &config()).unwrap();
        let a = used.step(0.0, 0.0, UpdateMode::Adapt);
        let b = fresh.step(0.0, 0.0, UpdateMode::Adapt);
        assert_eq!(a.error, 0.0, "{:?}", algorithm);
        assert_eq!(a, b, "{:?}", algorithm);
        assert_eq!(
            used.coefficients(),
            fresh.coefficients(),
            "{:?} restart left residue",
            algorithm
        );
    }
}

#[test]
fn inspection_does_not_mutate() {
    let drive = white_noise(20, 9);
    for algorithm in ALL {
        let mut filter = build(algorithm, &config()).unwrap();
        for &x in &drive {
            filter.step(x, x, UpdateMode::Adapt);
        }
        let before = filter.coefficients().to_vec();
        for _ in 0..10 {
            let _ = filter.coefficients();
            let _ = filter.name();
            let _ = filter.steps_taken();
        }
        assert_eq!(filter.coefficients(), before.as_slice(), "{:?}", algorithm);
    }
}

#[test]
fn error_is_always_reported() {
    // The prediction error comes back on every step, updated or not.
    for algorithm in ALL {
        let mut filter = build(algorithm, &config()).unwrap();
        for mode in [UpdateMode::Hold, UpdateMode::Adapt, UpdateMode::Force] {
            let out = filter.step(0.0, 2.5, mode);
            assert_eq!(out.error, 2.5, "{:?} {:?}", algorithm, mode);
        }
    }
}

#[test]
fn step_counters_track_every_step() {
    for algorithm in ALL {
        let mut filter = build(algorithm, &config()).unwrap();
        filter.step(1.0, 1.0, UpdateMode::Hold);
        filter.step(1.0, 1.0, UpdateMode::Adapt);
        filter.step(1.0, 1.0, UpdateMode::Force);
        assert_eq!(filter.steps_taken(), 3, "{:?}", algorithm);
    }
}

#[test]
fn coefficient_view_has_configured_length() {
    for algorithm in ALL {
        let filter = build(algorithm, &config()).unwrap();
        let expected = if algorithm == Algorithm::Bypass { 0 } else { 8 };
        assert_eq!(filter.coefficients().len(), expected, "{:?}", algorithm);
    }
}

#[test]
fn engine_names_are_distinct() {
    let names: Vec<&str> = ALL
        .iter()
        .map(|&a| build(a, &config()).unwrap().name())
        .collect();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn qssm_gate_reported_through_outcome() {
    // Alternating references around the residual floor: the update-performed
    // flag must be false exactly where thresholding flips the residual sign.
    let cfg = FilterConfig::new(4)
        .with_projection_order(2)
        .with_step_size(0.5)
        .with_error_floor(0.5);
    let mut filter = build(Algorithm::QssmAp, &cfg).unwrap();
    let cases = [(1.0, true), (0.2, false), (-1.0, true), (-0.2, false)];
    for (reference, expected) in cases {
        let out = filter.step(0.0, reference, UpdateMode::Adapt);
        assert_eq!(out.updated, expected, "reference {reference}");
    }
}

#[test]
fn qssm_force_updates_when_gate_refuses() {
    let cfg = FilterConfig::new(4)
        .with_projection_order(2)
        .with_step_size(0.5)
        .with_error_floor(0.5);
    let mut filter = build(Algorithm::QssmAp, &cfg).unwrap();
    let out = filter.step(1.0, 0.2, UpdateMode::Force);
    assert!(out.updated);
}
