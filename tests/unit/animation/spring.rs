use super::*;

fn default_spring() -> Spring {
    SpringConfig::new(30, 100.0).build().unwrap()
}

fn with_ratio(damping_ratio: f64) -> Spring {
    SpringConfig::new(30, 100.0)
        .with_params(SpringParams {
            damping_ratio,
            ..SpringParams::default()
        })
        .build()
        .unwrap()
}

#[test]
fn starts_at_from() {
    let s = default_spring();
    assert_eq!(s.progress(FrameIndex(0)), 0.0);
    assert_eq!(s.value(FrameIndex(0)), 0.0);
    assert_eq!(s.value(FrameIndex(-10)), 0.0);

    let s = SpringConfig::new(30, 0.0).with_from(40.0).build().unwrap();
    assert_eq!(s.value(FrameIndex(0)), 40.0);
}

#[test]
fn same_frame_same_value() {
    let a = default_spring();
    let b = default_spring();
    for f in [0, 1, 7, 13, 29, 300] {
        assert_eq!(
            a.value(FrameIndex(f)).to_bits(),
            b.value(FrameIndex(f)).to_bits()
        );
    }
    // Out-of-order sampling does not change results.
    let later = a.value(FrameIndex(200));
    let _ = a.value(FrameIndex(3));
    assert_eq!(a.value(FrameIndex(200)), later);
}

#[test]
fn default_overshoot_is_slight_and_bounded() {
    let s = default_spring();
    let eps = s.max_overshoot() * 100.0 + 1e-9;
    assert!(s.max_overshoot() > 0.0);
    assert!(s.max_overshoot() < 0.1);

    let mut peak = f64::MIN;
    for f in 0..2000 {
        let v = s.value(FrameIndex(f));
        assert!(v.is_finite());
        assert!(v >= -eps && v <= 100.0 + eps, "frame {f}: {v}");
        peak = peak.max(v);
    }
    assert!(peak > 100.0);
}

#[test]
fn deviation_after_peak_never_grows_past_peak_and_settles() {
    let s = default_spring();
    let values: Vec<f64> = (0..450).map(|f| s.value(FrameIndex(f))).collect();
    let (peak_idx, peak) = values
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::MIN), |acc, (i, v)| if v > acc.1 { (i, v) } else { acc });
    let peak_dev = (peak - 100.0).abs();
    for v in &values[peak_idx..] {
        assert!((v - 100.0).abs() <= peak_dev + 1e-12);
    }

    let settle = s.settle_frame(0.01).unwrap();
    assert!(settle.0 <= 30, "settle frame {}", settle.0);
    for v in &values[settle.0 as usize..] {
        assert!((v - 100.0).abs() <= 1.0);
    }
    // The frame just before settling is still outside the band.
    assert!((values[settle.0 as usize - 1] - 100.0).abs() > 1.0);
}

#[test]
fn critically_damped_and_overdamped_are_monotone() {
    for ratio in [1.0, 2.0] {
        let s = with_ratio(ratio);
        assert_eq!(s.max_overshoot(), 0.0);
        let mut prev = s.value(FrameIndex(0));
        assert_eq!(prev, 0.0);
        for f in 1..600 {
            let v = s.value(FrameIndex(f));
            assert!(v + 1e-9 >= prev, "ratio {ratio} frame {f}");
            assert!(v <= 100.0 + 1e-9);
            prev = v;
        }
        assert!((prev - 100.0).abs() < 1.0);
        assert!(s.settle_frame(0.01).is_some());
    }
}

#[test]
fn overshoot_clamping_never_passes_target() {
    let rising = SpringConfig::new(30, 100.0)
        .with_params(SpringParams {
            damping_ratio: 0.3,
            overshoot_clamping: true,
            ..SpringParams::default()
        })
        .build()
        .unwrap();
    let falling = SpringConfig::new(30, 0.0)
        .with_from(100.0)
        .with_params(SpringParams {
            damping_ratio: 0.3,
            overshoot_clamping: true,
            ..SpringParams::default()
        })
        .build()
        .unwrap();
    for f in 0..300 {
        assert!(rising.value(FrameIndex(f)) <= 100.0);
        assert!(falling.value(FrameIndex(f)) >= 0.0);
    }
    assert_eq!(rising.max_overshoot(), 0.0);
}

#[test]
fn stiff_springs_stay_finite() {
    let s = SpringConfig::new(60, 1.0)
        .with_params(SpringParams {
            damping_ratio: 0.05,
            stiffness: 1e6,
            mass: 1e-3,
            overshoot_clamping: false,
        })
        .build()
        .unwrap();
    for f in [0, 1, 2, 100, 10_000, 1_000_000] {
        assert!(s.value(FrameIndex(f)).is_finite());
    }
}

#[test]
fn invalid_configs_are_rejected() {
    let cases = [
        SpringConfig::new(0, 1.0),
        SpringConfig::new(30, 1.0).with_params(SpringParams {
            mass: 0.0,
            ..SpringParams::default()
        }),
        SpringConfig::new(30, 1.0).with_params(SpringParams {
            stiffness: -1.0,
            ..SpringParams::default()
        }),
        SpringConfig::new(30, 1.0).with_params(SpringParams {
            damping_ratio: 0.0,
            ..SpringParams::default()
        }),
        SpringConfig::new(30, f64::NAN),
    ];
    for cfg in cases {
        assert!(matches!(
            cfg.build(),
            Err(FramelineError::InvalidSpringConfig(_))
        ));
    }
}

#[test]
fn settle_frame_rejects_bad_threshold() {
    let s = default_spring();
    assert_eq!(s.settle_frame(0.0), None);
    assert_eq!(s.settle_frame(f64::NAN), None);
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: SpringConfig = serde_json::from_str(r#"{"fps":30,"to":100}"#).unwrap();
    assert_eq!(cfg, SpringConfig::new(30, 100.0));
}

#[test]
fn heavily_overdamped_springs_stay_finite_and_creep() {
    for ratio in [1e10, 1e100, 1e200, f64::MAX] {
        let s = with_ratio(ratio);
        let mut prev = 0.0;
        for f in [1, 30, 300, 1_000_000] {
            let v = s.value(FrameIndex(f));
            assert!(v.is_finite(), "ratio {ratio} frame {f}: {v}");
            assert!((0.0..=100.0).contains(&v), "ratio {ratio} frame {f}: {v}");
            assert!(v >= prev);
            prev = v;
        }
    }

    // Slow root ~ -omega0 / (2 * zeta): s(t) ~ 1 - exp(-omega0 * t / (2 * zeta)).
    let s = with_ratio(1e10);
    let t = 1_000_000.0 / 30.0;
    let expected = 1.0 - (-10.0 * t / 2e10_f64).exp();
    let got = s.progress(FrameIndex(1_000_000));
    assert!(got > 0.0);
    assert!((got - expected).abs() <= expected * 1e-6, "{got} vs {expected}");
}

#[test]
fn overdamped_matches_two_root_solution() {
    let zeta = 2.0_f64;
    let omega0 = 10.0_f64;
    let z2 = (zeta * zeta - 1.0).sqrt();
    let (r1, r2) = (-omega0 * (zeta - z2), -omega0 * (zeta + z2));
    let s = with_ratio(zeta);
    for f in [1, 5, 30, 90] {
        let t = f as f64 / 30.0;
        let expected = 1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1);
        assert!((s.progress(FrameIndex(f)) - expected).abs() < 1e-12, "frame {f}");
    }
}

#[test]
fn built_spring_keeps_its_config() {
    let cfg = SpringConfig::new(24, 5.0).with_from(-5.0);
    let s = cfg.build().unwrap();
    assert_eq!(*s.config(), cfg);
    assert_eq!(s.value(FrameIndex(0)), -5.0);
}
