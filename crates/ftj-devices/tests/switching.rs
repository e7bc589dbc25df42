//! Integration tests for polarization switching under applied bias.

use ftj_core::NodeId;
use ftj_devices::ftj::{FRACTION_FLOOR, UnitCells};
use ftj_devices::{Error, Ftj, FtjParams, Waveform, drive};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ftj_with(tb: f64, s0: f64) -> Ftj {
    let params = FtjParams {
        tb,
        s0,
        ..Default::default()
    };
    Ftj::with_params("XFTJ1", NodeId::new(1), NodeId::GROUND, params).expect("valid FTJ")
}

/// Four unit cells held at 0 V: nothing moves and nothing flows.
#[test]
fn test_zero_bias_holds_initial_state() {
    init_logger();
    let mut ftj = ftj_with(1.6e-9, 0.37);

    let trace = drive(&mut ftj, &Waveform::dc(0.0), 100e-9, None).unwrap();
    assert_eq!(trace.len(), 1001);
    for p in trace.iter() {
        assert_eq!(p.order_parameter, 0.37, "t = {}", p.time);
        assert_eq!(p.current, 0.0, "t = {}", p.time);
    }
}

/// Five unit cells, +1.5 V step from an even mixture.
///
/// The HRS fraction follows the KAI curve
/// `1 - exp(-((t0 + t) / tau_p)^2)` with `t0 = tau_p * sqrt(ln 2)` until the
/// LRS fraction hits the floor.
#[test]
fn test_positive_step_follows_kai_curve() {
    init_logger();
    let mut ftj = ftj_with(2.0e-9, 0.5);
    assert_eq!(ftj.derived().cells, UnitCells::Five);

    let tau = ftj.derived().kinetics.propagation_time(1.5);
    let t0 = tau * std::f64::consts::LN_2.sqrt();

    let trace = drive(&mut ftj, &Waveform::dc(1.5), 5.0 * tau, Some(tau / 20.0)).unwrap();

    for p in trace.iter() {
        let expected = (-((t0 + p.time) / tau).powi(2)).exp();
        if expected > 2.0 * FRACTION_FLOOR {
            let rel = (p.order_parameter - expected).abs() / expected;
            assert!(
                rel < 1e-8,
                "t = {:e}: s = {}, closed form {}",
                p.time,
                p.order_parameter,
                expected
            );
        }
    }

    // ln(1e4) = 9.21, so the floor is reached by t0 + t = 3.04 tau.
    let saturated = trace
        .iter()
        .find(|p| p.order_parameter <= FRACTION_FLOOR + 1e-15)
        .expect("LRS fraction should reach its floor");
    assert!(saturated.time <= 2.5 * tau, "floor reached at {:e} s", saturated.time);
    assert_eq!(ftj.order_parameter(), trace.final_order_parameter().unwrap());
    assert!(ftj.order_parameter() <= FRACTION_FLOOR + 1e-15);
}

#[test]
fn test_switching_is_monotonic_under_held_bias() {
    let mut ftj = ftj_with(1.6e-9, 0.8);
    let trace = drive(&mut ftj, &Waveform::dc(1.2), 200e-9, None).unwrap();
    let s: Vec<f64> = trace.iter().map(|p| p.order_parameter).collect();
    assert!(s.windows(2).all(|w| w[1] <= w[0]));
    assert!(s[s.len() - 1] < s[0]);

    let mut ftj = ftj_with(1.6e-9, 0.2);
    let trace = drive(&mut ftj, &Waveform::dc(-1.2), 200e-9, None).unwrap();
    let s: Vec<f64> = trace.iter().map(|p| p.order_parameter).collect();
    assert!(s.windows(2).all(|w| w[1] >= w[0]));
    assert!(s[s.len() - 1] > s[0]);
}

#[test]
fn test_reversal_is_continuous() {
    let mut ftj = ftj_with(1.6e-9, 0.5);
    ftj.evaluate(1.5, 3e-9);
    let before = ftj.order_parameter();

    let after = ftj.evaluate(-1.5, 3e-9 + 1e-13).order_parameter;
    assert!(after >= before);
    assert!((after - before).abs() < 1e-3, "jump {before} -> {after}");
}

#[test]
fn test_repeated_evaluation_is_idempotent() {
    let mut ftj = ftj_with(2.4e-9, 0.5);
    let first = ftj.evaluate(-1.8, 7e-9);
    for _ in 0..5 {
        let again = ftj.evaluate(-1.8, 7e-9);
        assert_eq!(again.order_parameter, first.order_parameter);
        assert_eq!(again.current, first.current);
    }

    // A rolled-back time point reuses the committed fractions.
    let rolled_back = ftj.evaluate(1.8, 6e-9);
    assert_eq!(rolled_back.order_parameter, first.order_parameter);
}

#[test]
fn test_fractions_complementary_for_every_thickness() {
    let stimulus = Waveform::pulse(-2.0, 2.0, 10e-9, 2e-9, 2e-9, 40e-9, 100e-9);
    for cells in UnitCells::ALL {
        let tb = cells.count() as f64 * FtjParams::UNIT_CELL;
        let mut ftj = ftj_with(tb, 0.5);
        for k in 1..=4000 {
            let t = k as f64 * 1e-10;
            let e = ftj.evaluate(stimulus.value_at(t), t);
            let sum = e.order_parameter + e.high_fraction;
            assert!((sum - 1.0).abs() < 1e-12, "{cells:?} t = {t:e}: sum = {sum}");
            assert!(
                e.order_parameter >= FRACTION_FLOOR && e.order_parameter <= 1.0 - FRACTION_FLOOR,
                "{cells:?} t = {t:e}: s = {}",
                e.order_parameter
            );
            assert!(e.current.is_finite());
        }
    }
}

/// A full bipolar triangle switches the junction both ways.
#[test]
fn test_triangle_sweep_traces_hysteresis() {
    init_logger();
    let mut ftj = ftj_with(1.6e-9, 0.5);
    let period = 2e-6;
    let trace = drive(&mut ftj, &Waveform::triangle(2.0, period), period, Some(1e-10)).unwrap();

    let at = |t: f64| {
        trace
            .iter()
            .min_by(|a, b| (a.time - t).abs().total_cmp(&(b.time - t).abs()))
            .map(|p| p.order_parameter)
            .unwrap()
    };
    assert!(at(0.25 * period) < 0.01, "after positive peak: {}", at(0.25 * period));
    assert!(at(0.75 * period) > 0.99, "after negative peak: {}", at(0.75 * period));

    for p in trace.iter() {
        assert!(p.current * p.voltage >= 0.0, "t = {:e}: V = {}, I = {}", p.time, p.voltage, p.current);
    }
}

/// Read current after an LRS write far exceeds the one after an HRS write.
#[test]
fn test_write_then_read_resistance_contrast() {
    let read = |write_bias: f64| {
        let mut ftj = ftj_with(1.6e-9, 0.5);
        let write = Waveform::pwl(vec![
            (0.0, 0.0),
            (1e-9, write_bias),
            (100e-9, write_bias),
            (101e-9, 0.0),
            (110e-9, 0.2),
        ]);
        drive(&mut ftj, &write, 120e-9, None).unwrap();
        ftj.evaluate(0.2, 121e-9).current
    };

    let i_on = read(-2.0);
    let i_off = read(2.0);
    assert!(i_on > 0.0 && i_off > 0.0);
    assert!(i_on / i_off > 10.0, "I_on = {i_on}, I_off = {i_off}");
}

#[test]
fn test_unsupported_thickness_rejected() {
    let params = FtjParams {
        tb: 2.8e-9,
        ..Default::default()
    };
    match Ftj::with_params("XFTJ1", NodeId::new(1), NodeId::GROUND, params) {
        Err(Error::UnsupportedThickness { thickness, cells }) => {
            assert_eq!(thickness, 2.8e-9);
            assert!((cells - 7.0).abs() < 1e-9);
        }
        other => panic!("expected UnsupportedThickness, got {other:?}"),
    }

    let params = FtjParams::from_json(r#"{ "tb": 1.0e-9 }"#).unwrap();
    assert!(matches!(
        Ftj::with_params("XFTJ2", NodeId::new(1), NodeId::GROUND, params),
        Err(Error::UnsupportedThickness { .. })
    ));
}
