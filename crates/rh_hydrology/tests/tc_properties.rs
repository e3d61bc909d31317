// crates/rh_hydrology/tests/tc_properties.rs

//! Tc 与 Rational 公式的性质测试
//!
//! 隐式求解的参考值由独立的 50 位十进制二分计算得到。

use rh_config::EngineConfig;
use rh_foundation::units;
use rh_hydrology::aggregate;
use rh_hydrology::rational::{peak_discharge, rainfall_intensity};
use rh_hydrology::solver::{solve_izzard, solve_kinematic};
use rh_hydrology::tc::{applicable_methods, formulas};
use rh_hydrology::{
    ClassificationTables, LandSoilUnit, MethodSelector, ReturnPeriodRegression, SubbasinId,
    TcInputs, TcMethod,
};

fn idf() -> ReturnPeriodRegression {
    ReturnPeriodRegression::new(10, 1666.19, 7.70, -0.65)
}

fn i_calc(tc: f64, r: &ReturnPeriodRegression) -> f64 {
    r.a * (tc + r.d).powf(r.b) / 25.4
}

fn inputs_ft(flow_path_ft: f64, slope_pct: f64, area_km2: f64) -> TcInputs {
    TcInputs {
        flow_path_m: flow_path_ft / units::FEET_PER_METRE,
        slope_pct,
        area_km2,
        runoff_coeff: Some(0.43),
        curve_number: Some(79.0),
        manning_n: Some(0.035),
        retardance_coeff: Some(0.046),
    }
}

// ============================================================
// 面积加权
// ============================================================

#[test]
fn test_weighted_cn_matches_definition() {
    let units = vec![
        LandSoilUnit::new(4, "Annual Crop", "Clay", 12.5),
        LandSoilUnit::new(4, "Grassland", "Sandy Loam", 3.25),
        LandSoilUnit::new(4, "Built-up", "Loam", 0.75),
        LandSoilUnit::new(4, "Open/Barren", "Sand", 7.0),
    ];
    let cns = [94.0, 69.0, 98.0, 68.0];

    let w = aggregate(SubbasinId(4), &units, ClassificationTables::standard()).unwrap();
    let total: f64 = units.iter().map(|u| u.area_ha).sum();
    let expected: f64 = units
        .iter()
        .zip(cns)
        .map(|(u, cn)| cn * u.area_ha)
        .sum::<f64>()
        / total;
    assert!((w.curve_number.unwrap() - expected).abs() < 1e-9);
}

// ============================================================
// 公式与求解
// ============================================================

#[test]
fn test_kirpich_relative_error() {
    let expected = 0.0078 * 1000f64.powf(0.77) * 0.05f64.powf(-0.385);
    let tc = formulas::kirpich(1000.0, 0.05);
    assert!(((tc - expected) / expected).abs() < 1e-9);
}

#[test]
fn test_implicit_solutions_are_fixed_points() {
    let r = idf();
    let settings = EngineConfig::default().solver;
    for &(l, s) in &[(100.0, 0.01), (1000.0, 0.05), (5000.0, 0.1), (43100.0, 0.027)] {
        let kin = solve_kinematic(l, s, 0.0647, &r, &settings).unwrap();
        assert!((kin.intensity_in_hr - i_calc(kin.tc_minutes, &r)).abs() < 1e-8);

        let izz = solve_izzard(l, s, 0.06, &r, &settings).unwrap();
        assert!((izz.intensity_in_hr - i_calc(izz.tc_minutes, &r)).abs() < 1e-8);
        assert!(izz.iterations <= settings.max_iterations);
    }
}

#[test]
fn test_kinematic_reference_values() {
    let settings = EngineConfig::default().solver;
    let cases = [
        (0.035, 10.857026621124533, 8.21531495163343),
        (0.0647, 9.249874223769439, 12.663565167237104),
    ];
    for (n, i, tc) in cases {
        let sol = solve_kinematic(1000.0, 0.05, n, &idf(), &settings).unwrap();
        assert!((sol.intensity_in_hr - i).abs() < 1e-8);
        assert!((sol.tc_minutes - tc).abs() < 1e-7);
    }
}

#[test]
fn test_tc_never_below_floor() {
    let config = EngineConfig::default();
    let selector = MethodSelector::new(&config).unwrap();
    for &l in &[1e-6, 0.001, 1.0, 10.0, 100.0, 1000.0] {
        for &slope in &[0.5, 3.0, 5.0, 10.0, 40.0] {
            for &area in &[0.001, 0.01, 0.3, 1.0, 10.0] {
                let est = selector.estimate(&inputs_ft(l, slope, area), &idf()).unwrap();
                assert!(!est.is_no_applicable_method());
                assert!(est.tc_minutes >= 5.0, "L={l} S={slope} A={area}");
            }
        }
    }
}

#[test]
fn test_discharge_linear_in_area_and_c() {
    let i = rainfall_intensity(12.0, &idf());
    let q = peak_discharge(0.4, i, 1.3);
    assert!((peak_discharge(0.4, i, 2.6) - 2.0 * q).abs() < 1e-12);
    assert!((peak_discharge(0.8, i, 1.3) - 2.0 * q).abs() < 1e-12);
}

// ============================================================
// 方法选择
// ============================================================

#[test]
fn test_overlapping_kirpich_and_kinematic() {
    let area_km2 = 50.0 / units::ACRES_PER_KM2;
    let methods = applicable_methods(5.0, units::km2_to_acres(area_km2));
    assert_eq!(methods, vec![TcMethod::Kirpich, TcMethod::KinematicWave]);

    let config = EngineConfig::default();
    let est = MethodSelector::new(&config)
        .unwrap()
        .estimate(&inputs_ft(1500.0, 5.0, area_km2), &idf())
        .unwrap();

    let kirpich = formulas::kirpich(1500.0, 0.05).max(5.0);
    let kinematic = solve_kinematic(1500.0, 0.05, 0.035, &idf(), &config.solver)
        .unwrap()
        .tc_minutes
        .max(5.0);
    assert!((est.tc_minutes - kirpich.max(kinematic)).abs() < 1e-9);
}

#[test]
fn test_end_to_end_faa_scenario() {
    // 1 km² = 247.105 acre > 112：Kirpich 不适用，FAA 适用
    let config = EngineConfig::default();
    let r = idf();
    let est = MethodSelector::new(&config)
        .unwrap()
        .estimate(&inputs_ft(1000.0, 5.0, 1.0), &r)
        .unwrap();
    assert!(est.candidate(TcMethod::Kirpich).is_none());
    assert_eq!(est.governing, Some(TcMethod::Faa));

    let i = rainfall_intensity(est.tc_minutes, &r);
    let q = peak_discharge(0.43, i, 1.0);
    assert!((q - 21.775).abs() < 5e-4, "Q = {q}");
}
