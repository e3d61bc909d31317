// crates/rh_hydrology/src/tc/formulas.rs

//! 显式 Tc 公式
//!
//! L: 最长汇流路径 [ft]，S: 小数坡度，返回 Tc [min]（未截断）。
//! 非法输入（S = 0 等）得到非有限值，由调用方检查。

/// Kirpich: Tc = 0.0078·L^0.77·S^-0.385
#[inline]
pub fn kirpich(flow_path_ft: f64, slope: f64) -> f64 {
    0.0078 * flow_path_ft.powf(0.77) * slope.powf(-0.385)
}

/// FAA: Tc = 1.8·(1.1 − C)·L^0.5 / (100·S)^0.33
#[inline]
pub fn faa(flow_path_ft: f64, slope: f64, runoff_coeff: f64) -> f64 {
    1.8 * (1.1 - runoff_coeff) * flow_path_ft.sqrt() / (100.0 * slope).powf(0.33)
}

/// SCS Lag: Tc = 100·L^0.8·(1000/CN − 9)^0.7 / (1900·(100·S)^0.5)
#[inline]
pub fn scs_lag(flow_path_ft: f64, slope: f64, curve_number: f64) -> f64 {
    let retention = 1000.0 / curve_number - 9.0;
    100.0 * flow_path_ft.powf(0.8) * retention.powf(0.7) / (1900.0 * (100.0 * slope).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kirpich_closed_form() {
        let expected = 0.0078 * 1000f64.powf(0.77) * 0.05f64.powf(-0.385);
        let tc = kirpich(1000.0, 0.05);
        assert!(((tc - expected) / expected).abs() < 1e-9);
        assert!((tc - 5.046510149284555).abs() < 1e-9);
    }

    #[test]
    fn test_faa() {
        assert!((faa(1000.0, 0.05, 0.43) - 22.422663857116028).abs() < 1e-9);
        // C 越大 Tc 越短
        assert!(faa(1000.0, 0.05, 0.9) < faa(1000.0, 0.05, 0.3));
    }

    #[test]
    fn test_scs_lag() {
        assert!((scs_lag(300.0, 0.02, 81.0) - 8.309356562966348).abs() < 1e-9);
    }

    #[test]
    fn test_zero_slope_not_finite() {
        assert!(!kirpich(1000.0, 0.0).is_finite());
        assert!(!faa(1000.0, 0.0, 0.5).is_finite());
        assert!(!scs_lag(1000.0, 0.0, 80.0).is_finite());
    }
}
