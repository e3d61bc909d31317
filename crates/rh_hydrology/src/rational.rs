// crates/rh_hydrology/src/rational.rs

//! Rational 公式 (RationalMethodEngine)
//!
//! i = a·(Tc + d)^b [mm/hr]，Q = 0.278·C·i·A [m³/s]，A 单位 km²。

use rh_foundation::RhError;
use serde::Serialize;

use crate::error::{HydroError, HydroResult};
use crate::types::ReturnPeriodRegression;

/// 公制 Rational 公式换算系数（mm/hr · km² → m³/s）
pub const RATIONAL_CONSTANT: f64 = 0.278;

/// IDF 曲线降雨强度 [mm/hr]
#[inline]
pub fn rainfall_intensity(tc_minutes: f64, regression: &ReturnPeriodRegression) -> f64 {
    regression.a * (tc_minutes + regression.d).powf(regression.b)
}

/// 洪峰流量 [m³/s]
#[inline]
pub fn peak_discharge(runoff_coeff: f64, intensity_mm_hr: f64, area_km2: f64) -> f64 {
    RATIONAL_CONSTANT * runoff_coeff * intensity_mm_hr * area_km2
}

/// 单个 (子流域, 重现期) 的强度与流量
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakDischargeResult {
    /// 降雨强度 [mm/hr]
    pub intensity_mm_hr: f64,
    /// 洪峰流量 [m³/s]；径流系数缺失时为 `None`
    pub discharge_m3s: Option<f64>,
}

/// 计算强度与流量
///
/// `Tc + d ≤ 0` 时 IDF 曲线无定义，返回错误。
pub fn evaluate(
    tc_minutes: f64,
    regression: &ReturnPeriodRegression,
    runoff_coeff: Option<f64>,
    area_km2: f64,
) -> HydroResult<PeakDischargeResult> {
    let shifted = tc_minutes + regression.d;
    if !(shifted > 0.0) {
        return Err(HydroError::NonPositiveBase {
            quantity: "tc_plus_d",
            value: shifted,
        });
    }
    let intensity_mm_hr = rainfall_intensity(tc_minutes, regression);
    RhError::check_finite("intensity_mm_hr", intensity_mm_hr)?;

    Ok(PeakDischargeResult {
        intensity_mm_hr,
        discharge_m3s: runoff_coeff.map(|c| peak_discharge(c, intensity_mm_hr, area_km2)),
    })
}
