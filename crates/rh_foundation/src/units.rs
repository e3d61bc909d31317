// crates/rh_foundation/src/units.rs

//! 单位换算
//!
//! 流域属性表使用公制（m、ha、%），经验 Tc 公式使用英制
//! （ft、acre、in/hr），Rational 公式使用公制（km²、mm/hr）。

/// 米 → 英尺
pub const FEET_PER_METRE: f64 = 3.28084;

/// 公顷 → 平方公里
pub const KM2_PER_HECTARE: f64 = 0.01;

/// 平方公里 → 英亩
pub const ACRES_PER_KM2: f64 = 247.105;

/// 每英寸毫米数（mm/hr → in/hr 时先 ÷10 再 ÷2.54）
pub const MM_PER_INCH: f64 = 25.4;

/// 米 → 英尺
#[inline]
pub fn metres_to_feet(m: f64) -> f64 {
    m * FEET_PER_METRE
}

/// 公顷 → 平方公里
#[inline]
pub fn hectares_to_km2(ha: f64) -> f64 {
    ha * KM2_PER_HECTARE
}

/// 平方公里 → 英亩
#[inline]
pub fn km2_to_acres(km2: f64) -> f64 {
    km2 * ACRES_PER_KM2
}

/// 坡度百分数 → 小数坡度（5% → 0.05）
#[inline]
pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}
