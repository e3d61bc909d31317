// crates/rh_hydrology/src/solver/decimal.rs

//! 十进制高精度运算上下文
//!
//! 隐式公式中的 0.4 / 0.33 / 0.6 次幂会把 f64 的舍入误差放大到
//! 1e-10 量级，二分法在该阈值下会停滞，因此残差在 `DBig` 上计算。
//! 所有参与运算的数都经由 [`DecimalContext`] 创建，保证精度一致
//! （超越函数要求非零精度）。

use dashu_float::DBig;
use rh_config::MIN_PRECISION_DIGITS;
use std::str::FromStr;

use crate::error::{HydroError, HydroResult};

/// 十进制运算上下文（有效位数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    digits: usize,
}

impl DecimalContext {
    /// 以给定有效位数创建，不足 [`MIN_PRECISION_DIGITS`] 时取该下限
    pub fn new(digits: usize) -> Self {
        Self {
            digits: digits.max(MIN_PRECISION_DIGITS),
        }
    }

    /// 从十进制字面量创建
    pub fn literal(&self, text: &str) -> HydroResult<DBig> {
        let value = DBig::from_str(text).map_err(|e| HydroError::Precision {
            value: text.to_string(),
            reason: e.to_string(),
        })?;
        Ok(value.with_precision(self.digits).value())
    }

    /// 从 f64 创建（按其最短十进制表示）
    pub fn from_f64(&self, value: f64) -> HydroResult<DBig> {
        if !value.is_finite() {
            return Err(HydroError::Precision {
                value: value.to_string(),
                reason: "非有限数值".into(),
            });
        }
        self.literal(&value.to_string())
    }

    /// x^y = exp(y·ln x)，要求 x > 0
    pub fn powf(&self, base: &DBig, exponent: &DBig, quantity: &'static str) -> HydroResult<DBig> {
        if *base <= DBig::ZERO {
            return Err(HydroError::NonPositiveBase {
                quantity,
                value: to_f64(base),
            });
        }
        Ok((exponent * base.ln()).exp())
    }

    /// a / b，简写
    pub fn ratio(&self, numerator: &str, denominator: &str) -> HydroResult<DBig> {
        Ok(self.literal(numerator)? / self.literal(denominator)?)
    }
}

/// 转回 f64
#[inline]
pub fn to_f64(value: &DBig) -> f64 {
    value.to_f64().value()
}
