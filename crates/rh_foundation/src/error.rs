// crates/rh_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `RhError` 枚举和 `RhResult` 类型别名。水文计算相关的错误
//! （零面积、求解器不收敛等）在 `rh_hydrology` 中扩展。
//!
//! # 示例
//!
//! ```
//! use rh_foundation::error::{RhError, RhResult};
//!
//! fn check_slope(slope_pct: f64) -> RhResult<()> {
//!     RhError::check_finite("slope_pct", slope_pct)
//! }
//!
//! assert!(check_slope(f64::NAN).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RhResult<T> = Result<T, RhError>;

/// RunoffHydro 基础错误类型
#[derive(Error, Debug)]
pub enum RhError {
    /// 无效输入
    #[error("无效的输入数据: {field}={value}, 原因: {reason}")]
    InvalidInput {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: String,
        /// 无效原因
        reason: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 非有限数值（NaN 或无穷）
    #[error("非有限数值: {field}={value}")]
    NonFinite {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RhError {
    /// 无效输入
    pub fn invalid_input(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl RhError {
    /// 检查数值是否有限
    #[inline]
    pub fn check_finite(field: &'static str, value: f64) -> RhResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { field, value })
        }
    }

    /// 检查值是否在闭区间内（NaN 视为越界）
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> RhResult<()> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(Self::out_of_range(field, value, min, max))
        }
    }

    /// 检查值为有限正数
    #[inline]
    pub fn check_positive(field: &'static str, value: f64) -> RhResult<()> {
        Self::check_finite(field, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::invalid_input(field, value, "必须为正数"))
        }
    }

    /// 检查值为有限非负数
    #[inline]
    pub fn check_non_negative(field: &'static str, value: f64) -> RhResult<()> {
        Self::check_finite(field, value)?;
        if value >= 0.0 {
            Ok(())
        } else {
            Err(Self::invalid_input(field, value, "不能为负数"))
        }
    }
}

/// 条件不满足时提前返回错误
///
/// ```
/// use rh_foundation::{ensure, RhError, RhResult};
///
/// fn positive(x: f64) -> RhResult<f64> {
///     ensure!(x > 0.0, RhError::invalid_input("x", x, "必须为正数"));
///     Ok(x)
/// }
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}


// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RhError::invalid_input("area_ha", -1.0, "不能为负数");
        let msg = err.to_string();
        assert!(msg.contains("area_ha"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_check_range() {
        assert!(RhError::check_range("c", 0.5, 0.0, 1.0).is_ok());
        assert!(RhError::check_range("c", 1.5, 0.0, 1.0).is_err());
        assert!(RhError::check_range("c", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_check_positive() {
        assert!(RhError::check_positive("length", 10.0).is_ok());
        assert!(RhError::check_positive("length", 0.0).is_err());
        assert!(matches!(
            RhError::check_positive("length", f64::INFINITY),
            Err(RhError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_check_non_negative() {
        assert!(RhError::check_non_negative("slope", 0.0).is_ok());
        assert!(RhError::check_non_negative("slope", -0.1).is_err());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> RhResult<()> {
            ensure!(value > 0, RhError::invalid_input("value", value, "必须为正数"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }
}
