// crates/rh_hydrology/src/error.rs

//! 水文引擎错误类型
//!
//! 在 `RhError` 基础上扩展 Tc / Rational 计算特有的错误。
//! 没有适用方法不属于错误，而是以 Tc = 0 哨兵值加标记返回，
//! 见 [`crate::tc::TcEstimate::is_no_applicable_method`]。

use rh_config::ConfigError;
use rh_foundation::RhError;
use thiserror::Error;

use crate::tc::TcMethod;
use crate::types::{ReturnPeriod, SubbasinId};

/// 水文引擎结果类型
pub type HydroResult<T> = Result<T, HydroError>;

/// 水文引擎错误
#[derive(Error, Debug)]
pub enum HydroError {
    /// 子流域总面积为零，面积加权无法进行
    #[error("子流域 {subbasin} 总面积为零 ({total_area_ha} ha)")]
    ZeroArea {
        /// 子流域
        subbasin: SubbasinId,
        /// 单元面积之和 [ha]
        total_area_ha: f64,
    },

    /// 二分法在迭代上限内未收敛
    #[error("{method} 二分求解未收敛: {iterations} 次迭代后残差 {residual:e}, 区间 [{lower}, {upper}]")]
    SolverNonConvergence {
        /// 隐式方法
        method: TcMethod,
        /// 已执行的残差计算次数
        iterations: usize,
        /// 最后一次残差 [in/hr]
        residual: f64,
        /// 最终下界 [in/hr]
        lower: f64,
        /// 最终上界 [in/hr]
        upper: f64,
    },

    /// 分数次幂的底数非正
    #[error("{quantity} 必须为正才能取分数次幂, 实际为 {value}")]
    NonPositiveBase {
        /// 量的名称
        quantity: &'static str,
        /// 实际值
        value: f64,
    },

    /// 显式公式得到非有限 Tc（如坡度为零）
    #[error("{method} 得到非有限 Tc: {value}")]
    NonFiniteTc {
        /// 方法
        method: TcMethod,
        /// 计算值
        value: f64,
    },

    /// 无效输入
    #[error("无效输入: {field}={value}, 原因: {reason}")]
    InvalidInput {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: String,
        /// 原因
        reason: String,
    },

    /// 子流域缺少汇流路径记录
    #[error("子流域 {subbasin} 缺少最长汇流路径记录")]
    MissingFlowPath {
        /// 子流域
        subbasin: SubbasinId,
    },

    /// 回归系数表中重现期重复
    #[error("重现期 {rp} 年在回归系数表中重复")]
    DuplicateReturnPeriod {
        /// 重现期
        rp: ReturnPeriod,
    },

    /// 十进制高精度转换失败
    #[error("十进制转换失败: {value} ({reason})")]
    Precision {
        /// 输入文本
        value: String,
        /// 原因
        reason: String,
    },

    /// 分类表内容无效
    #[error("分类表无效: {0}")]
    InvalidTables(String),

    /// 引擎配置无效
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] RhError),
}

impl HydroError {
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

    /// 该错误是否只影响单个 (子流域, 重现期) 组合
    pub fn is_per_return_period(&self) -> bool {
        matches!(
            self,
            Self::SolverNonConvergence { .. } | Self::NonPositiveBase { .. } | Self::NonFiniteTc { .. }
        )
    }
}
