// crates/rh_config/src/engine_config.rs

//! EngineConfig - 引擎配置（全 f64）
//!
//! 隐式求解器、Tc 下限与批处理选项。所有字段都有默认值，
//! JSON 中缺省的字段按默认值填充。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 十进制任意精度运算的最低有效位数
///
/// Kinematic Wave 的 0.4 / 0.33 / 0.6 次幂在 binary64 下的舍入误差
/// 足以让 1e-10 的二分收敛判据振荡，低于 50 位不予接受。
pub const MIN_PRECISION_DIGITS: usize = 50;

/// Tc 下限的最小允许值 [min]
pub const MIN_TC_MINUTES: f64 = 5.0;

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// 隐式求解器参数
    #[serde(default)]
    pub solver: SolverSettings,

    /// Tc 参数
    #[serde(default)]
    pub tc: TcSettings,

    /// 批处理参数
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// 二分搜索区间 [lower, upper]（降雨强度 in/hr）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// 下界
    pub lower: f64,
    /// 上界
    pub upper: f64,
}

impl Bracket {
    /// 创建区间
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// 区间宽度
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// 隐式求解器（二分法）参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// 收敛判据 |i_calc - i_trial| < tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// 最大迭代次数
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// 十进制有效位数
    #[serde(default = "default_precision_digits")]
    pub precision_digits: usize,

    /// Izzard 公式的强度搜索区间
    #[serde(default = "default_izzard_bracket")]
    pub izzard_bracket: Bracket,

    /// Kinematic Wave 公式的强度搜索区间
    #[serde(default = "default_kinematic_bracket")]
    pub kinematic_bracket: Bracket,
}

fn default_tolerance() -> f64 { 1e-10 }
fn default_max_iterations() -> usize { 200 }
fn default_precision_digits() -> usize { MIN_PRECISION_DIGITS }
fn default_izzard_bracket() -> Bracket { Bracket::new(0.0, 5000.0) }
fn default_kinematic_bracket() -> Bracket { Bracket::new(0.0, 1000.0) }

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            precision_digits: default_precision_digits(),
            izzard_bracket: default_izzard_bracket(),
            kinematic_bracket: default_kinematic_bracket(),
        }
    }
}

/// Tc 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcSettings {
    /// Tc 下限 [min]
    #[serde(default = "default_min_tc")]
    pub min_tc_minutes: f64,
}

fn default_min_tc() -> f64 { MIN_TC_MINUTES }

impl Default for TcSettings {
    fn default() -> Self {
        Self {
            min_tc_minutes: default_min_tc(),
        }
    }
}

/// 批处理参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// 是否按子流域并行
    #[serde(default)]
    pub parallel: bool,

    /// 子流域表面积与土地/土壤单元面积之和的相对容差，超出时记录警告
    #[serde(default = "default_area_tolerance")]
    pub area_mismatch_tolerance: f64,
}

fn default_area_tolerance() -> f64 { 0.01 }

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            area_mismatch_tolerance: default_area_tolerance(),
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let solver = &self.solver;

        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "solver.tolerance",
                solver.tolerance,
                "收敛容差必须为有限正数",
            ));
        }

        if solver.max_iterations == 0 {
            return Err(ConfigError::invalid(
                "solver.max_iterations",
                solver.max_iterations,
                "最大迭代次数必须大于 0",
            ));
        }

        if solver.precision_digits < MIN_PRECISION_DIGITS {
            return Err(ConfigError::invalid(
                "solver.precision_digits",
                solver.precision_digits,
                format!("有效位数不能少于 {}", MIN_PRECISION_DIGITS),
            ));
        }

        validate_bracket("solver.izzard_bracket", &solver.izzard_bracket)?;
        validate_bracket("solver.kinematic_bracket", &solver.kinematic_bracket)?;

        if !(self.tc.min_tc_minutes.is_finite() && self.tc.min_tc_minutes >= MIN_TC_MINUTES) {
            return Err(ConfigError::invalid(
                "tc.min_tc_minutes",
                self.tc.min_tc_minutes,
                format!("Tc 下限必须为有限值且不小于 {} 分钟", MIN_TC_MINUTES),
            ));
        }

        let tol = self.processing.area_mismatch_tolerance;
        if !(tol.is_finite() && tol >= 0.0) {
            return Err(ConfigError::invalid(
                "processing.area_mismatch_tolerance",
                tol,
                "面积容差必须为有限非负数",
            ));
        }

        Ok(())
    }
}

fn validate_bracket(key: &str, bracket: &Bracket) -> Result<(), ConfigError> {
    let ok = bracket.lower.is_finite()
        && bracket.upper.is_finite()
        && bracket.lower >= 0.0
        && bracket.width() > 0.0;
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("[{}, {}]", bracket.lower, bracket.upper),
            "区间必须满足 0 <= lower < upper",
        ))
    }
}
