// crates/rh_hydrology/src/tc/selector.rs

//! 方法选择 (MethodSelector)
//!
//! | 方法 | 适用范围（坡度 %，面积 acre） |
//! |------|------------------------------|
//! | Kirpich | 3 ≤ slope ≤ 10 且 1 ≤ area ≤ 112 |
//! | Izzard | slope > 0 且 area < 5 |
//! | FAA | slope > 0 且 area > 112 |
//! | Kinematic Wave | slope ≥ 0 且 area > 0 |
//! | SCS Lag | slope ≤ 2000 且 area < 3 |
//!
//! 所有适用方法都会计算，每个候选先截断到 Tc 下限，报告值取最大者。
//! 没有可计算的候选时 Tc = 0（哨兵值），结果带 `NoApplicableMethod` 标记。

use rh_config::{EngineConfig, SolverSettings, TcSettings};
use rh_foundation::units;
use std::collections::BTreeSet;

use super::{formulas, TcMethod};
use crate::error::{HydroError, HydroResult};
use crate::solver::{solve_izzard, solve_kinematic, ImplicitSolution};
use crate::types::{Attribute, ReturnPeriodRegression};

/// 判定适用方法，按 [`TcMethod::ALL`] 顺序返回
pub fn applicable_methods(slope_pct: f64, area_acres: f64) -> Vec<TcMethod> {
    TcMethod::ALL
        .into_iter()
        .filter(|method| is_applicable(*method, slope_pct, area_acres))
        .collect()
}

fn is_applicable(method: TcMethod, slope_pct: f64, area_acres: f64) -> bool {
    match method {
        TcMethod::Kirpich => {
            (3.0..=10.0).contains(&slope_pct) && (1.0..=112.0).contains(&area_acres)
        }
        TcMethod::Izzard => slope_pct > 0.0 && area_acres < 5.0,
        TcMethod::Faa => slope_pct > 0.0 && area_acres > 112.0,
        TcMethod::KinematicWave => slope_pct >= 0.0 && area_acres > 0.0,
        TcMethod::ScsLag => slope_pct <= 2000.0 && area_acres < 3.0,
    }
}

/// 单个子流域、单个重现期的 Tc 输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TcInputs {
    /// 最长汇流路径 [m]
    pub flow_path_m: f64,
    /// 平均坡度 [%]
    pub slope_pct: f64,
    /// 汇水面积 [km²]
    pub area_km2: f64,
    /// 该重现期的加权径流系数
    pub runoff_coeff: Option<f64>,
    /// 加权 CN
    pub curve_number: Option<f64>,
    /// 加权 Manning n
    pub manning_n: Option<f64>,
    /// 加权阻滞系数
    pub retardance_coeff: Option<f64>,
}

impl TcInputs {
    fn flow_path_ft(&self) -> f64 {
        units::metres_to_feet(self.flow_path_m)
    }

    fn slope(&self) -> f64 {
        units::percent_to_fraction(self.slope_pct)
    }

    /// 面积 [acre]
    pub fn area_acres(&self) -> f64 {
        units::km2_to_acres(self.area_km2)
    }
}

/// 候选方法的计算结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateOutcome {
    /// 已计算
    Evaluated {
        /// 截断后的 Tc [min]
        tc_minutes: f64,
        /// 公式原值 [min]
        raw_tc_minutes: f64,
        /// 隐式方法的收敛强度 [in/hr]
        intensity_in_hr: Option<f64>,
        /// 隐式方法的迭代次数
        iterations: Option<usize>,
    },
    /// 缺少所需属性，未计算
    MissingAttribute(Attribute),
}

/// 适用方法及其结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TcCandidate {
    /// 方法
    pub method: TcMethod,
    /// 结果
    pub outcome: CandidateOutcome,
}

impl TcCandidate {
    /// 截断后的 Tc，未计算时为 `None`
    pub fn tc_minutes(&self) -> Option<f64> {
        match self.outcome {
            CandidateOutcome::Evaluated { tc_minutes, .. } => Some(tc_minutes),
            CandidateOutcome::MissingAttribute(_) => None,
        }
    }
}

/// Tc 判定结果
#[derive(Debug, Clone, PartialEq)]
pub struct TcEstimate {
    /// 报告的 Tc [min]；无适用方法时为 0
    pub tc_minutes: f64,
    /// 取得最大值的方法
    pub governing: Option<TcMethod>,
    /// 全部适用方法（含未计算的）
    pub candidates: Vec<TcCandidate>,
}

impl TcEstimate {
    /// 没有任何可计算的方法，`tc_minutes` 为哨兵值 0
    pub fn is_no_applicable_method(&self) -> bool {
        self.governing.is_none()
    }

    /// 参与取最大值的方法集合
    pub fn methods_used(&self) -> BTreeSet<TcMethod> {
        self.candidates
            .iter()
            .filter(|c| c.tc_minutes().is_some())
            .map(|c| c.method)
            .collect()
    }

    /// 指定方法的候选
    pub fn candidate(&self, method: TcMethod) -> Option<&TcCandidate> {
        self.candidates.iter().find(|c| c.method == method)
    }
}

/// 方法选择器
#[derive(Debug, Clone, Copy)]
pub struct MethodSelector<'a> {
    solver: &'a SolverSettings,
    tc: &'a TcSettings,
}

impl<'a> MethodSelector<'a> {
    /// 从引擎配置创建，配置未通过验证时返回 [`HydroError::Config`]
    pub fn new(config: &'a EngineConfig) -> HydroResult<Self> {
        config.validate()?;
        Ok(Self {
            solver: &config.solver,
            tc: &config.tc,
        })
    }

    /// 计算全部适用方法并取最大 Tc
    ///
    /// 隐式求解失败或公式得到非有限值时整体失败。
    pub fn estimate(
        &self,
        inputs: &TcInputs,
        regression: &ReturnPeriodRegression,
    ) -> HydroResult<TcEstimate> {
        let methods = applicable_methods(inputs.slope_pct, inputs.area_acres());

        let mut candidates = Vec::with_capacity(methods.len());
        let mut best: Option<(TcMethod, f64)> = None;
        for method in methods {
            let outcome = self.evaluate(method, inputs, regression)?;
            if let CandidateOutcome::Evaluated { tc_minutes, .. } = outcome {
                if best.map_or(true, |(_, tc)| tc_minutes > tc) {
                    best = Some((method, tc_minutes));
                }
            }
            candidates.push(TcCandidate { method, outcome });
        }

        Ok(TcEstimate {
            tc_minutes: best.map_or(0.0, |(_, tc)| tc),
            governing: best.map(|(method, _)| method),
            candidates,
        })
    }

    fn evaluate(
        &self,
        method: TcMethod,
        inputs: &TcInputs,
        regression: &ReturnPeriodRegression,
    ) -> HydroResult<CandidateOutcome> {
        let l = inputs.flow_path_ft();
        let s = inputs.slope();

        let (raw_tc, solution): (f64, Option<ImplicitSolution>) = match method {
            TcMethod::Kirpich => (formulas::kirpich(l, s), None),
            TcMethod::Faa => match inputs.runoff_coeff {
                Some(c) => (formulas::faa(l, s, c), None),
                None => return Ok(CandidateOutcome::MissingAttribute(Attribute::RunoffCoeff)),
            },
            TcMethod::ScsLag => match inputs.curve_number {
                Some(cn) => (formulas::scs_lag(l, s, cn), None),
                None => return Ok(CandidateOutcome::MissingAttribute(Attribute::CurveNumber)),
            },
            TcMethod::Izzard => match inputs.retardance_coeff {
                Some(rc) => {
                    let solved = solve_izzard(l, s, rc, regression, self.solver)?;
                    (solved.tc_minutes, Some(solved))
                }
                None => {
                    return Ok(CandidateOutcome::MissingAttribute(Attribute::RetardanceCoeff))
                }
            },
            TcMethod::KinematicWave => match inputs.manning_n {
                Some(n) => {
                    let solved = solve_kinematic(l, s, n, regression, self.solver)?;
                    (solved.tc_minutes, Some(solved))
                }
                None => return Ok(CandidateOutcome::MissingAttribute(Attribute::ManningN)),
            },
        };

        if !raw_tc.is_finite() {
            return Err(HydroError::NonFiniteTc {
                method,
                value: raw_tc,
            });
        }

        Ok(CandidateOutcome::Evaluated {
            tc_minutes: raw_tc.max(self.tc.min_tc_minutes),
            raw_tc_minutes: raw_tc,
            intensity_in_hr: solution.map(|sol| sol.intensity_in_hr),
            iterations: solution.map(|sol| sol.iterations),
        })
    }
}
