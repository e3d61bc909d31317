// crates/rh_hydrology/src/solver/implicit.rs

//! 隐式 Tc 公式 (ImplicitSolver)
//!
//! Izzard 与 Kinematic Wave 的 Tc 依赖于降雨强度 i，而 i 又由 IDF 曲线
//! 从 Tc 得到。二分求 i 使 i_calc(Tc(i)) = i，再由收敛的 i 回算 Tc。
//!
//! - Izzard: Tc(i) = 41.025·(0.0007·i + c_r)·L^0.33 / (S^(1/3)·i^(2/3))
//! - Kinematic Wave: Tc(i) = 0.94·L^0.6·n^0.6 / (i^0.4·S^0.33)
//! - i_calc(Tc) = a·(Tc + d)^b / 25.4  [in/hr]
//!
//! L 单位 ft，S 为小数坡度，i 单位 in/hr，Tc 单位 min。
//! 返回的 Tc 未经 5 分钟下限截断。

use dashu_float::DBig;
use rh_config::SolverSettings;
use rh_foundation::units;

use super::bisection::{bisect, BisectionProblem};
use super::decimal::{to_f64, DecimalContext};
use crate::error::HydroResult;
use crate::tc::TcMethod;
use crate::types::ReturnPeriodRegression;

/// 隐式求解结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitSolution {
    /// 收敛的降雨强度 [in/hr]
    pub intensity_in_hr: f64,
    /// 由收敛强度回算的 Tc [min]（未截断）
    pub tc_minutes: f64,
    /// 残差计算次数
    pub iterations: usize,
}

/// 十进制 IDF 曲线，系数 a 已换算为 in/hr
struct DecimalIdf {
    a_in_hr: DBig,
    d: DBig,
    b: DBig,
}

impl DecimalIdf {
    fn new(ctx: &DecimalContext, regression: &ReturnPeriodRegression) -> HydroResult<Self> {
        Ok(Self {
            a_in_hr: ctx.from_f64(regression.a)? / ctx.from_f64(units::MM_PER_INCH)?,
            d: ctx.from_f64(regression.d)?,
            b: ctx.from_f64(regression.b)?,
        })
    }

    /// i_calc(Tc) [in/hr]
    fn intensity_in_hr(&self, ctx: &DecimalContext, tc_minutes: &DBig) -> HydroResult<DBig> {
        let shifted = tc_minutes + &self.d;
        Ok(&self.a_in_hr * ctx.powf(&shifted, &self.b, "tc_plus_d")?)
    }
}

/// Izzard 隐式求解
pub fn solve_izzard(
    flow_path_ft: f64,
    slope: f64,
    retardance_coeff: f64,
    regression: &ReturnPeriodRegression,
    settings: &SolverSettings,
) -> HydroResult<ImplicitSolution> {
    let ctx = DecimalContext::new(settings.precision_digits);
    let idf = DecimalIdf::new(&ctx, regression)?;

    let l = ctx.from_f64(flow_path_ft)?;
    let s = ctx.from_f64(slope)?;
    let c_r = ctx.from_f64(retardance_coeff)?;
    let k_i = ctx.literal("0.0007")?;
    let two_thirds = ctx.ratio("2", "3")?;

    // 41.025·L^0.33 / S^(1/3)
    let geometry = ctx.literal("41.025")? * ctx.powf(&l, &ctx.literal("0.33")?, "flow_path_ft")?
        / ctx.powf(&s, &ctx.ratio("1", "3")?, "slope")?;

    let tc_of = |i: &DBig| -> HydroResult<DBig> {
        let numerator = &geometry * (&k_i * i + &c_r);
        Ok(numerator / ctx.powf(i, &two_thirds, "intensity")?)
    };

    solve(&ctx, &idf, TcMethod::Izzard, settings, tc_of)
}

/// Kinematic Wave 隐式求解
pub fn solve_kinematic(
    flow_path_ft: f64,
    slope: f64,
    manning_n: f64,
    regression: &ReturnPeriodRegression,
    settings: &SolverSettings,
) -> HydroResult<ImplicitSolution> {
    let ctx = DecimalContext::new(settings.precision_digits);
    let idf = DecimalIdf::new(&ctx, regression)?;

    let l = ctx.from_f64(flow_path_ft)?;
    let s = ctx.from_f64(slope)?;
    let n = ctx.from_f64(manning_n)?;
    let p06 = ctx.literal("0.6")?;
    let p04 = ctx.literal("0.4")?;

    // 0.94·L^0.6·n^0.6 / S^0.33
    let geometry = ctx.literal("0.94")?
        * ctx.powf(&l, &p06, "flow_path_ft")?
        * ctx.powf(&n, &p06, "manning_n")?
        / ctx.powf(&s, &ctx.literal("0.33")?, "slope")?;

    let tc_of = |i: &DBig| -> HydroResult<DBig> {
        Ok(&geometry / ctx.powf(i, &p04, "intensity")?)
    };

    solve(&ctx, &idf, TcMethod::KinematicWave, settings, tc_of)
}

fn solve<T>(
    ctx: &DecimalContext,
    idf: &DecimalIdf,
    method: TcMethod,
    settings: &SolverSettings,
    tc_of: T,
) -> HydroResult<ImplicitSolution>
where
    T: Fn(&DBig) -> HydroResult<DBig>,
{
    let bracket = match method {
        TcMethod::Izzard => settings.izzard_bracket,
        _ => settings.kinematic_bracket,
    };
    let problem = BisectionProblem {
        method,
        bracket,
        tolerance: settings.tolerance,
        max_iterations: settings.max_iterations,
    };

    // 根总是最后一次试算点，保留该点的 Tc
    let mut last_tc = None;
    let outcome = bisect(ctx, &problem, |i| {
        let tc = tc_of(i)?;
        let residual = idf.intensity_in_hr(ctx, &tc)? - i;
        last_tc = Some(tc);
        Ok(residual)
    })?;

    let tc = match last_tc {
        Some(tc) => tc,
        None => tc_of(&outcome.root)?,
    };
    Ok(ImplicitSolution {
        intensity_in_hr: to_f64(&outcome.root),
        tc_minutes: to_f64(&tc),
        iterations: outcome.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regression() -> ReturnPeriodRegression {
        ReturnPeriodRegression::new(10, 1666.19, 7.70, -0.65)
    }

    fn i_calc(tc: f64, r: &ReturnPeriodRegression) -> f64 {
        r.a * (tc + r.d).powf(r.b) / units::MM_PER_INCH
    }

    #[test]
    fn test_kinematic_reference() {
        let s = solve_kinematic(1000.0, 0.05, 0.035, &regression(), &SolverSettings::default())
            .unwrap();
        assert!((s.intensity_in_hr - 10.857026621124533).abs() < 1e-8);
        assert!((s.tc_minutes - 8.21531495163343).abs() < 1e-7);
        assert!(s.iterations <= 200);
    }

    #[test]
    fn test_kinematic_long_flow_path() {
        let s = solve_kinematic(43100.0, 0.027, 0.0647, &regression(), &SolverSettings::default())
            .unwrap();
        assert!((s.intensity_in_hr - 1.5802399323092686).abs() < 1e-8);
        assert!((s.tc_minutes - 300.96606429104804).abs() < 1e-5);
    }

    #[test]
    fn test_izzard_reference() {
        let s = solve_izzard(200.0, 0.02, 0.046, &regression(), &SolverSettings::default())
            .unwrap();
        assert!((s.intensity_in_hr - 10.203824269865436).abs() < 1e-8);
        assert!((s.tc_minutes - 9.809493948949779).abs() < 1e-7);
    }

    #[test]
    fn test_fixed_point_residual() {
        let r = regression();
        let settings = SolverSettings::default();
        for n in [0.014, 0.035, 0.0647, 0.12] {
            let s = solve_kinematic(1000.0, 0.05, n, &r, &settings).unwrap();
            assert!((s.intensity_in_hr - i_calc(s.tc_minutes, &r)).abs() < 1e-8);
        }
        for rc in [0.012, 0.046, 0.06] {
            let s = solve_izzard(200.0, 0.02, rc, &r, &settings).unwrap();
            assert!((s.intensity_in_hr - i_calc(s.tc_minutes, &r)).abs() < 1e-8);
        }
    }

    #[test]
    fn test_short_path_not_clamped_here() {
        let s = solve_kinematic(1000.0, 0.05, 0.014, &regression(), &SolverSettings::default())
            .unwrap();
        assert!((s.tc_minutes - 4.416366143455252).abs() < 1e-7);
    }

    #[test]
    fn test_zero_slope_is_domain_error() {
        let result = solve_kinematic(1000.0, 0.0, 0.035, &regression(), &SolverSettings::default());
        assert!(matches!(
            result,
            Err(crate::error::HydroError::NonPositiveBase { quantity: "slope", .. })
        ));
    }

    #[test]
    fn test_converged_tc_matches_root() {
        let r = regression();
        let settings = SolverSettings::default();
        let s = solve_kinematic(1000.0, 0.05, 0.0647, &r, &settings).unwrap();
        let recomputed = 0.94 * (1000.0f64 * 0.0647).powf(0.6)
            / (s.intensity_in_hr.powf(0.4) * 0.05f64.powf(0.33));
        assert!((s.tc_minutes - recomputed).abs() < 1e-9);
        assert!((s.intensity_in_hr - 9.249874223769439).abs() < 1e-8);
        assert!((s.tc_minutes - 12.663565167237104).abs() < 1e-7);
    }

    #[test]
    fn test_low_precision_setting_is_raised() {
        let low = SolverSettings {
            precision_digits: 8,
            ..SolverSettings::default()
        };
        let a = solve_izzard(200.0, 0.02, 0.046, &regression(), &low).unwrap();
        let b = solve_izzard(200.0, 0.02, 0.046, &regression(), &SolverSettings::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_iteration_cap_reported() {
        let settings = SolverSettings {
            max_iterations: 10,
            ..SolverSettings::default()
        };
        let result = solve_kinematic(1000.0, 0.05, 0.035, &regression(), &settings);
        assert!(matches!(
            result,
            Err(crate::error::HydroError::SolverNonConvergence {
                method: TcMethod::KinematicWave,
                iterations: 10,
                ..
            })
        ));
    }
}
