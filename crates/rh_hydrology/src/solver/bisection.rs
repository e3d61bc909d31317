// crates/rh_hydrology/src/solver/bisection.rs

//! 区间二分求根
//!
//! 求 f(x) = 0，f 在区间内单调递减（残差 = i_calc − i_trial）：
//! 残差 < 0 时收缩上界，> 0 时收缩下界。
//! 收敛判据 |f(x)| < tol；残差计算次数达到上限仍未收敛时报错。

use dashu_float::DBig;
use rh_config::Bracket;

use super::decimal::{to_f64, DecimalContext};
use crate::error::{HydroError, HydroResult};
use crate::tc::TcMethod;

/// 二分问题参数
#[derive(Debug, Clone, Copy)]
pub struct BisectionProblem {
    /// 所属方法（用于报错）
    pub method: TcMethod,
    /// 初始区间
    pub bracket: Bracket,
    /// 残差阈值
    pub tolerance: f64,
    /// 残差计算次数上限
    pub max_iterations: usize,
}

/// 二分求解结果
#[derive(Debug, Clone)]
pub struct BisectionOutcome {
    /// 根
    pub root: DBig,
    /// 残差计算次数
    pub iterations: usize,
    /// 根处残差
    pub residual: DBig,
}

/// 二分求根
///
/// 返回的根总是最后一次计算残差的点。
pub fn bisect<F>(
    ctx: &DecimalContext,
    problem: &BisectionProblem,
    mut residual_at: F,
) -> HydroResult<BisectionOutcome>
where
    F: FnMut(&DBig) -> HydroResult<DBig>,
{
    let two = ctx.literal("2")?;
    let tol = ctx.from_f64(problem.tolerance)?;
    let neg_tol = -tol.clone();

    let mut lower = ctx.from_f64(problem.bracket.lower)?;
    let mut upper = ctx.from_f64(problem.bracket.upper)?;
    let mut trial = (&lower + &upper) / &two;
    let mut residual = residual_at(&trial)?;
    let mut iterations = 1;

    while !(residual < tol && residual > neg_tol) {
        if iterations >= problem.max_iterations {
            return Err(HydroError::SolverNonConvergence {
                method: problem.method,
                iterations,
                residual: to_f64(&residual),
                lower: to_f64(&lower),
                upper: to_f64(&upper),
            });
        }

        if residual < DBig::ZERO {
            upper = trial;
        } else {
            lower = trial;
        }
        trial = (&lower + &upper) / &two;
        residual = residual_at(&trial)?;
        iterations += 1;

        log::trace!(
            "{} 二分第 {} 次: x = {:.12}, 残差 = {:e}",
            problem.method,
            iterations,
            to_f64(&trial),
            to_f64(&residual)
        );
    }

    Ok(BisectionOutcome {
        root: trial,
        iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(bracket: Bracket, max_iterations: usize) -> BisectionProblem {
        BisectionProblem {
            method: TcMethod::KinematicWave,
            bracket,
            tolerance: 1e-10,
            max_iterations,
        }
    }

    #[test]
    fn test_bisect_sqrt_two() {
        // f(x) = 2 - x² 在 [0, 2] 上递减
        let ctx = DecimalContext::new(50);
        let two = ctx.literal("2").unwrap();
        let outcome = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 200), |x| {
            Ok(&two - x * x)
        })
        .unwrap();
        assert!((to_f64(&outcome.root) - std::f64::consts::SQRT_2).abs() < 1e-10);
        assert!(to_f64(&outcome.residual).abs() < 1e-10);
        assert!(outcome.iterations > 1 && outcome.iterations < 200);
    }

    #[test]
    fn test_root_is_last_trial() {
        let ctx = DecimalContext::new(50);
        let two = ctx.literal("2").unwrap();
        let mut trials = Vec::new();
        let outcome = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 200), |x| {
            trials.push(x.clone());
            Ok(&two - x * x)
        })
        .unwrap();
        assert_eq!(trials.len(), outcome.iterations);
        assert_eq!(trials.last(), Some(&outcome.root));
    }

    #[test]
    fn test_bisect_exact_midpoint() {
        let ctx = DecimalContext::new(50);
        let one = ctx.literal("1").unwrap();
        let outcome = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 200), |x| {
            Ok(&one - x)
        })
        .unwrap();
        assert_eq!(outcome.iterations, 1);
        assert_eq!(to_f64(&outcome.root), 1.0);
    }

    #[test]
    fn test_bisect_iteration_cap() {
        let ctx = DecimalContext::new(50);
        let two = ctx.literal("2").unwrap();
        let err = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 5), |x| Ok(&two - x * x))
            .unwrap_err();
        match err {
            HydroError::SolverNonConvergence {
                iterations, lower, upper, ..
            } => {
                assert_eq!(iterations, 5);
                assert!(lower < std::f64::consts::SQRT_2 && std::f64::consts::SQRT_2 < upper);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bisect_root_outside_bracket() {
        // 根在区间外时逼近端点，最终在上限处报错
        let ctx = DecimalContext::new(50);
        let ten = ctx.literal("10").unwrap();
        let result = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 200), |x| Ok(&ten - x));
        assert!(matches!(result, Err(HydroError::SolverNonConvergence { .. })));
    }

    #[test]
    fn test_residual_error_propagates() {
        let ctx = DecimalContext::new(50);
        let result = bisect(&ctx, &problem(Bracket::new(0.0, 2.0), 200), |_| {
            Err(HydroError::NonPositiveBase {
                quantity: "intensity",
                value: 0.0,
            })
        });
        assert!(matches!(result, Err(HydroError::NonPositiveBase { .. })));
    }
}
