// crates/rh_hydrology/src/solver/mod.rs

//! 隐式方程求解器
//!
//! - [`decimal`]: `DBig` 十进制运算上下文
//! - [`bisection`]: 通用区间二分
//! - [`implicit`]: Izzard / Kinematic Wave 强度-Tc 耦合求解

pub mod bisection;
pub mod decimal;
pub mod implicit;

pub use bisection::{bisect, BisectionOutcome, BisectionProblem};
pub use decimal::DecimalContext;
pub use implicit::{solve_izzard, solve_kinematic, ImplicitSolution};
