// crates/rh_foundation/src/lib.rs

//! RunoffHydro Foundation Layer
//!
//! 基础层，提供整个项目共用的底层抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与 `ensure!` 宏
//! - [`numerics`]: Kahan 补偿求和与面积加权平均
//! - [`units`]: 水文计算中的单位换算常量
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: rh_hydrology  ─> Tc / 洪峰流量引擎
//! Layer 2: rh_config     ─> EngineConfig
//! Layer 1: rh_foundation ─> 错误、数值工具、单位换算 (本层)
//! ```
//!
//! # 示例
//!
//! ```
//! use rh_foundation::numerics::WeightedMean;
//! use rh_foundation::units::hectares_to_km2;
//!
//! let mut mean = WeightedMean::new();
//! mean.add(98.0, 2.0);
//! mean.add(60.0, 2.0);
//! assert_eq!(mean.value(), Some(79.0));
//! assert!((hectares_to_km2(100.0) - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod numerics;
pub mod units;

// 重导出常用类型
pub use error::{RhError, RhResult};
pub use numerics::{KahanSum, WeightedMean};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{RhError, RhResult};
    pub use crate::numerics::{KahanSum, WeightedMean};
    pub use crate::units;
    pub use crate::ensure;
}
