// crates/rh_config/src/lib.rs

//! RunoffHydro Config Layer (Layer 2)
//!
//! 引擎配置层，集中管理隐式求解器、Tc 下限和批处理选项。
//!
//! # 模块概览
//!
//! - [`engine_config`]: EngineConfig 引擎配置（全 f64，可 JSON 序列化）
//! - [`error`]: 配置错误类型
//!
//! # 示例
//!
//! ```
//! use rh_config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.solver.max_iterations, 200);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine_config;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use engine_config::{
    Bracket, EngineConfig, ProcessingConfig, SolverSettings, TcSettings, MIN_PRECISION_DIGITS,
    MIN_TC_MINUTES,
};
pub use error::ConfigError;
