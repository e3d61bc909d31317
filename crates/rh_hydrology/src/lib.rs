// crates/rh_hydrology/src/lib.rs

//! RunoffHydro Hydrology Layer (Layer 3)
//!
//! 汇流时间 (Tc) 与 Rational 公式洪峰流量引擎。
//!
//! # 计算流程
//!
//! ```text
//! LandSoilUnit ──> lookup ──> aggregate ──> WeightedSubbasinAttributes
//!                                                  │
//! SubbasinRecord ─────────────────────────────────>│
//!                                                  ▼
//! RegressionTable ──> tc::MethodSelector (+ solver::implicit) ──> Tc
//!                                                  │
//!                                                  ▼
//!                              rational ──> PeakDischargeRow
//! ```
//!
//! # 模块概览
//!
//! - [`lookup`]: 土地覆盖 / 土壤分类表
//! - [`aggregate`]: 面积加权属性
//! - [`tc`]: Tc 公式与方法选择
//! - [`solver`]: 十进制高精度二分求解
//! - [`rational`]: 降雨强度与洪峰流量
//! - [`processor`]: 子流域批处理
//!
//! # 示例
//!
//! ```
//! use rh_config::EngineConfig;
//! use rh_hydrology::prelude::*;
//!
//! let config = EngineConfig::default();
//! let processor = SubbasinProcessor::with_standard_tables(&config).unwrap();
//! let regression = RegressionTable::new(vec![
//!     ReturnPeriodRegression::new(10, 1666.19, 7.70, -0.65),
//! ]).unwrap();
//!
//! let report = processor.process(
//!     &[SubbasinRecord::new(1, 40.0, 900.0, 4.0)],
//!     &[LandSoilUnit::new(1, "Grassland", "Loam", 40.0)],
//!     &regression,
//! );
//! let row = report.get(SubbasinId(1), 10).unwrap();
//! assert!(row.tc_minutes >= 5.0);
//! assert!(row.discharge_m3s.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod error;
pub mod lookup;
pub mod processor;
pub mod rational;
pub mod solver;
pub mod tc;
pub mod types;

/// 层级标识
pub const LAYER: u8 = 3;

pub use aggregate::{aggregate, Unclassified, WeightedSubbasinAttributes};
pub use error::{HydroError, HydroResult};
pub use lookup::{ClassificationTables, Hsg};
pub use processor::{
    PeakDischargeRow, ProcessingFailure, ProcessingReport, SubbasinProcessor,
    TimeOfConcentrationResult,
};
pub use rational::PeakDischargeResult;
pub use tc::{MethodSelector, TcEstimate, TcInputs, TcMethod};
pub use types::{
    Attribute, FlowPathAttributes, LandSoilUnit, RegressionTable, ReturnPeriod,
    ReturnPeriodRegression, SubbasinId, SubbasinRecord,
};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{HydroError, HydroResult};
    pub use crate::lookup::ClassificationTables;
    pub use crate::processor::{PeakDischargeRow, ProcessingReport, SubbasinProcessor};
    pub use crate::tc::TcMethod;
    pub use crate::types::{
        LandSoilUnit, RegressionTable, ReturnPeriodRegression, SubbasinId, SubbasinRecord,
    };
}
