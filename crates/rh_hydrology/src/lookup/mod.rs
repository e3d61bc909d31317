// crates/rh_hydrology/src/lookup/mod.rs

//! 属性分类表 (AttributeLookup)
//!
//! 把土地覆盖类别 / 土壤名称映射为 CN、Manning n、阻滞系数和
//! 径流系数。所有查询按精确字符串匹配，未映射的键返回 `None`，
//! 从不回退为 0。
//!
//! 内置表通过 [`ClassificationTables::standard`] 获取，进程内只构建一次；
//! 项目自定义表可以从 JSON 加载。

pub mod classes;
pub mod standard;

pub use classes::{CurveNumberEntry, Hsg};

use rh_foundation::RhError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use crate::error::{HydroError, HydroResult};
use crate::types::ReturnPeriod;

static STANDARD_TABLES: OnceLock<ClassificationTables> = OnceLock::new();

/// 分类表集合（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTables {
    /// 土地覆盖类别 → 阻滞类别
    pub retardance_classes: HashMap<String, String>,
    /// 阻滞类别 → 阻滞系数
    pub retardance_coefficients: HashMap<String, f64>,
    /// 土地覆盖类别 → 径流系数代码
    pub runoff_codes: HashMap<String, String>,
    /// 径流系数代码 → (重现期 → C)
    pub runoff_coefficients: HashMap<String, BTreeMap<ReturnPeriod, f64>>,
    /// 土壤名称 → HSG
    pub soil_groups: HashMap<String, Hsg>,
    /// 土地覆盖类别 → Manning n
    pub manning_n: HashMap<String, f64>,
    /// 土地覆盖类别 → CN 表项
    pub curve_numbers: HashMap<String, CurveNumberEntry>,
}

impl ClassificationTables {
    /// 内置分类表（全局单例）
    pub fn standard() -> &'static ClassificationTables {
        STANDARD_TABLES.get_or_init(standard::build)
    }

    /// 从 JSON 加载并验证
    pub fn from_json(content: &str) -> HydroResult<Self> {
        let tables: Self = serde_json::from_str(content)
            .map_err(|e| HydroError::InvalidTables(e.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> HydroResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HydroError::InvalidTables(e.to_string()))
    }

    /// 验证数值范围：0 < C ≤ 1，0 ≤ CN ≤ 100，n > 0，阻滞系数 > 0
    pub fn validate(&self) -> HydroResult<()> {
        for (code, by_rp) in &self.runoff_coefficients {
            for (rp, c) in by_rp {
                if !(*c > 0.0 && *c <= 1.0) {
                    return Err(HydroError::InvalidTables(format!(
                        "径流系数 {code}@{rp} = {c} 不在 (0, 1] 内"
                    )));
                }
            }
        }
        for (lc, entry) in &self.curve_numbers {
            for cn in entry.values() {
                RhError::check_range("curve_number", cn, 0.0, 100.0)
                    .map_err(|e| HydroError::InvalidTables(format!("CN 表项 {lc}: {e}")))?;
            }
        }
        for (lc, n) in &self.manning_n {
            if !(*n > 0.0 && n.is_finite()) {
                return Err(HydroError::InvalidTables(format!("Manning n {lc} = {n} 必须为正")));
            }
        }
        for (class, coeff) in &self.retardance_coefficients {
            if !(*coeff > 0.0 && coeff.is_finite()) {
                return Err(HydroError::InvalidTables(format!("阻滞系数 {class} = {coeff} 必须为正")));
            }
        }
        Ok(())
    }

    // ========================================================================
    // 查询
    // ========================================================================

    /// 阻滞类别
    pub fn retardance_class(&self, land_cover: &str) -> Option<&str> {
        self.retardance_classes.get(land_cover).map(String::as_str)
    }

    /// 阻滞系数（阻滞类别 → 系数两级查询）
    pub fn retardance_coeff(&self, land_cover: &str) -> Option<f64> {
        let class = self.retardance_class(land_cover)?;
        self.retardance_coefficients.get(class).copied()
    }

    /// 径流系数代码
    pub fn runoff_code(&self, land_cover: &str) -> Option<&str> {
        self.runoff_codes.get(land_cover).map(String::as_str)
    }

    /// 指定重现期的径流系数
    pub fn runoff_coeff(&self, land_cover: &str, rp: ReturnPeriod) -> Option<f64> {
        let code = self.runoff_code(land_cover)?;
        self.runoff_coefficients.get(code)?.get(&rp).copied()
    }

    /// 土壤名称对应的 HSG，未列出的名称为 `Hsg::Unknown`
    pub fn soil_group(&self, soil_type: &str) -> Hsg {
        self.soil_groups.get(soil_type).copied().unwrap_or(Hsg::Unknown)
    }

    /// Manning n
    pub fn manning_n(&self, land_cover: &str) -> Option<f64> {
        self.manning_n.get(land_cover).copied()
    }

    /// CN，按 (土地覆盖, 土壤名称) 查询
    pub fn curve_number(&self, land_cover: &str, soil_type: &str) -> Option<f64> {
        let entry = self.curve_numbers.get(land_cover)?;
        entry.for_group(self.soil_group(soil_type))
    }

    /// 径流系数表中出现过的所有重现期
    pub fn tabulated_return_periods(&self) -> BTreeSet<ReturnPeriod> {
        self.runoff_coefficients
            .values()
            .flat_map(|by_rp| by_rp.keys().copied())
            .collect()
    }
}
