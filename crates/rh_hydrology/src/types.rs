// crates/rh_hydrology/src/types.rs

//! 引擎输入数据类型
//!
//! 这些记录由外部协作方（流向分析、矢量叠加、用户 CSV）产生，
//! 引擎只读取，不修改。

use rh_foundation::{ensure, RhError, RhResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{HydroError, HydroResult};

/// 重现期 [年]
pub type ReturnPeriod = u32;

/// 子流域编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubbasinId(pub u32);

impl fmt::Display for SubbasinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubbasinId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// 参与面积加权的子流域属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// SCS 曲线数 CN
    CurveNumber,
    /// Manning 糙率 n
    ManningN,
    /// Izzard 阻滞系数
    RetardanceCoeff,
    /// Rational 径流系数 C
    RunoffCoeff,
}

impl Attribute {
    /// 输出表中的列名
    pub fn column(self) -> &'static str {
        match self {
            Self::CurveNumber => "CN",
            Self::ManningN => "n-value",
            Self::RetardanceCoeff => "ret-c",
            Self::RunoffCoeff => "runoff-C",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// 土地覆盖 × 土壤叠加单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandSoilUnit {
    /// 所属子流域
    pub subbasin_id: SubbasinId,
    /// 土地覆盖类别（精确字符串匹配）
    pub land_cover_class: String,
    /// 土壤类型名称
    pub soil_type: String,
    /// 面积 [ha]
    pub area_ha: f64,
}

impl LandSoilUnit {
    /// 创建单元
    pub fn new(
        subbasin_id: u32,
        land_cover_class: impl Into<String>,
        soil_type: impl Into<String>,
        area_ha: f64,
    ) -> Self {
        Self {
            subbasin_id: SubbasinId(subbasin_id),
            land_cover_class: land_cover_class.into(),
            soil_type: soil_type.into(),
            area_ha,
        }
    }
}

/// 最长汇流路径属性
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowPathAttributes {
    /// 所属子流域
    pub subbasin_id: SubbasinId,
    /// 最长汇流路径长度 [m]
    pub longest_flow_path_m: f64,
    /// 沿路径平均坡度 [%]
    pub average_slope_pct: f64,
}

impl FlowPathAttributes {
    /// 检查 L > 0 且坡度为有限非负数
    pub fn validate(&self) -> RhResult<()> {
        RhError::check_positive("longest_flow_path_m", self.longest_flow_path_m)?;
        RhError::check_non_negative("average_slope_pct", self.average_slope_pct)?;
        Ok(())
    }
}

/// 子流域属性表的一行
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubbasinRecord {
    /// 子流域编号
    pub subbasin_id: SubbasinId,
    /// 子流域面积 [ha]
    pub area_ha: f64,
    /// 最长汇流路径长度 [m]
    pub longest_flow_path_m: f64,
    /// 平均坡度 [%]
    pub average_slope_pct: f64,
}

impl SubbasinRecord {
    /// 创建记录
    pub fn new(
        subbasin_id: u32,
        area_ha: f64,
        longest_flow_path_m: f64,
        average_slope_pct: f64,
    ) -> Self {
        Self {
            subbasin_id: SubbasinId(subbasin_id),
            area_ha,
            longest_flow_path_m,
            average_slope_pct,
        }
    }

    /// 汇流路径部分
    pub fn flow_path(&self) -> FlowPathAttributes {
        FlowPathAttributes {
            subbasin_id: self.subbasin_id,
            longest_flow_path_m: self.longest_flow_path_m,
            average_slope_pct: self.average_slope_pct,
        }
    }
}

/// IDF 曲线回归系数：i = a·(Tc + d)^b [mm/hr]
///
/// 列名 `rp, a, d, b` 与用户 CSV 一致，反序列化时不提供任何默认值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReturnPeriodRegression {
    /// 重现期 [年]
    pub rp: ReturnPeriod,
    /// 系数 a
    pub a: f64,
    /// 偏移 d [min]
    pub d: f64,
    /// 指数 b
    pub b: f64,
}

impl ReturnPeriodRegression {
    /// 创建回归系数
    pub fn new(rp: ReturnPeriod, a: f64, d: f64, b: f64) -> Self {
        Self { rp, a, d, b }
    }

    /// 检查系数有限
    pub fn validate(&self) -> RhResult<()> {
        ensure!(self.rp > 0, RhError::invalid_input("rp", self.rp, "重现期必须为正整数"));
        RhError::check_finite("a", self.a)?;
        RhError::check_finite("d", self.d)?;
        RhError::check_finite("b", self.b)?;
        Ok(())
    }
}

/// 回归系数表，保持输入顺序
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTable {
    rows: Vec<ReturnPeriodRegression>,
}

impl RegressionTable {
    /// 验证并创建回归系数表（重现期不得重复）
    pub fn new(rows: Vec<ReturnPeriodRegression>) -> HydroResult<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            row.validate()?;
            if !seen.insert(row.rp) {
                return Err(HydroError::DuplicateReturnPeriod { rp: row.rp });
            }
        }
        Ok(Self { rows })
    }

    /// 所有行
    pub fn rows(&self) -> &[ReturnPeriodRegression] {
        &self.rows
    }

    /// 按重现期查找
    pub fn get(&self, rp: ReturnPeriod) -> Option<&ReturnPeriodRegression> {
        self.rows.iter().find(|row| row.rp == rp)
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
