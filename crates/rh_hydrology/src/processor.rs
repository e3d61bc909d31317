// crates/rh_hydrology/src/processor.rs

//! 子流域批处理 (SubbasinProcessor)
//!
//! 每个子流域：聚合一次属性，然后对回归表的每个重现期依次
//! 判定 Tc、计算强度与洪峰流量。结果按 (子流域, 重现期) 存入有序表，
//! 与处理顺序无关，因此可以按子流域并行。
//!
//! 失败只影响其范围：聚合失败跳过整个子流域，Tc / IDF 失败只跳过
//! 该重现期。失败全部记入 [`ProcessingReport::failures`]。

use log::{debug, warn};
use rayon::prelude::*;
use rh_config::EngineConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::{aggregate, WeightedSubbasinAttributes};
use crate::error::{HydroError, HydroResult};
use crate::lookup::ClassificationTables;
use crate::rational::{self, PeakDischargeResult};
use crate::tc::{MethodSelector, TcEstimate, TcInputs, TcMethod};
use crate::types::{
    Attribute, LandSoilUnit, RegressionTable, ReturnPeriod, ReturnPeriodRegression, SubbasinId,
    SubbasinRecord,
};

// ============================================================================
// 结果类型
// ============================================================================

/// 单个 (子流域, 重现期) 的 Tc 结果
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfConcentrationResult {
    /// 子流域
    pub subbasin_id: SubbasinId,
    /// 重现期
    pub return_period: ReturnPeriod,
    /// 方法判定详情
    pub estimate: TcEstimate,
}

impl TimeOfConcentrationResult {
    /// 报告的 Tc [min]
    pub fn tc_minutes(&self) -> f64 {
        self.estimate.tc_minutes
    }

    /// 参与取最大值的方法
    pub fn methods_used(&self) -> BTreeSet<TcMethod> {
        self.estimate.methods_used()
    }
}

/// 输出表的一行
///
/// 序列化列严格为 `Subbasin, area_has, CN, n-value, ret-c, flowPath, slope,
/// RP, runoff-C, tc, Q`，缺失值序列化为 null。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakDischargeRow {
    /// 子流域
    #[serde(rename = "Subbasin")]
    pub subbasin_id: SubbasinId,
    /// 汇水面积 [ha]
    #[serde(rename = "area_has")]
    pub area_ha: f64,
    /// 加权 CN
    #[serde(rename = "CN")]
    pub curve_number: Option<f64>,
    /// 加权 Manning n
    #[serde(rename = "n-value")]
    pub manning_n: Option<f64>,
    /// 加权阻滞系数
    #[serde(rename = "ret-c")]
    pub retardance_coeff: Option<f64>,
    /// 最长汇流路径 [m]
    #[serde(rename = "flowPath")]
    pub flow_path_m: f64,
    /// 平均坡度 [%]
    #[serde(rename = "slope")]
    pub slope_pct: f64,
    /// 重现期 [年]
    #[serde(rename = "RP")]
    pub return_period: ReturnPeriod,
    /// 加权径流系数
    #[serde(rename = "runoff-C")]
    pub runoff_coeff: Option<f64>,
    /// Tc [min]
    #[serde(rename = "tc")]
    pub tc_minutes: f64,
    /// 洪峰流量 [m³/s]
    #[serde(rename = "Q")]
    pub discharge_m3s: Option<f64>,

    #[serde(skip)]
    tc: TimeOfConcentrationResult,
    #[serde(skip)]
    peak: PeakDischargeResult,
}

impl PeakDischargeRow {
    /// 输出列名，按序
    pub const COLUMNS: [&'static str; 11] = [
        "Subbasin", "area_has", "CN", "n-value", "ret-c", "flowPath", "slope", "RP", "runoff-C",
        "tc", "Q",
    ];

    fn new(
        record: &SubbasinRecord,
        weighted: &WeightedSubbasinAttributes,
        tc: TimeOfConcentrationResult,
        peak: PeakDischargeResult,
    ) -> Self {
        Self {
            subbasin_id: record.subbasin_id,
            area_ha: weighted.area_ha,
            curve_number: weighted.curve_number,
            manning_n: weighted.manning_n,
            retardance_coeff: weighted.retardance_coeff,
            flow_path_m: record.longest_flow_path_m,
            slope_pct: record.average_slope_pct,
            return_period: tc.return_period,
            runoff_coeff: weighted.runoff_coeff(tc.return_period),
            tc_minutes: tc.tc_minutes(),
            discharge_m3s: peak.discharge_m3s,
            tc,
            peak,
        }
    }

    /// Tc 判定详情
    pub fn time_of_concentration(&self) -> &TimeOfConcentrationResult {
        &self.tc
    }

    /// 强度与流量
    pub fn peak_discharge(&self) -> &PeakDischargeResult {
        &self.peak
    }

    /// 降雨强度 [mm/hr]
    pub fn intensity_mm_hr(&self) -> f64 {
        self.peak.intensity_mm_hr
    }

    /// 取最大值的方法
    pub fn governing_method(&self) -> Option<TcMethod> {
        self.tc.estimate.governing
    }

    /// 缺失的属性列
    pub fn missing_attributes(&self) -> Vec<Attribute> {
        [
            (Attribute::CurveNumber, self.curve_number),
            (Attribute::ManningN, self.manning_n),
            (Attribute::RetardanceCoeff, self.retardance_coeff),
            (Attribute::RunoffCoeff, self.runoff_coeff),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(attribute, _)| attribute)
        .collect()
    }

    /// 所有属性均已分类
    pub fn is_complete(&self) -> bool {
        self.missing_attributes().is_empty()
    }

    /// Tc 为无适用方法时的 0 哨兵值
    pub fn has_sentinel_tc(&self) -> bool {
        self.tc.estimate.is_no_applicable_method()
    }
}

/// 处理失败
#[derive(Debug)]
pub struct ProcessingFailure {
    /// 子流域
    pub subbasin_id: SubbasinId,
    /// 重现期；整个子流域被跳过时为 `None`
    pub return_period: Option<ReturnPeriod>,
    /// 错误
    pub error: HydroError,
}

/// 单个子流域的处理结果
#[derive(Debug, Default)]
pub struct SubbasinOutcome {
    /// 成功的行
    pub rows: Vec<PeakDischargeRow>,
    /// 失败
    pub failures: Vec<ProcessingFailure>,
}

/// 批处理报告
#[derive(Debug, Default)]
pub struct ProcessingReport {
    rows: BTreeMap<(SubbasinId, ReturnPeriod), PeakDischargeRow>,
    failures: Vec<ProcessingFailure>,
}

impl ProcessingReport {
    fn merge(&mut self, outcome: SubbasinOutcome) {
        for row in outcome.rows {
            self.rows.insert((row.subbasin_id, row.return_period), row);
        }
        self.failures.extend(outcome.failures);
    }

    /// 按 (子流域, 重现期) 排序的行
    pub fn rows(&self) -> impl Iterator<Item = &PeakDischargeRow> {
        self.rows.values()
    }

    /// 查找行
    pub fn get(&self, subbasin_id: SubbasinId, rp: ReturnPeriod) -> Option<&PeakDischargeRow> {
        self.rows.get(&(subbasin_id, rp))
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否没有任何行
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 全部失败，按 (子流域, 重现期) 排序
    pub fn failures(&self) -> &[ProcessingFailure] {
        &self.failures
    }

    /// 被整体跳过的子流域
    pub fn skipped_subbasins(&self) -> BTreeSet<SubbasinId> {
        self.failures
            .iter()
            .filter(|f| f.return_period.is_none())
            .map(|f| f.subbasin_id)
            .collect()
    }

    /// 取出全部行
    pub fn into_rows(self) -> Vec<PeakDischargeRow> {
        self.rows.into_values().collect()
    }
}

// ============================================================================
// 处理器
// ============================================================================

/// 子流域批处理器
#[derive(Debug, Clone, Copy)]
pub struct SubbasinProcessor<'a> {
    tables: &'a ClassificationTables,
    config: &'a EngineConfig,
    selector: MethodSelector<'a>,
}

impl<'a> SubbasinProcessor<'a> {
    /// 使用自定义分类表，配置未通过验证时返回 [`HydroError::Config`]
    pub fn new(tables: &'a ClassificationTables, config: &'a EngineConfig) -> HydroResult<Self> {
        let selector = MethodSelector::new(config)?;
        Ok(Self {
            tables,
            config,
            selector,
        })
    }

    /// 使用内置分类表
    pub fn with_standard_tables(config: &'a EngineConfig) -> HydroResult<Self> {
        Self::new(ClassificationTables::standard(), config)
    }

    /// 处理全部子流域
    pub fn process(
        &self,
        subbasins: &[SubbasinRecord],
        units: &[LandSoilUnit],
        regression: &RegressionTable,
    ) -> ProcessingReport {
        let mut units_by_subbasin: BTreeMap<SubbasinId, Vec<&LandSoilUnit>> = BTreeMap::new();
        for unit in units {
            units_by_subbasin.entry(unit.subbasin_id).or_default().push(unit);
        }

        let mut report = ProcessingReport::default();
        let mut seen = BTreeSet::new();
        let mut jobs = Vec::with_capacity(subbasins.len());
        for record in subbasins {
            let id = record.subbasin_id;
            if !seen.insert(id) {
                warn!("子流域 {id} 记录重复，忽略后出现的记录");
                report.failures.push(ProcessingFailure {
                    subbasin_id: id,
                    return_period: None,
                    error: HydroError::invalid_input("subbasin_id", id, "子流域记录重复"),
                });
                continue;
            }
            let own_units = units_by_subbasin.remove(&id).unwrap_or_default();
            jobs.push((record, own_units));
        }

        // 有单元但没有子流域记录
        for id in units_by_subbasin.into_keys() {
            warn!("子流域 {id} 缺少汇流路径记录，跳过");
            report.failures.push(ProcessingFailure {
                subbasin_id: id,
                return_period: None,
                error: HydroError::MissingFlowPath { subbasin: id },
            });
        }

        let outcomes: Vec<SubbasinOutcome> = if self.config.processing.parallel {
            jobs.par_iter()
                .map(|(record, own_units)| self.process_subbasin(record, own_units, regression))
                .collect()
        } else {
            jobs.iter()
                .map(|(record, own_units)| self.process_subbasin(record, own_units, regression))
                .collect()
        };
        for outcome in outcomes {
            report.merge(outcome);
        }

        report
            .failures
            .sort_by_key(|f| (f.subbasin_id, f.return_period));
        report
    }

    /// 处理单个子流域的全部重现期
    pub fn process_subbasin(
        &self,
        record: &SubbasinRecord,
        units: &[&LandSoilUnit],
        regression: &RegressionTable,
    ) -> SubbasinOutcome {
        let id = record.subbasin_id;
        let mut outcome = SubbasinOutcome::default();

        let weighted = match self.prepare(record, units) {
            Ok(weighted) => weighted,
            Err(error) => {
                warn!("跳过子流域 {id}: {error}");
                outcome.failures.push(ProcessingFailure {
                    subbasin_id: id,
                    return_period: None,
                    error,
                });
                return outcome;
            }
        };

        for row in regression.rows() {
            match self.process_return_period(record, &weighted, row) {
                Ok(result) => outcome.rows.push(result),
                Err(error) => {
                    warn!("子流域 {id} 重现期 {} 年计算失败: {error}", row.rp);
                    outcome.failures.push(ProcessingFailure {
                        subbasin_id: id,
                        return_period: Some(row.rp),
                        error,
                    });
                }
            }
        }
        outcome
    }

    fn prepare(
        &self,
        record: &SubbasinRecord,
        units: &[&LandSoilUnit],
    ) -> HydroResult<WeightedSubbasinAttributes> {
        record.flow_path().validate()?;
        let weighted = aggregate(record.subbasin_id, units.iter().copied(), self.tables)?;

        if !weighted.is_complete() {
            warn!(
                "子流域 {} 有 {} 项未分类属性，相关列将为空",
                record.subbasin_id,
                weighted.unclassified.len()
            );
        }

        let mismatch = (record.area_ha - weighted.area_ha).abs() / weighted.area_ha;
        if !(mismatch <= self.config.processing.area_mismatch_tolerance) {
            warn!(
                "子流域 {} 面积不一致: 记录 {} ha, 单元合计 {} ha",
                record.subbasin_id, record.area_ha, weighted.area_ha
            );
        }
        Ok(weighted)
    }

    fn process_return_period(
        &self,
        record: &SubbasinRecord,
        weighted: &WeightedSubbasinAttributes,
        regression: &ReturnPeriodRegression,
    ) -> HydroResult<PeakDischargeRow> {
        let id = record.subbasin_id;
        let rp = regression.rp;
        let runoff_coeff = weighted.runoff_coeff(rp);
        let inputs = TcInputs {
            flow_path_m: record.longest_flow_path_m,
            slope_pct: record.average_slope_pct,
            area_km2: weighted.area_km2(),
            runoff_coeff,
            curve_number: weighted.curve_number,
            manning_n: weighted.manning_n,
            retardance_coeff: weighted.retardance_coeff,
        };

        let estimate = self.selector.estimate(&inputs, regression)?;
        match estimate.governing {
            Some(method) => debug!(
                "子流域 {id} 重现期 {rp} 年: Tc = {:.4} min ({method})",
                estimate.tc_minutes
            ),
            None => warn!("子流域 {id} 重现期 {rp} 年没有可计算的 Tc 方法，Tc 取 0"),
        }

        let peak = rational::evaluate(estimate.tc_minutes, regression, runoff_coeff, inputs.area_km2)?;
        let tc = TimeOfConcentrationResult {
            subbasin_id: id,
            return_period: rp,
            estimate,
        };
        Ok(PeakDischargeRow::new(record, weighted, tc, peak))
    }
}
