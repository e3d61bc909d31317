// crates/rh_hydrology/src/aggregate.rs

//! 面积加权属性聚合 (AttributeAggregator)
//!
//! weighted = Σ(value·area) / Σ(area)
//!
//! 任一正面积单元的某项属性未分类时，该属性整体为 `None`，
//! 并在 [`WeightedSubbasinAttributes::unclassified`] 中留下标记，
//! 避免把缺失值当 0 参与加权。

use rh_foundation::prelude::*;
use std::collections::BTreeMap;

use crate::error::{HydroError, HydroResult};
use crate::lookup::ClassificationTables;
use crate::types::{Attribute, LandSoilUnit, ReturnPeriod, SubbasinId};

/// 未分类标记
#[derive(Debug, Clone, PartialEq)]
pub struct Unclassified {
    /// 缺失的属性
    pub attribute: Attribute,
    /// 单元的土地覆盖类别
    pub land_cover_class: String,
    /// 单元的土壤类型
    pub soil_type: String,
    /// 单元面积 [ha]
    pub area_ha: f64,
}

/// 子流域面积加权属性
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSubbasinAttributes {
    /// 子流域
    pub subbasin_id: SubbasinId,
    /// 单元面积之和 [ha]
    pub area_ha: f64,
    /// 加权 CN
    pub curve_number: Option<f64>,
    /// 加权 Manning n
    pub manning_n: Option<f64>,
    /// 加权阻滞系数
    pub retardance_coeff: Option<f64>,
    runoff_coeffs: BTreeMap<ReturnPeriod, f64>,
    /// 未分类标记
    pub unclassified: Vec<Unclassified>,
}

impl WeightedSubbasinAttributes {
    /// 指定重现期的加权径流系数
    pub fn runoff_coeff(&self, rp: ReturnPeriod) -> Option<f64> {
        self.runoff_coeffs.get(&rp).copied()
    }

    /// 面积 [km²]
    pub fn area_km2(&self) -> f64 {
        units::hectares_to_km2(self.area_ha)
    }

    /// 所有单元均已分类
    pub fn is_complete(&self) -> bool {
        self.unclassified.is_empty()
    }
}

/// 带完整性标志的加权平均
struct Accumulator {
    mean: WeightedMean,
    complete: bool,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            mean: WeightedMean::new(),
            complete: true,
        }
    }

    fn add(&mut self, value: Option<f64>, area_ha: f64) -> bool {
        match value {
            Some(v) => {
                self.mean.add(v, area_ha);
                true
            }
            None => {
                self.complete = false;
                false
            }
        }
    }

    fn finish(&self) -> Option<f64> {
        if self.complete {
            self.mean.value()
        } else {
            None
        }
    }
}

/// 聚合一个子流域的全部土地/土壤单元
///
/// 单元面积之和为 0（含无单元）时返回 [`HydroError::ZeroArea`]。
pub fn aggregate<'a, I>(
    subbasin_id: SubbasinId,
    units: I,
    tables: &ClassificationTables,
) -> HydroResult<WeightedSubbasinAttributes>
where
    I: IntoIterator<Item = &'a LandSoilUnit>,
{
    let return_periods = tables.tabulated_return_periods();

    let mut total = KahanSum::new();
    let mut cn = Accumulator::new();
    let mut n = Accumulator::new();
    let mut ret = Accumulator::new();
    let mut runoff: BTreeMap<ReturnPeriod, Accumulator> =
        return_periods.iter().map(|rp| (*rp, Accumulator::new())).collect();
    let mut unclassified = Vec::new();

    for unit in units {
        ensure!(
            unit.subbasin_id == subbasin_id,
            HydroError::invalid_input(
                "subbasin_id",
                unit.subbasin_id,
                format!("单元不属于子流域 {subbasin_id}"),
            )
        );
        RhError::check_non_negative("area_ha", unit.area_ha)?;
        if unit.area_ha == 0.0 {
            continue;
        }
        total.add(unit.area_ha);

        let mut mark = |attribute: Attribute| {
            unclassified.push(Unclassified {
                attribute,
                land_cover_class: unit.land_cover_class.clone(),
                soil_type: unit.soil_type.clone(),
                area_ha: unit.area_ha,
            });
        };

        let lc = unit.land_cover_class.as_str();
        if !cn.add(tables.curve_number(lc, &unit.soil_type), unit.area_ha) {
            mark(Attribute::CurveNumber);
        }
        if !n.add(tables.manning_n(lc), unit.area_ha) {
            mark(Attribute::ManningN);
        }
        if !ret.add(tables.retardance_coeff(lc), unit.area_ha) {
            mark(Attribute::RetardanceCoeff);
        }

        let mut runoff_complete = true;
        for (rp, acc) in runoff.iter_mut() {
            runoff_complete &= acc.add(tables.runoff_coeff(lc, *rp), unit.area_ha);
        }
        if !runoff_complete {
            mark(Attribute::RunoffCoeff);
        }
    }

    let area_ha = total.value();
    if area_ha <= 0.0 {
        return Err(HydroError::ZeroArea {
            subbasin: subbasin_id,
            total_area_ha: area_ha,
        });
    }

    let runoff_coeffs = runoff
        .into_iter()
        .filter_map(|(rp, acc)| acc.finish().map(|c| (rp, c)))
        .collect();

    Ok(WeightedSubbasinAttributes {
        subbasin_id,
        area_ha,
        curve_number: cn.finish(),
        manning_n: n.finish(),
        retardance_coeff: ret.finish(),
        runoff_coeffs,
        unclassified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(lc: &str, soil: &str, area: f64) -> LandSoilUnit {
        LandSoilUnit::new(1, lc, soil, area)
    }

    #[test]
    fn test_weighted_curve_number() {
        let units = vec![
            unit("Grassland", "Loam", 3.0),     // CN 79
            unit("Built-up", "Sand", 1.0),      // CN 98
            unit("Open Forest", "Clay", 6.0),   // CN 79
        ];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        let expected = (79.0 * 3.0 + 98.0 * 1.0 + 79.0 * 6.0) / 10.0;
        assert!((w.curve_number.unwrap() - expected).abs() < 1e-9);
        assert!((w.area_ha - 10.0).abs() < 1e-12);
        assert!(w.is_complete());
    }

    #[test]
    fn test_weighted_manning_and_retardance() {
        let units = vec![unit("Grassland", "Loam", 1.0), unit("Closed Forest", "Loam", 3.0)];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        assert!((w.manning_n.unwrap() - (0.03 + 3.0 * 0.12) / 4.0).abs() < 1e-12);
        assert!((w.retardance_coeff.unwrap() - (0.046 + 3.0 * 0.06) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_runoff_per_return_period() {
        let units = vec![unit("Grassland", "Loam", 1.0), unit("Fishpond", "Loam", 1.0)];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        assert!((w.runoff_coeff(10).unwrap() - (0.43 + 1.0) / 2.0).abs() < 1e-12);
        assert!((w.runoff_coeff(500).unwrap() - (0.61 + 1.0) / 2.0).abs() < 1e-12);
        assert_eq!(w.runoff_coeff(3), None);
    }

    #[test]
    fn test_unknown_soil_propagates_missing_cn() {
        let units = vec![unit("Grassland", "Loam", 5.0), unit("Grassland", "Moon Dust", 5.0)];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        assert_eq!(w.curve_number, None);
        // 其余属性不受影响
        assert!((w.manning_n.unwrap() - 0.03).abs() < 1e-12);
        assert!(!w.is_complete());
        assert_eq!(w.unclassified.len(), 1);
        assert_eq!(w.unclassified[0].attribute, Attribute::CurveNumber);
        assert_eq!(w.unclassified[0].soil_type, "Moon Dust");
    }

    #[test]
    fn test_unmapped_land_cover_marks_all_attributes() {
        let units = vec![unit("Parking Lot", "Sand", 2.0)];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        assert_eq!(w.curve_number, None);
        assert_eq!(w.manning_n, None);
        assert_eq!(w.retardance_coeff, None);
        assert_eq!(w.runoff_coeff(10), None);
        assert_eq!(w.unclassified.len(), 4);
    }

    #[test]
    fn test_zero_area_unit_is_ignored() {
        let units = vec![unit("Grassland", "Loam", 4.0), unit("Parking Lot", "Sand", 0.0)];
        let w = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap();
        assert!(w.is_complete());
        assert!((w.curve_number.unwrap() - 79.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_total_area() {
        let units = vec![unit("Grassland", "Loam", 0.0)];
        let err = aggregate(SubbasinId(1), &units, ClassificationTables::standard()).unwrap_err();
        assert!(matches!(err, HydroError::ZeroArea { subbasin: SubbasinId(1), .. }));

        let empty: Vec<LandSoilUnit> = Vec::new();
        assert!(matches!(
            aggregate(SubbasinId(1), &empty, ClassificationTables::standard()),
            Err(HydroError::ZeroArea { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_area_and_foreign_unit() {
        let units = vec![unit("Grassland", "Loam", -1.0)];
        assert!(aggregate(SubbasinId(1), &units, ClassificationTables::standard()).is_err());

        let units = vec![LandSoilUnit::new(2, "Grassland", "Loam", 1.0)];
        assert!(matches!(
            aggregate(SubbasinId(1), &units, ClassificationTables::standard()),
            Err(HydroError::InvalidInput { .. })
        ));
    }
}
