// crates/rh_hydrology/src/lookup/standard.rs

//! 内置分类表数据
//!
//! 土地覆盖类别名称按精确字符串匹配，`Brush/Shrubs` 与 `Brush-Shrubs`
//! 是两个不同的键；阻滞类别表沿用 `Marshland Swamp` 的写法。

use std::collections::{BTreeMap, HashMap};

use super::classes::{CurveNumberEntry, Hsg};
use super::ClassificationTables;
use crate::types::ReturnPeriod;

/// 阻滞类别名称
pub const CONCRETE: &str = "Concrete";
/// 阻滞类别名称
pub const CLOSELY_CLIPPED_SOD: &str = "Closely clipped sod";
/// 阻滞类别名称
pub const DENSE_BLUEGRASS_TURF: &str = "Dense bluegrass turf";

const RETARDANCE_CLASSES: &[(&str, &str)] = &[
    ("Built-up", CONCRETE),
    ("Inland Water", CONCRETE),
    ("Open Forest", CLOSELY_CLIPPED_SOD),
    ("Perennial Crop", DENSE_BLUEGRASS_TURF),
    ("Closed Forest", DENSE_BLUEGRASS_TURF),
    ("Brush/Shrubs", CLOSELY_CLIPPED_SOD),
    ("Grassland", CLOSELY_CLIPPED_SOD),
    ("Open/Barren", CONCRETE),
    ("Mangrove Forest", DENSE_BLUEGRASS_TURF),
    ("Annual Crop", DENSE_BLUEGRASS_TURF),
    ("Marshland Swamp", DENSE_BLUEGRASS_TURF),
    ("Fishpond", CONCRETE),
    ("Waterway", CONCRETE),
    ("Brush-Shrubs", CLOSELY_CLIPPED_SOD),
];

const RETARDANCE_COEFFICIENTS: &[(&str, f64)] = &[
    (CONCRETE, 0.012),
    (CLOSELY_CLIPPED_SOD, 0.046),
    (DENSE_BLUEGRASS_TURF, 0.06),
];

const RUNOFF_CODES: &[(&str, &str)] = &[
    ("Built-up", "AS"),
    ("Open/Barren", "GPF"),
    ("Grassland", "GPA"),
    ("Brush/Shrubs", "GFF"),
    ("Open Forest", "GGF"),
    ("Perennial Crop", "CLF"),
    ("Annual Crop", "PRF"),
    ("Mangrove Forest", "FWF"),
    ("Closed Forest", "FWA"),
    ("Inland Water", "Water"),
    ("Marshland/Swamp", "Water"),
    ("Fishpond", "Water"),
    ("Waterway", "Water"),
    ("Brush-Shrubs", "GFA"),
];

/// 表列对应的重现期
pub const TABULATED_RETURN_PERIODS: [ReturnPeriod; 8] = [2, 5, 10, 15, 25, 50, 100, 500];

const RUNOFF_COEFFICIENTS: &[(&str, [f64; 8])] = &[
    ("AS", [0.73, 0.77, 0.81, 0.83, 0.86, 0.90, 0.95, 1.00]),
    ("CN", [0.75, 0.80, 0.83, 0.85, 0.88, 0.92, 0.97, 1.00]),
    ("GPF", [0.32, 0.34, 0.37, 0.38, 0.40, 0.44, 0.47, 0.58]),
    ("GPA", [0.37, 0.40, 0.43, 0.44, 0.46, 0.49, 0.53, 0.61]),
    ("GPS", [0.40, 0.43, 0.45, 0.46, 0.49, 0.52, 0.55, 0.62]),
    ("GFF", [0.25, 0.28, 0.30, 0.31, 0.34, 0.37, 0.41, 0.53]),
    ("GFA", [0.33, 0.36, 0.38, 0.39, 0.42, 0.45, 0.49, 0.58]),
    ("GFS", [0.37, 0.40, 0.42, 0.43, 0.46, 0.49, 0.53, 0.60]),
    ("GGF", [0.21, 0.23, 0.25, 0.26, 0.29, 0.32, 0.36, 0.49]),
    ("GGA", [0.29, 0.32, 0.35, 0.36, 0.39, 0.42, 0.46, 0.56]),
    ("GGS", [0.34, 0.37, 0.40, 0.41, 0.44, 0.47, 0.51, 0.58]),
    ("CLF", [0.31, 0.34, 0.36, 0.37, 0.40, 0.43, 0.47, 0.57]),
    ("CLA", [0.35, 0.38, 0.41, 0.42, 0.44, 0.48, 0.51, 0.60]),
    ("CLS", [0.39, 0.42, 0.44, 0.45, 0.48, 0.51, 0.54, 0.61]),
    ("PRF", [0.25, 0.28, 0.30, 0.31, 0.34, 0.37, 0.41, 0.53]),
    ("PRA", [0.33, 0.36, 0.38, 0.39, 0.42, 0.45, 0.49, 0.58]),
    ("PRS", [0.37, 0.40, 0.42, 0.43, 0.46, 0.49, 0.53, 0.60]),
    ("FWF", [0.22, 0.25, 0.28, 0.29, 0.31, 0.35, 0.39, 0.48]),
    ("FWA", [0.31, 0.34, 0.36, 0.37, 0.40, 0.43, 0.47, 0.56]),
    ("FWS", [0.35, 0.39, 0.41, 0.42, 0.45, 0.48, 0.52, 0.58]),
    ("Water", [1.00; 8]),
];

const SOIL_GROUPS: &[(Hsg, &[&str])] = &[
    (Hsg::A, &["Sand", "Beach Sand", "Coarse Sand", "Fine Sand"]),
    (Hsg::B, &["Fine Sandy Loam", "Sandy Loam", "Loamy Sand", "Silt Loam"]),
    (
        Hsg::C,
        &[
            "Loam",
            "Clay Loam",
            "Silty Clay Loam",
            "Gravelly Clay Loam",
            "Gravelly Loam",
            "Gravelly Silt Loam",
            "Clay Loam Adobe",
            "Sandy Clay Loam",
        ],
    ),
    (
        Hsg::D,
        &[
            "Clay",
            "Hydrosol",
            "Gravelly Sandy Clay Loam",
            "Sandy Clay",
            "Filled up soil",
            "Mountainous Land",
            "Complex",
            "Undifferentiated",
            "Lava flow",
        ],
    ),
];

const MANNING_N: &[(&str, f64)] = &[
    ("Built-up", 0.014),
    ("Inland Water", 0.035),
    ("Open Forest", 0.035),
    ("Perennial Crop", 0.045),
    ("Closed Forest", 0.12),
    ("Brush/Shrubs", 0.05),
    ("Grassland", 0.03),
    ("Open/Barren", 0.02),
    ("Mangrove Forest", 0.035),
    ("Annual Crop", 0.045),
    ("Marshland/Swamp", 0.035),
    ("Fishpond", 0.035),
    ("Waterway", 0.035),
    ("Brush-Shrubs", 0.05),
];

const fn by_group(a: f64, b: f64, c: f64, d: f64) -> CurveNumberEntry {
    CurveNumberEntry::ByGroup { a, b, c, d }
}

const CURVE_NUMBERS: &[(&str, CurveNumberEntry)] = &[
    ("Built-up", by_group(98.0, 98.0, 98.0, 98.0)),
    ("Open Forest", by_group(36.0, 60.0, 73.0, 79.0)),
    ("Perennial Crop", by_group(72.0, 81.0, 88.0, 91.0)),
    ("Closed Forest", by_group(36.0, 60.0, 73.0, 79.0)),
    ("Brush/Shrubs", by_group(30.0, 58.0, 71.0, 78.0)),
    ("Grassland", by_group(49.0, 69.0, 79.0, 84.0)),
    ("Open/Barren", by_group(68.0, 79.0, 86.0, 89.0)),
    ("Annual Crop", by_group(77.0, 86.0, 91.0, 94.0)),
    ("Inland Water", CurveNumberEntry::Fixed(100.0)),
    ("Mangrove Forest", CurveNumberEntry::Fixed(100.0)),
    ("Marshland/Swamp", CurveNumberEntry::Fixed(100.0)),
    ("Fishpond", CurveNumberEntry::Fixed(100.0)),
    ("Waterway", CurveNumberEntry::Fixed(100.0)),
];

fn string_map<V: Clone>(pairs: &[(&str, V)]) -> HashMap<String, V> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// 构建内置分类表
pub fn build() -> ClassificationTables {
    let runoff_coefficients = RUNOFF_COEFFICIENTS
        .iter()
        .map(|(code, row)| {
            let by_rp: BTreeMap<ReturnPeriod, f64> = TABULATED_RETURN_PERIODS
                .iter()
                .copied()
                .zip(row.iter().copied())
                .collect();
            (code.to_string(), by_rp)
        })
        .collect();

    let soil_groups = SOIL_GROUPS
        .iter()
        .flat_map(|(hsg, names)| names.iter().map(move |name| (name.to_string(), *hsg)))
        .collect();

    ClassificationTables {
        retardance_classes: RETARDANCE_CLASSES
            .iter()
            .map(|(lc, class)| (lc.to_string(), class.to_string()))
            .collect(),
        retardance_coefficients: string_map(RETARDANCE_COEFFICIENTS),
        runoff_codes: RUNOFF_CODES
            .iter()
            .map(|(lc, code)| (lc.to_string(), code.to_string()))
            .collect(),
        runoff_coefficients,
        soil_groups,
        manning_n: string_map(MANNING_N),
        curve_numbers: string_map(CURVE_NUMBERS),
    }
}
