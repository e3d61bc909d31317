// crates/rh_hydrology/src/lookup/classes.rs

//! 分类值类型：水文土壤组与 CN 表项

use serde::{Deserialize, Serialize};
use std::fmt;

/// 水文土壤组 (HSG)
///
/// `Unknown` 对应源数据中的 `-`，表示土壤名称不在任何枚举集合中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hsg {
    /// 高入渗
    A,
    /// 中等入渗
    B,
    /// 低入渗
    C,
    /// 极低入渗
    D,
    /// 未分类
    #[serde(rename = "-")]
    Unknown,
}

impl fmt::Display for Hsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Unknown => "-",
        };
        f.write_str(s)
    }
}

/// 土地覆盖类别的 CN 表项
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveNumberEntry {
    /// 与土壤组无关的固定值（水体等）
    Fixed(f64),
    /// 按 HSG A/B/C/D 取值
    ByGroup {
        /// A 组
        a: f64,
        /// B 组
        b: f64,
        /// C 组
        c: f64,
        /// D 组
        d: f64,
    },
}

impl CurveNumberEntry {
    /// 按土壤组取 CN，`ByGroup` 遇到未知土壤组返回 `None`
    pub fn for_group(&self, hsg: Hsg) -> Option<f64> {
        match *self {
            Self::Fixed(cn) => Some(cn),
            Self::ByGroup { a, b, c, d } => match hsg {
                Hsg::A => Some(a),
                Hsg::B => Some(b),
                Hsg::C => Some(c),
                Hsg::D => Some(d),
                Hsg::Unknown => None,
            },
        }
    }

    pub(crate) fn values(&self) -> Vec<f64> {
        match *self {
            Self::Fixed(cn) => vec![cn],
            Self::ByGroup { a, b, c, d } => vec![a, b, c, d],
        }
    }
}
