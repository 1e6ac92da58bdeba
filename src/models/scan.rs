//! # 伏安扫描数据模型
//!
//! 原始扫描 (RawScan) 与归一化扫描 (NormalizedScan)。
//! 两者均按扫描顺序保存采样点，顺序即伏安实验的扫描方向。
//!
//! ## 依赖关系
//! - 被 `parsers/chi.rs` 构造
//! - 被 `voltammetry/` 模块使用

use serde::Serialize;

/// 单个 (电位, 电流) 采样点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// 电位 (V)
    pub potential: f64,
    /// 电流 (A，或归一化后的单位)
    pub current: f64,
}

impl Sample {
    pub fn new(potential: f64, current: f64) -> Self {
        Sample { potential, current }
    }

    /// 两个通道均为有限实数
    pub fn is_finite(&self) -> bool {
        self.potential.is_finite() && self.current.is_finite()
    }
}

/// 电流通道的单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentUnit {
    /// 安培
    Amps,
    /// 毫安每平方厘米
    MilliampsPerSquareCentimetre,
}

impl CurrentUnit {
    /// 坐标轴标签
    pub fn axis_label(&self) -> &'static str {
        match self {
            CurrentUnit::Amps => "Current (A)",
            CurrentUnit::MilliampsPerSquareCentimetre => "Current Density (mA cm⁻²)",
        }
    }

    /// 导出 CSV 的列名
    pub fn column_name(&self) -> &'static str {
        match self {
            CurrentUnit::Amps => "Current/A",
            CurrentUnit::MilliampsPerSquareCentimetre => "CurrentDensity/mA cm-2",
        }
    }
}

impl std::fmt::Display for CurrentUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentUnit::Amps => write!(f, "A"),
            CurrentUnit::MilliampsPerSquareCentimetre => write!(f, "mA/cm²"),
        }
    }
}

/// 从仪器导出文件解析得到的原始扫描
#[derive(Debug, Clone)]
pub struct RawScan {
    /// 数据来源（通常为文件路径）
    pub source: String,

    /// 采样点，电位 V / 电流 A
    pub samples: Vec<Sample>,

    /// 因缺失值被丢弃的数据行数
    pub dropped_rows: usize,
}

#[cfg(test)]
impl RawScan {
    pub fn new(source: impl Into<String>, samples: Vec<Sample>) -> Self {
        RawScan {
            source: source.into(),
            samples,
            dropped_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// 归一化后的扫描
#[derive(Debug, Clone)]
pub struct NormalizedScan {
    pub source: String,
    pub samples: Vec<Sample>,
    pub unit: CurrentUnit,
}

impl NormalizedScan {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 电位范围 (min, max)
    pub fn potential_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples.iter().map(|s| s.potential))
    }

    /// 电流范围 (min, max)
    pub fn current_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples.iter().map(|s| s.current))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        let scan = NormalizedScan {
            source: "mem".to_string(),
            samples: vec![
                Sample::new(0.2, -1.0),
                Sample::new(-0.4, 3.0),
                Sample::new(0.8, 0.5),
            ],
            unit: CurrentUnit::Amps,
        };
        assert_eq!(scan.potential_range(), Some((-0.4, 0.8)));
        assert_eq!(scan.current_range(), Some((-1.0, 3.0)));
    }

    #[test]
    fn test_empty_ranges() {
        let scan = NormalizedScan {
            source: "mem".to_string(),
            samples: vec![],
            unit: CurrentUnit::Amps,
        };
        assert!(scan.is_empty());
        assert_eq!(scan.potential_range(), None);
    }

    #[test]
    fn test_sample_finite() {
        assert!(Sample::new(0.1, 1e-6).is_finite());
        assert!(!Sample::new(f64::NAN, 1e-6).is_finite());
        assert!(!Sample::new(0.1, f64::INFINITY).is_finite());
    }
}
