//! # 伏安数据归一化
//!
//! 对每个采样点依次执行：
//! 1. 电位扣除偏移与参比电位
//! 2. （可选）电流除以电极面积，换算为 mA/cm²
//! 3. 电流取反，符合作图约定
//!
//! 纯函数，不修改输入。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/scan.rs`, `config.rs`

use crate::config::NormalizationParameters;
use crate::error::{CvError, Result};
use crate::models::{NormalizedScan, RawScan, Sample};

use std::f64::consts::PI;

/// A/cm² → mA/cm²
const AMPS_TO_MILLIAMPS: f64 = 1000.0;

/// 电极面积 (cm²)，由直径 (mm) 计算
pub fn electrode_area_cm2(diameter_mm: f64) -> f64 {
    // 直径 mm → 半径 cm
    let radius_cm = diameter_mm / 20.0;
    PI * radius_cm * radius_cm
}

/// 电流取反
pub fn invert_current(value: f64) -> f64 {
    -value
}

/// 归一化一条原始扫描
pub fn normalize(raw: &RawScan, params: &NormalizationParameters) -> Result<NormalizedScan> {
    params.validate()?;

    let area = if params.compute_current_density {
        let diameter = params.electrode_diameter_mm.ok_or_else(|| {
            CvError::ConfigError("electrode diameter is required for current density".to_string())
        })?;
        Some(electrode_area_cm2(diameter))
    } else {
        None
    };

    let samples: Vec<Sample> = raw
        .samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|s| {
            let potential =
                s.potential - params.potential_offset_volts - params.reference_potential_volts;
            let current = match area {
                Some(a) => s.current / a * AMPS_TO_MILLIAMPS,
                None => s.current,
            };
            Sample::new(potential, invert_current(current))
        })
        // 换算后溢出的点同样丢弃
        .filter(|s| s.is_finite())
        .collect();

    if samples.is_empty() {
        return Err(CvError::EmptyScan {
            path: raw.source.clone(),
        });
    }

    Ok(NormalizedScan {
        source: raw.source.clone(),
        samples,
        unit: params.current_unit(),
    })
}
