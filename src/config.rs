//! # 运行配置
//!
//! 一次运行的全部参数：输入文件、单位换算参数、图像外观与输出路径。
//! 默认值来自本模块的常量，`main.rs` 直接使用 `PlotConfig::default()`。
//!
//! ## 依赖关系
//! - 被 `main.rs`, `commands/plot.rs`, `voltammetry/` 使用
//! - 使用 `voltammetry/plot.rs` 的 ImageFormat 判断输出格式

use crate::error::{CvError, Result};
use crate::models::CurrentUnit;
use crate::voltammetry::normalizer::electrode_area_cm2;
use crate::voltammetry::plot::ImageFormat;

use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 默认参数
// ─────────────────────────────────────────────────────────────

/// 标准氧化电位 (V)
pub const STD_OXIDATION_POTENTIAL: f64 = 0.0;

/// 标准还原电位 (V)
pub const STD_REDUCTION_POTENTIAL: f64 = 0.0;

/// 二茂铁参比电位 (V vs. Ag/Ag⁺)
pub const FERROCENE_POTENTIAL: f64 = 0.0;

/// 工作电极直径 (mm)
pub const ELECTRODE_DIAMETER_MM: f64 = 3.0;

/// 是否换算为电流密度
pub const COMPUTE_CURRENT_DENSITY: bool = true;

/// 横轴标签
pub const X_LABEL: &str = "Potential (V vs Ag/Ag⁺)";

/// 图像尺寸 (英寸)
pub const FIGURE_SIZE_IN: (f64, f64) = (10.0, 6.0);

/// 输出分辨率
pub const DPI: u32 = 600;

/// 输出图像路径
pub const OUTPUT_PATH: &str = "example.png";

/// 输入文件、图例标签与线条颜色（None 取 tab10 调色板）
pub const INPUT_FILES: &[(&str, &str, Option<(u8, u8, u8)>)] =
    &[("example_data/FF015CVa.csv", "CV", None)];

/// 归一化数据的 CSV 导出目录（None 不导出）
pub const EXPORT_DIR: Option<&str> = None;

/// 并行作业数（0 = 自动检测 CPU 核心数）
pub const JOBS: usize = 0;

/// 输出图像单边像素上限
pub const MAX_PIXEL_SIDE: u32 = 32_768;

// ─────────────────────────────────────────────────────────────
// 归一化参数
// ─────────────────────────────────────────────────────────────

/// 电位/电流换算参数
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationParameters {
    /// 电位偏移 (V)，通常为标准氧化/还原电位的中点
    pub potential_offset_volts: f64,

    /// 参比电位 (V)，如二茂铁
    pub reference_potential_volts: f64,

    /// 是否换算为电流密度
    pub compute_current_density: bool,

    /// 电极直径 (mm)，电流密度模式下必需
    pub electrode_diameter_mm: Option<f64>,
}

impl NormalizationParameters {
    /// 标准氧化/还原电位的中点
    pub fn offset_from_standards(std_oxidation: f64, std_reduction: f64) -> f64 {
        (std_reduction + std_oxidation) / 2.0
    }

    /// 校验参数
    pub fn validate(&self) -> Result<()> {
        if !self.potential_offset_volts.is_finite() {
            return Err(CvError::ConfigError(format!(
                "potential offset must be finite, got {}",
                self.potential_offset_volts
            )));
        }
        if !self.reference_potential_volts.is_finite() {
            return Err(CvError::ConfigError(format!(
                "reference potential must be finite, got {}",
                self.reference_potential_volts
            )));
        }

        match self.electrode_diameter_mm {
            Some(d) if !(d.is_finite() && d > 0.0) => Err(CvError::ConfigError(format!(
                "electrode diameter must be a positive number of millimetres, got {}",
                d
            ))),
            Some(d) if !electrode_area_cm2(d).is_normal() => Err(CvError::ConfigError(format!(
                "electrode diameter {} mm gives no usable electrode area",
                d
            ))),
            None if self.compute_current_density => Err(CvError::ConfigError(
                "current density requested but no electrode diameter was given".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// 归一化后电流通道的单位
    pub fn current_unit(&self) -> CurrentUnit {
        if self.compute_current_density {
            CurrentUnit::MilliampsPerSquareCentimetre
        } else {
            CurrentUnit::Amps
        }
    }
}

impl Default for NormalizationParameters {
    fn default() -> Self {
        NormalizationParameters {
            potential_offset_volts: Self::offset_from_standards(
                STD_OXIDATION_POTENTIAL,
                STD_REDUCTION_POTENTIAL,
            ),
            reference_potential_volts: FERROCENE_POTENTIAL,
            compute_current_density: COMPUTE_CURRENT_DENSITY,
            electrode_diameter_mm: Some(ELECTRODE_DIAMETER_MM),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 曲线与图像配置
// ─────────────────────────────────────────────────────────────

/// 单条曲线：输入文件、图例标签与线条颜色
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub path: PathBuf,
    pub label: String,
    /// 未指定时按序号取 tab10 调色板
    pub color: Option<(u8, u8, u8)>,
}

impl SeriesSpec {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        SeriesSpec {
            path: path.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: (u8, u8, u8)) -> Self {
        self.color = Some(color);
        self
    }
}

/// 一次绘图运行的完整配置
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub series: Vec<SeriesSpec>,
    pub normalization: NormalizationParameters,
    pub output: PathBuf,
    pub figure_size_in: (f64, f64),
    pub dpi: u32,
    pub x_label: String,
    /// 归一化数据的 CSV 导出目录
    pub export_dir: Option<PathBuf>,
    /// 并行作业数（0 = 自动检测 CPU 核心数）
    pub jobs: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            series: INPUT_FILES
                .iter()
                .map(|(path, label, color)| {
                    let spec = SeriesSpec::new(*path, *label);
                    match color {
                        Some(c) => spec.with_color(*c),
                        None => spec,
                    }
                })
                .collect(),
            normalization: NormalizationParameters::default(),
            output: PathBuf::from(OUTPUT_PATH),
            figure_size_in: FIGURE_SIZE_IN,
            dpi: DPI,
            x_label: X_LABEL.to_string(),
            export_dir: EXPORT_DIR.map(PathBuf::from),
            jobs: JOBS,
        }
    }
}

impl PlotConfig {
    /// 校验配置；在读取任何输入文件之前调用
    pub fn validate(&self) -> Result<()> {
        self.normalization.validate()?;

        if self.series.is_empty() {
            return Err(CvError::ConfigError("no input files configured".to_string()));
        }

        if let Some(spec) = self.series.iter().find(|s| s.label.trim().is_empty()) {
            return Err(CvError::ConfigError(format!(
                "empty legend label for '{}'",
                spec.path.display()
            )));
        }

        let (w, h) = self.figure_size_in;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(CvError::ConfigError(format!(
                "figure size must be positive, got {} x {}",
                w, h
            )));
        }

        if self.dpi == 0 {
            return Err(CvError::ConfigError("dpi must be positive".to_string()));
        }

        let dpi = self.dpi as f64;
        let limit = MAX_PIXEL_SIDE as f64;
        if (w * dpi).round() > limit || (h * dpi).round() > limit {
            return Err(CvError::ConfigError(format!(
                "image of {} x {} in at {} dpi exceeds {} px per side",
                w, h, self.dpi, MAX_PIXEL_SIDE
            )));
        }

        if ImageFormat::from_path(&self.output).is_none() {
            return Err(CvError::ConfigError(format!(
                "unsupported output image format: '{}' (expected .png, .jpg, .bmp or .svg)",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// 图像像素尺寸 = 英寸 × DPI
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size_in;
        let dpi = self.dpi as f64;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// 纵轴标签
    pub fn y_label(&self) -> &'static str {
        self.normalization.current_unit().axis_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.series.len(), 1);
        assert_eq!(config.series[0].label, "CV");
        assert_eq!(config.pixel_size(), (6000, 3600));
    }

    #[test]
    fn test_offset_from_standards() {
        let offset = NormalizationParameters::offset_from_standards(0.30, 0.10);
        assert!((offset - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_density_without_diameter() {
        let params = NormalizationParameters {
            electrode_diameter_mm: None,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(CvError::ConfigError(_))));
    }

    #[test]
    fn test_non_positive_diameter() {
        for d in [0.0, -3.0, f64::NAN] {
            let params = NormalizationParameters {
                electrode_diameter_mm: Some(d),
                ..Default::default()
            };
            assert!(matches!(params.validate(), Err(CvError::ConfigError(_))));
        }
    }

    #[test]
    fn test_current_mode_without_diameter() {
        let params = NormalizationParameters {
            compute_current_density: false,
            electrode_diameter_mm: None,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.current_unit(), CurrentUnit::Amps);
    }

    #[test]
    fn test_oversized_image_rejected() {
        let config = PlotConfig {
            figure_size_in: (1e12, 6.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CvError::ConfigError(_))));

        let config = PlotConfig {
            dpi: 10_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CvError::ConfigError(_))));
    }

    #[test]
    fn test_vanishing_area_rejected() {
        let params = NormalizationParameters {
            electrode_diameter_mm: Some(1e-200),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(CvError::ConfigError(_))));
    }

    #[test]
    fn test_defaults_follow_constants() {
        let config = PlotConfig::default();
        assert_eq!(config.jobs, JOBS);
        assert_eq!(config.export_dir, EXPORT_DIR.map(PathBuf::from));
        assert_eq!(config.series.len(), INPUT_FILES.len());
        assert_eq!(config.series[0].color, INPUT_FILES[0].2);
    }

    #[test]
    fn test_unsupported_output_format() {
        let config = PlotConfig {
            output: PathBuf::from("plot.pdf"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CvError::ConfigError(_))));
    }

    #[test]
    fn test_empty_series_and_label() {
        let config = PlotConfig {
            series: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlotConfig {
            series: vec![SeriesSpec::new("a.csv", " ")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_y_label_follows_unit() {
        let mut config = PlotConfig::default();
        assert_eq!(config.y_label(), "Current Density (mA cm⁻²)");
        config.normalization.compute_current_density = false;
        assert_eq!(config.y_label(), "Current (A)");
    }
}
