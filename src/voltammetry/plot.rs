//! # 伏安曲线叠加图
//!
//! 使用 `plotters` 库把多条归一化扫描画在同一坐标系中。
//!
//! ## 功能
//! - 白底无网格，绘图区黑色外框
//! - 每个输入文件一条曲线，附图例
//! - 字号与线宽按 pt 给出，经 DPI 换算为像素
//! - 按扩展名选择 PNG/JPEG/BMP 或 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/scan.rs` 的 NormalizedScan
//! - 使用 `plotters` 渲染图表

use crate::config::PlotConfig;
use crate::error::{CvError, Result};
use crate::models::NormalizedScan;

use plotters::prelude::*;
use std::path::Path;

// seaborn "paper" 上下文（notebook 字号 × 0.8）再乘 font_scale 1.5
/// 坐标轴标题字号 (pt)
const AXIS_LABEL_PT: f64 = 14.4;
/// 刻度字号 (pt)
const TICK_LABEL_PT: f64 = 13.2;
/// 图例字号 (pt)
const LEGEND_PT: f64 = 12.0;
/// 曲线线宽 (pt)
const LINE_WIDTH_PT: f64 = 1.0;
/// 外框线宽 (pt)
const FRAME_WIDTH_PT: f64 = 0.8;
/// 坐标范围两侧留白比例
const AXIS_PADDING: f64 = 0.05;

/// 输出图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG / JPEG / BMP
    Bitmap,
    Svg,
}

impl ImageFormat {
    /// 从文件扩展名推断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("png") | Some("jpg") | Some("jpeg") | Some("bmp") => Some(ImageFormat::Bitmap),
            Some("svg") => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

/// 一条待绘制的曲线
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub color: (u8, u8, u8),
    pub scan: NormalizedScan,
}

/// 图像外观
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub x_label: String,
    pub y_label: String,
}

impl PlotStyle {
    pub fn from_config(config: &PlotConfig) -> Self {
        let (width, height) = config.pixel_size();
        PlotStyle {
            width,
            height,
            dpi: config.dpi,
            x_label: config.x_label.clone(),
            y_label: config.y_label().to_string(),
        }
    }

    /// pt → 像素
    fn px(&self, points: f64) -> u32 {
        ((points * self.dpi as f64 / 72.0).round() as u32).max(1)
    }
}

/// 渲染叠加图
pub fn render_overlay(series: &[PlotSeries], style: &PlotStyle, output_path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(output_path).ok_or_else(|| {
        CvError::ConfigError(format!(
            "unsupported output image format: '{}'",
            output_path.display()
        ))
    })?;

    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
            draw_overlay(&root, series, style)?;
            root.present()
                .map_err(|e| CvError::PlotError(e.to_string()))?;
        }
        ImageFormat::Bitmap => {
            let root =
                BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
            draw_overlay(&root, series, style)?;
            root.present()
                .map_err(|e| CvError::PlotError(e.to_string()))?;
        }
    }

    Ok(())
}

/// 所有曲线的坐标范围（含留白）
pub fn axis_bounds(series: &[PlotSeries]) -> Option<((f64, f64), (f64, f64))> {
    let mut x: Option<(f64, f64)> = None;
    let mut y: Option<(f64, f64)> = None;

    for s in series.iter().filter(|s| !s.scan.is_empty()) {
        if let Some(r) = s.scan.potential_range() {
            x = Some(merge_range(x, r));
        }
        if let Some(r) = s.scan.current_range() {
            y = Some(merge_range(y, r));
        }
    }

    Some((pad_range(x?), pad_range(y?)))
}

fn merge_range(acc: Option<(f64, f64)>, r: (f64, f64)) -> (f64, f64) {
    match acc {
        None => r,
        Some((lo, hi)) => (lo.min(r.0), hi.max(r.1)),
    }
}

fn pad_range((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * AXIS_PADDING, hi + span * AXIS_PADDING)
    } else {
        // 单点或常数曲线
        let pad = (lo.abs() * AXIS_PADDING).max(1e-12);
        (lo - pad, hi + pad)
    }
}

/// 绘制叠加图的核心逻辑
fn draw_overlay<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[PlotSeries],
    style: &PlotStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| CvError::PlotError(format!("{:?}", e)))?;

    let ((x_min, x_max), (y_min, y_max)) =
        axis_bounds(series).ok_or_else(|| CvError::PlotError("no samples to plot".to_string()))?;

    let axis_label_px = style.px(AXIS_LABEL_PT);
    let tick_px = style.px(TICK_LABEL_PT);
    let legend_px = style.px(LEGEND_PT);
    let line_px = style.px(LINE_WIDTH_PT);
    let frame_px = style.px(FRAME_WIDTH_PT);

    let mut chart = ChartBuilder::on(root)
        .margin(style.px(12.0))
        .x_label_area_size(style.px(40.0))
        .y_label_area_size(style.px(64.0))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| CvError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .x_label_style(("sans-serif", tick_px))
        .y_label_style(("sans-serif", tick_px))
        .axis_desc_style(("sans-serif", axis_label_px))
        .axis_style(BLACK.stroke_width(frame_px))
        .draw()
        .map_err(|e| CvError::PlotError(format!("{:?}", e)))?;

    let legend_len = (legend_px * 2) as i32;

    for s in series {
        let color = RGBColor(s.color.0, s.color.1, s.color.2);
        chart
            .draw_series(LineSeries::new(
                s.scan.samples.iter().map(|p| (p.potential, p.current)),
                color.stroke_width(line_px),
            ))
            .map_err(|e| CvError::PlotError(format!("{:?}", e)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(line_px))
            });
    }

    // 黑色外框
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x_min, y_min), (x_max, y_max)],
            BLACK.stroke_width(frame_px),
        )))
        .map_err(|e| CvError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(style.px(6.0))
        .legend_area_size(legend_len as u32 + style.px(4.0))
        .label_font(("sans-serif", legend_px))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| CvError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentUnit, Sample};

    fn series(samples: Vec<Sample>) -> PlotSeries {
        PlotSeries {
            label: "CV".to_string(),
            color: (0, 0, 0),
            scan: NormalizedScan {
                source: "mem".to_string(),
                samples,
                unit: CurrentUnit::Amps,
            },
        }
    }

    #[test]
    fn test_image_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out.png")),
            Some(ImageFormat::Bitmap)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("out.JPG")),
            Some(ImageFormat::Bitmap)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("figs/out.svg")),
            Some(ImageFormat::Svg)
        );
        assert_eq!(ImageFormat::from_path(Path::new("out.pdf")), None);
        assert_eq!(ImageFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_axis_bounds_union_with_padding() {
        let a = series(vec![Sample::new(0.0, -1.0), Sample::new(1.0, 1.0)]);
        let b = series(vec![Sample::new(-1.0, 0.0), Sample::new(0.5, 3.0)]);

        let ((x0, x1), (y0, y1)) = axis_bounds(&[a, b]).unwrap();
        assert!((x0 - -1.1).abs() < 1e-12);
        assert!((x1 - 1.1).abs() < 1e-12);
        assert!((y0 - -1.2).abs() < 1e-12);
        assert!((y1 - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_axis_bounds_degenerate() {
        let s = series(vec![Sample::new(0.5, 2.0)]);
        let ((x0, x1), (y0, y1)) = axis_bounds(&[s]).unwrap();
        assert!(x0 < 0.5 && x1 > 0.5);
        assert!(y0 < 2.0 && y1 > 2.0);
    }

    #[test]
    fn test_axis_bounds_empty() {
        assert!(axis_bounds(&[]).is_none());
    }

    #[test]
    fn test_points_to_pixels() {
        let style = PlotStyle {
            width: 6000,
            height: 3600,
            dpi: 600,
            x_label: String::new(),
            y_label: String::new(),
        };
        assert_eq!(style.px(12.0), 100);
        assert_eq!(style.px(0.01), 1);
    }

    fn small_style() -> PlotStyle {
        PlotStyle {
            width: 640,
            height: 384,
            dpi: 64,
            x_label: "Potential (V)".to_string(),
            y_label: CurrentUnit::Amps.axis_label().to_string(),
        }
    }

    fn two_curves() -> Vec<PlotSeries> {
        let forward: Vec<Sample> = (0..50)
            .map(|i| Sample::new(i as f64 * 0.01, (i as f64 * 0.2).sin() * 1e-6))
            .collect();
        let mut second = series(forward.iter().rev().copied().collect());
        second.label = "CV 2".to_string();
        second.color = (255, 127, 14);
        vec![series(forward), second]
    }

    #[test]
    fn test_render_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["overlay.png", "overlay.svg"] {
            let out = dir.path().join(name);
            render_overlay(&two_curves(), &small_style(), &out).unwrap();
            let size = std::fs::metadata(&out).unwrap().len();
            assert!(size > 0, "{} is empty", name);
        }
    }

    #[test]
    fn test_render_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("overlay.pdf");
        assert!(matches!(
            render_overlay(&two_curves(), &small_style(), &out),
            Err(CvError::ConfigError(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_render_without_samples() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("overlay.svg");
        let empty = series(vec![]);
        assert!(matches!(
            render_overlay(&[empty], &small_style(), &out),
            Err(CvError::PlotError(_))
        ));
    }
}
