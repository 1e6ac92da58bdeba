//! # 伏安叠加图命令实现
//!
//! 读取配置中的全部 CHI 导出文件，归一化后画到同一张图上。
//!
//! ## 流程
//! 1. 校验配置（失败则在读取任何文件之前终止）
//! 2. 并行解析与归一化（rayon）
//! 3. 打印汇总表格
//! 4. 可选导出归一化数据 (CSV)
//! 5. 输出图像 (PNG/SVG)
//!
//! 单个文件出错时跳过该文件并继续，结束时列出失败文件；
//! 全部失败则返回 `NoScans`，不生成图像。
//!
//! ## 依赖关系
//! - 使用 `config.rs` 的 PlotConfig
//! - 使用 `batch/` 模块进行并行处理
//! - 使用 `parsers/` 读取数据
//! - 使用 `voltammetry/` 模块进行归一化、作图与导出

use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::config::{NormalizationParameters, PlotConfig, SeriesSpec};
use crate::error::{CvError, Result};
use crate::parsers;
use crate::utils::output;
use crate::voltammetry::{self, palette, PlotSeries, PlotStyle};

use std::fs;
use std::path::{Path, PathBuf};

/// 一条已载入的曲线及其读取统计
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: PlotSeries,
    pub path: PathBuf,
    pub dropped_rows: usize,
}

/// 执行绘图
pub fn execute(config: &PlotConfig) -> Result<()> {
    output::print_header("Cyclic Voltammogram Overlay");

    config.validate()?;
    print_parameters(config);

    let batch = load_all(config)?;
    report_loading(&batch);

    if batch.loaded.is_empty() {
        return Err(CvError::NoScans {
            count: config.series.len(),
        });
    }

    print_scan_table(&batch.loaded);

    if let Some(dir) = &config.export_dir {
        export_all(&batch.loaded, dir)?;
    }

    let series: Vec<PlotSeries> = batch.loaded.iter().map(|l| l.series.clone()).collect();
    let style = PlotStyle::from_config(config);
    voltammetry::plot::render_overlay(&series, &style, &config.output)?;
    output::print_success(&format!("Plot saved to '{}'", config.output.display()));

    output::print_separator();
    output::print_done(&format!(
        "Plotted {} of {} scans ({}x{} px)",
        batch.loaded.len(),
        batch.total(),
        style.width,
        style.height
    ));

    Ok(())
}

/// 并行读取并归一化全部输入
pub fn load_all(config: &PlotConfig) -> Result<BatchResult<LoadedSeries>> {
    let items: Vec<(usize, &SeriesSpec)> = config.series.iter().enumerate().collect();
    let runner = BatchRunner::new(config.jobs);

    runner.run(&items, |(index, spec)| {
        match load_series(*index, spec, &config.normalization) {
            Ok(loaded) => ProcessResult::Success(loaded),
            Err(e) => ProcessResult::Failed(spec.path.display().to_string(), e.to_string()),
        }
    })
}

/// 读取并归一化单个文件
pub fn load_series(
    index: usize,
    spec: &SeriesSpec,
    params: &NormalizationParameters,
) -> Result<LoadedSeries> {
    let raw = parsers::parse_chi_file(&spec.path)?;
    let scan = voltammetry::normalize(&raw, params)?;

    Ok(LoadedSeries {
        series: PlotSeries {
            label: spec.label.clone(),
            color: spec.color.unwrap_or_else(|| palette::series_color(index)),
            scan,
        },
        path: spec.path.clone(),
        dropped_rows: raw.dropped_rows,
    })
}

fn print_parameters(config: &PlotConfig) {
    let params = &config.normalization;
    output::print_info(&format!("Input files: {}", config.series.len()));
    output::print_info(&format!(
        "Potential offset: {:.4} V, reference potential: {:.4} V",
        params.potential_offset_volts, params.reference_potential_volts
    ));
    match (params.compute_current_density, params.electrode_diameter_mm) {
        (true, Some(d)) => output::print_info(&format!(
            "Current density mode: electrode diameter {} mm, area {:.5} cm²",
            d,
            voltammetry::normalizer::electrode_area_cm2(d)
        )),
        _ => output::print_info("Current mode: raw current (A)"),
    }
}

fn report_loading(batch: &BatchResult<LoadedSeries>) {
    for loaded in &batch.loaded {
        if loaded.dropped_rows > 0 {
            output::print_warning(&format!(
                "{}: dropped {} rows with missing values",
                loaded.path.display(),
                loaded.dropped_rows
            ));
        }
    }

    if !batch.failures.is_empty() {
        output::print_warning(&format!("{} file(s) skipped:", batch.failed));
        for (path, err) in &batch.failures {
            output::print_error(&format!("  {}: {}", path, err));
        }
    }
}

fn export_all(loaded: &[LoadedSeries], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| CvError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(loaded.len());
    for l in loaded {
        let path = voltammetry::export::export_path(dir, &l.path);
        voltammetry::export::to_csv(&l.series.scan, &path)?;
        output::print_written("Data", &path.display().to_string());
        written.push(path);
    }
    Ok(written)
}

/// 打印扫描汇总表格
fn print_scan_table(loaded: &[LoadedSeries]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct ScanRow {
        #[tabled(rename = "Label")]
        label: String,
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Points")]
        points: usize,
        #[tabled(rename = "Dropped")]
        dropped: usize,
        #[tabled(rename = "E (V)")]
        potential: String,
        #[tabled(rename = "I")]
        current: String,
    }

    let fmt_range = |r: Option<(f64, f64)>, prec: usize| match r {
        Some((lo, hi)) => format!("{:.*} .. {:.*}", prec, lo, prec, hi),
        None => "-".to_string(),
    };

    let rows: Vec<ScanRow> = loaded
        .iter()
        .map(|l| {
            let scan = &l.series.scan;
            ScanRow {
                label: l.series.label.clone(),
                file: Path::new(&scan.source)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("?")
                    .to_string(),
                points: scan.len(),
                dropped: l.dropped_rows,
                potential: fmt_range(scan.potential_range(), 3),
                current: format!("{} {}", fmt_range(scan.current_range(), 4), scan.unit),
            }
        })
        .collect();

    output::print_header(&format!("Loaded {} Scans", rows.len()));
    println!("{}", Table::new(&rows));
}
