//! # CH Instruments CSV 导出解析器
//!
//! 解析电化学工作站导出的循环伏安数据文件。
//!
//! ## 格式说明
//! ```text
//! Nov. 14, 2023   10:21:33
//! Cyclic Voltammetry
//! File: FF015CVa.bin
//! Init E (V) = 0.2
//! ...
//! Potential/V, Current/A
//!
//! 0.200, -1.431e-6
//! 0.199, -1.402e-6
//! ```
//!
//! 分两步解析：
//! 1. 按字面子串定位表头行 (`Potential/V, Current/A`)
//! 2. 表头及其后的非空行交给 `csv` 读取，按列名取值
//!
//! 空白单元格视为缺失值，整行丢弃并计入 `dropped_rows`。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/scan.rs`
//! - 使用 `csv` 读取分隔数据

use crate::error::{CvError, Result};
use crate::models::{RawScan, Sample};
use std::fs;
use std::path::Path;

/// 表头行标记
pub const HEADER_MARKER: &str = "Potential/V, Current/A";

/// 电位列名
pub const POTENTIAL_COLUMN: &str = "Potential/V";

/// 电流列名
pub const CURRENT_COLUMN: &str = "Current/A";

/// 解析 CHI 导出文件
pub fn parse_chi_file(path: &Path) -> Result<RawScan> {
    if !path.is_file() {
        return Err(CvError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| CvError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_chi_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 CHI 导出格式
pub fn parse_chi_content(content: &str, source: &str) -> Result<RawScan> {
    let lines: Vec<&str> = content.lines().collect();

    let header_idx = locate_header(&lines).ok_or_else(|| missing_header_error(content, source))?;

    // (原文件行号, 行内容)，跳过空行
    let body: Vec<(u64, &str)> = lines[header_idx..]
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| ((header_idx + i + 1) as u64, *line))
        .collect();

    let text = body
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let potential_idx = find_column(&headers, POTENTIAL_COLUMN)
        .ok_or_else(|| schema_error(source, POTENTIAL_COLUMN, &headers))?;
    let current_idx = find_column(&headers, CURRENT_COLUMN)
        .ok_or_else(|| schema_error(source, CURRENT_COLUMN, &headers))?;

    let mut samples = Vec::new();
    let mut dropped_rows = 0;

    for record in reader.records() {
        let record = record?;

        let line = record
            .position()
            .and_then(|p| body.get(p.line().saturating_sub(1) as usize))
            .map(|(n, _)| *n)
            .unwrap_or(0);

        let potential = parse_cell(record.get(potential_idx), source, line)?;
        let current = parse_cell(record.get(current_idx), source, line)?;

        match (potential, current) {
            (Some(p), Some(c)) if p.is_finite() && c.is_finite() => {
                samples.push(Sample::new(p, c));
            }
            _ => dropped_rows += 1,
        }
    }

    Ok(RawScan {
        source: source.to_string(),
        samples,
        dropped_rows,
    })
}

/// 定位表头行索引
pub fn locate_header(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| line.contains(HEADER_MARKER))
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// 解析单元格；空白视为缺失
fn parse_cell(cell: Option<&str>, source: &str, line: u64) -> Result<Option<f64>> {
    let cell = match cell.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(c) => c,
    };

    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| CvError::ParseError {
            path: source.to_string(),
            line,
            reason: format!("'{}' is not a number", cell),
        })
}

fn schema_error(source: &str, field: &str, headers: &[String]) -> CvError {
    CvError::SchemaError {
        path: source.to_string(),
        field: field.to_string(),
        available: headers.to_vec(),
    }
}

/// 找不到表头行时，尽量指出缺少的具体列名
fn missing_header_error(content: &str, source: &str) -> CvError {
    let field = if !content.contains(POTENTIAL_COLUMN) {
        POTENTIAL_COLUMN
    } else if !content.contains(CURRENT_COLUMN) {
        CURRENT_COLUMN
    } else {
        HEADER_MARKER
    };
    schema_error(source, field, &[])
}
