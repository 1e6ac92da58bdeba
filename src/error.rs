//! # 统一错误处理模块
//!
//! 定义 cvplot 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// cvplot 统一错误类型
#[derive(Error, Debug)]
pub enum CvError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据格式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Required field '{field}' not found in {path}. Available columns: {available:?}")]
    SchemaError {
        path: String,
        field: String,
        available: Vec<String>,
    },

    #[error("Failed to parse {path} at line {line}\nReason: {reason}")]
    ParseError {
        path: String,
        line: u64,
        reason: String,
    },

    #[error("No finite (potential, current) samples in {path}")]
    EmptyScan { path: String },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("None of the {count} input files could be loaded")]
    NoScans { count: usize },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CvError>;
