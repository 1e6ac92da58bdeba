//! # 批量处理模块
//!
//! 提供多输入文件的并行处理能力。
//!
//! ## 功能
//! - 并行读取与归一化
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchResult, BatchRunner, ProcessResult};
