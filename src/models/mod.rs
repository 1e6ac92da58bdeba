//! # 数据模型模块
//!
//! 定义伏安扫描的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `voltammetry/` 和 `commands/` 使用
//! - 子模块: scan

pub mod scan;

pub use scan::{CurrentUnit, NormalizedScan, RawScan, Sample};
