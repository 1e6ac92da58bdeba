//! # 解析器模块
//!
//! 提供电化学工作站导出数据的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: chi

pub mod chi;

pub use chi::parse_chi_file;
