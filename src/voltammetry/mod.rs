//! # 循环伏安处理模块
//!
//! 归一化、配色、作图与数据导出。
//!
//! ## 子模块
//! - `normalizer`: 电位偏移、电流密度换算与符号翻转
//! - `palette`: 曲线默认配色
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `models/scan.rs`

pub mod export;
pub mod normalizer;
pub mod palette;
pub mod plot;

pub use normalizer::normalize;
pub use plot::{PlotSeries, PlotStyle};
