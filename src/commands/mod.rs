//! # 命令执行模块
//!
//! 实现绘图流程的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `config.rs`, `parsers/`, `voltammetry/`, `utils/`
//! - 子模块: plot

pub mod plot;

use crate::config::PlotConfig;
use crate::error::Result;

/// 执行一次绘图运行
pub fn run(config: &PlotConfig) -> Result<()> {
    plot::execute(config)
}
