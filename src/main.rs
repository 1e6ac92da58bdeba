//! # cvplot - 循环伏安曲线叠加作图
//!
//! 读取 CH Instruments 电化学工作站导出的 CSV 数据，
//! 做电位偏移、电流密度换算与符号翻转后，绘制多文件叠加图。
//!
//! 运行参数全部在 `config.rs` 中给出。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── config.rs   (运行配置)
//!   ├── commands/   (绘图流程)
//!   │     ├── batch/       (并行读取)
//!   │     ├── parsers/     (CHI 导出解析)
//!   │     ├── voltammetry/ (归一化、作图、导出)
//!   │     └── models/      (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod commands;
mod config;
mod error;
mod models;
mod parsers;
mod utils;
mod voltammetry;

use config::PlotConfig;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = PlotConfig::default();

    if let Err(e) = commands::run(&config) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
