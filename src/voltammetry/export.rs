//! # 归一化数据导出
//!
//! 把归一化扫描写成两列 CSV，便于在其它软件中复现图像。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `csv` 写入，采样点经 `serde` 序列化

use crate::error::{CvError, Result};
use crate::models::NormalizedScan;

use std::path::{Path, PathBuf};

/// 导出文件名：`<stem>_normalized.csv`
pub fn export_path(dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    dir.join(format!("{}_normalized.csv", stem))
}

/// 导出归一化扫描为 CSV
pub fn to_csv(scan: &NormalizedScan, output_path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;

    wtr.write_record(["Potential/V", scan.unit.column_name()])?;

    for sample in &scan.samples {
        wtr.serialize(sample)?;
    }

    wtr.flush().map_err(|e| CvError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
