//! # 曲线配色
//!
//! tab10 调色板。
//!
//! ## 依赖关系
//! - 被 `voltammetry/plot.rs` 使用

/// tab10 调色板
pub const TAB10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// 第 `index` 条曲线的默认颜色，超过 10 条时循环
pub fn series_color(index: usize) -> (u8, u8, u8) {
    TAB10[index % TAB10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0), (0x1f, 0x77, 0xb4));
        assert_eq!(series_color(10), series_color(0));
        assert_eq!(series_color(13), series_color(3));
    }
}
