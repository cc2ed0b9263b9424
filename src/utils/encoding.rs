//! 乱码修复工具
//!
//! 输入脚本曾被以 Windows-1252 视角误解码过一次 UTF-8 文本，
//! 产生固定的多字符乱码序列。此模块在脚本载入时将这些序列
//! 还原为原本的单个字符。

/// 乱码序列与还原字符的对照表
///
/// 按声明顺序依次替换。`â€` 是其余序列的公共前缀，必须排在最后。
const GARBLED_SEQUENCES: &[(&str, &str)] = &[
    ("â€“", "–"),
    ("â€¦", "…"),
    ("â€˜", "‘"),
    ("â€™", "’"),
    ("â€œ", "“"),
    ("â€¢", "•"),
    ("â€", "”"),
];

/// 修复文本中已知的乱码序列
///
/// # 参数
/// - `text`: 原始脚本文本
///
/// # 返回
/// 返回替换完成的文本；不含乱码的文本原样返回
pub fn fix_garbled_symbols(text: &str) -> String {
    let mut fixed = text.to_string();
    for &(garbled, replacement) in GARBLED_SEQUENCES {
        fixed = fixed.replace(garbled, replacement);
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_sequence_is_repaired() {
        for &(garbled, replacement) in GARBLED_SEQUENCES {
            assert_eq!(fix_garbled_symbols(garbled), replacement);
        }
    }

    /// 左引号的乱码以 `â€` 开头，必须在裸 `â€` 之前被替换
    #[test]
    fn test_longer_sequences_win_over_prefix() {
        assert_eq!(fix_garbled_symbols("â€œquoteâ€"), "“quote”");
        assert_eq!(fix_garbled_symbols("heâ€™s â€“ waiting"), "he’s – waiting");
    }

    #[test]
    fn test_repair_is_idempotent() {
        let raw = "â€œHello â€“ worldâ€¦â€";
        let once = fix_garbled_symbols(raw);
        let twice = fix_garbled_symbols(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_text_passes_through() {
        let clean = "Hello, “world” – nothing to fix…";
        assert_eq!(fix_garbled_symbols(clean), clean);
    }
}
