use std::path::Path;

/// 单个待润色的脚本
///
/// 由读取阶段创建：`filename` 为输入文件名（不含目录），
/// `content` 为已完成乱码修复的正文，创建后不再修改
#[derive(Debug, Clone)]
pub struct Scenario {
    /// 输入文件名
    pub filename: String,
    /// 脚本正文
    pub content: String,
}

impl Scenario {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// 输出 PDF 文件名：将输入文件的扩展名替换为 `.pdf`
    pub fn output_filename(&self) -> String {
        Path::new(&self.filename)
            .with_extension("pdf")
            .to_string_lossy()
            .into_owned()
    }
}
