//! 脚本处理上下文
//!
//! 封装"我正在处理第几个脚本、它叫什么"这一信息

use std::fmt::Display;

/// 脚本处理上下文
#[derive(Debug, Clone)]
pub struct ScriptCtx {
    /// 脚本序号（从1开始，仅用于日志显示）
    pub script_index: usize,

    /// 输入文件名
    pub filename: String,
}

impl ScriptCtx {
    /// 创建新的脚本上下文
    pub fn new(script_index: usize, filename: impl Into<String>) -> Self {
        Self {
            script_index,
            filename: filename.into(),
        }
    }
}

impl Display for ScriptCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[脚本 {} 文件#{}]", self.script_index, self.filename)
    }
}
