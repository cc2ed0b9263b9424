//! 脚本处理流程 - 流程层
//!
//! 核心职责：定义"一个脚本"的完整处理流程
//!
//! 流程顺序：
//! 1. 调用改写服务润色全文
//! 2. 将润色结果渲染为 PDF 写入输出目录
//!
//! 任一步骤失败即为该脚本的终态失败，不影响其他脚本

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::Rewriter;
use crate::error::ScriptError;
use crate::models::Scenario;
use crate::services::PdfRenderer;
use crate::utils::logging::truncate_text;
use crate::workflow::script_ctx::ScriptCtx;

/// 脚本处理流程
///
/// - 编排单个脚本的润色与渲染
/// - 不持有批次状态
/// - 只依赖业务能力（Rewriter / PdfRenderer）
pub struct ScriptFlow {
    rewriter: Arc<dyn Rewriter>,
    renderer: PdfRenderer,
}

impl ScriptFlow {
    /// 创建新的脚本处理流程
    pub fn new(rewriter: Arc<dyn Rewriter>, renderer: PdfRenderer) -> Self {
        Self { rewriter, renderer }
    }

    pub async fn run(&self, scenario: &Scenario, ctx: &ScriptCtx) -> Result<PathBuf, ScriptError> {
        info!("{} 开始处理", ctx);
        debug!(
            "[脚本 {}] 原文预览: {}",
            ctx.script_index,
            truncate_text(&scenario.content, 80)
        );

        // ========== 步骤 1: 远程润色 ==========
        info!("[脚本 {}] 🤖 正在调用改写服务...", ctx.script_index);

        let improved = self.rewriter.rewrite(&scenario.content).await?;

        info!(
            "[脚本 {}] ✓ 润色完成（{} 字符）",
            ctx.script_index,
            improved.chars().count()
        );

        // ========== 步骤 2: 渲染 PDF ==========
        info!("[脚本 {}] 📄 正在渲染 PDF...", ctx.script_index);

        let output_name = scenario.output_filename();
        let output_path = self
            .renderer
            .render(&scenario.filename, &improved, &output_name)
            .await?;

        info!(
            "[脚本 {}] ✓ PDF 已生成: {}",
            ctx.script_index,
            output_path.display()
        );

        Ok(output_path)
    }
}
