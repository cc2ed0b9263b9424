//! 批量脚本处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量脚本的处理与失败汇总。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、构建 Gemini 客户端
//! 2. **批量加载**：扫描并读取所有待处理脚本（读取阶段整体成败）
//! 3. **并发控制**：使用 Semaphore 限制同时处理的脚本数量
//! 4. **失败汇总**：按脚本收集失败，通过 mpsc 通道统一上报
//! 5. **全局统计**：输出成功/失败统计并决定进程退出码
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个脚本的细节，向下委托 workflow::ScriptFlow
//! - **失败隔离**：润色/渲染阶段一个脚本失败不影响其他脚本
//! - **两阶段语义**：读取阶段整体成败，处理阶段按脚本隔离

use crate::clients::{GeminiClient, Rewriter};
use crate::config::Config;
use crate::error::{AppResult, BatchError, ConfigError, ScriptError};
use crate::models::{list_script_files, load_all_scripts, Scenario};
use crate::services::PdfRenderer;
use crate::utils::logging::{log_scripts_loaded, log_startup, print_final_stats};
use crate::workflow::{ScriptCtx, ScriptFlow};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    rewriter: Arc<dyn Rewriter>,
}

impl App {
    /// 初始化应用
    ///
    /// 校验配置并构建真实的 Gemini 客户端
    pub fn initialize(config: Config) -> AppResult<Self> {
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }

        log_startup(&config);

        let client = GeminiClient::new(&config)?;
        Ok(Self::with_rewriter(config, Arc::new(client)))
    }

    /// 使用注入的改写实现构建应用
    ///
    /// 集成测试通过此入口以桩实现替换远程服务
    pub fn with_rewriter(config: Config, rewriter: Arc<dyn Rewriter>) -> Self {
        Self { config, rewriter }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        // 加载所有待处理的脚本（读取阶段整体成败）
        let scenarios = self.load_scripts().await?;

        if scenarios.is_empty() {
            warn!("⚠️ 没有找到待处理的脚本文件，程序结束");
            return Ok(());
        }

        let total = scenarios.len();
        log_scripts_loaded(total, self.config.max_concurrent_scripts);

        // 确保输出目录存在
        let renderer = PdfRenderer::new(&self.config.output_dir);
        renderer.ensure_output_dir().await?;

        // 处理所有脚本（润色/渲染阶段按脚本隔离）
        let failures = self.process_all_scripts(scenarios, renderer).await;

        // 输出最终统计
        let failed = failures.len();
        print_final_stats(total - failed, failed, total, &self.config.output_dir);

        if !failures.is_empty() {
            return Err(BatchError { failures }.into());
        }
        Ok(())
    }

    /// 扫描并读取脚本
    async fn load_scripts(&self) -> AppResult<Vec<Scenario>> {
        info!("\n📁 正在扫描待处理的脚本...");

        let dir = Path::new(&self.config.scripts_dir);
        let names = list_script_files(dir).await?;
        let scenarios = load_all_scripts(dir, &names).await?;
        Ok(scenarios)
    }

    /// 并发处理所有脚本，返回收集到的全部失败明细
    ///
    /// 每个脚本恰好产生一个终态：PDF 写出成功，或一条 (文件名, 错误)
    /// 记录进失败通道；任务 panic 也按对应脚本的失败记录
    async fn process_all_scripts(
        &self,
        scenarios: Vec<Scenario>,
        renderer: PdfRenderer,
    ) -> Vec<(String, ScriptError)> {
        let total = scenarios.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_scripts));
        // 失败收集通道：容量为脚本总数，任务只写，汇总阶段统一读取
        let (failure_tx, mut failure_rx) = mpsc::channel::<(String, ScriptError)>(total);

        let mut handles = Vec::new();

        for (idx, scenario) in scenarios.into_iter().enumerate() {
            let script_index = idx + 1;
            let filename = scenario.filename.clone();

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    // Semaphore 已关闭属于异常终态，按脚本失败记录
                    let _ = failure_tx
                        .send((filename, ScriptError::TaskFailed(e.to_string())))
                        .await;
                    continue;
                }
            };

            let flow = ScriptFlow::new(Arc::clone(&self.rewriter), renderer.clone());
            let ctx = ScriptCtx::new(script_index, scenario.filename.clone());
            let tx = failure_tx.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = flow.run(&scenario, &ctx).await {
                    error!("[脚本 {}] ❌ 处理失败: {}", ctx.script_index, e);
                    let _ = tx.send((ctx.filename.clone(), e)).await;
                }
            });
            handles.push((script_index, filename, handle));
        }

        // 等待所有任务完成
        for (script_index, filename, handle) in handles {
            if let Err(e) = handle.await {
                error!("[脚本 {}] 任务执行失败: {}", script_index, e);
                let _ = failure_tx
                    .send((filename, ScriptError::TaskFailed(e.to_string())))
                    .await;
            }
        }
        drop(failure_tx);

        let mut failures = Vec::new();
        while let Some(failure) = failure_rx.recv().await {
            failures.push(failure);
        }
        failures
    }
}
