//! # Script Improver
//!
//! 一个批量润色文本脚本并渲染 PDF 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 脚本数据与读取
//! - `Scenario` - 单个脚本（文件名 + 已修复乱码的正文）
//! - `loaders/script_loader` - 目录扫描与并发读取（整体成败）
//!
//! ### ② 业务能力层（Clients / Services）
//! - `clients/` - 描述"我能改写什么"，只处理单段文本
//! - `Rewriter` - 改写能力接口，`GeminiClient` 为其远程实现
//! - `services/PdfRenderer` - 润色文本 → PDF 的渲染能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个脚本"的完整处理流程
//! - `ScriptCtx` - 上下文封装（脚本序号 + 文件名）
//! - `ScriptFlow` - 流程编排（rewrite → render）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量脚本处理器，管理并发与失败汇总
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GeminiClient, Rewriter};
pub use config::Config;
pub use error::{AppError, AppResult, BatchError, BatchReadError, RemoteError, ScriptError};
pub use models::Scenario;
pub use orchestrator::App;
pub use services::PdfRenderer;
pub use workflow::{ScriptCtx, ScriptFlow};
