//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量脚本处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载脚本（Vec<Scenario>，读取阶段整体成败）
//! - 控制并发数量（Semaphore）
//! - 按脚本收集失败并汇总为批次错误
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Scenario>)
//!     ↓
//! workflow::ScriptFlow (处理单个 Scenario)
//!     ↓
//! clients / services (能力层：rewrite / render)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做具体业务判断
//! 2. **失败隔离**：润色/渲染阶段一个脚本的失败不影响其他脚本
//! 3. **向下依赖**：编排层 → workflow → clients / services

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::App;
