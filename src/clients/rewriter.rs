//! 改写能力接口

use crate::error::RemoteError;
use async_trait::async_trait;

/// 文本改写能力
///
/// 流程层与编排层只依赖该接口，不感知远程服务的报文结构；
/// 测试中以桩实现替换真实客户端
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// 将原始脚本文本润色为最终文本
    async fn rewrite(&self, text: &str) -> Result<String, RemoteError>;
}
