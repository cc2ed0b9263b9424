use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 远程改写服务错误
    #[error("改写服务错误: {0}")]
    Remote(#[from] RemoteError),
    /// PDF 渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 读取阶段聚合错误（整体成败）
    #[error("{0}")]
    BatchRead(#[from] BatchReadError),
    /// 处理阶段聚合错误（按脚本隔离）
    #[error("{0}")]
    Batch(#[from] BatchError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ListDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 远程改写服务错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP 客户端初始化失败
    #[error("HTTP 客户端初始化失败: {0}")]
    ClientInitFailed(#[source] reqwest::Error),
    /// 网络请求失败
    #[error("改写请求失败: {0}")]
    RequestFailed(#[source] reqwest::Error),
    /// API 返回非成功状态码
    #[error("改写 API 返回异常状态 {status}: {message}")]
    BadStatus { status: u16, message: String },
    /// API 响应体中携带错误信息
    #[error("改写 API 返回错误 (code={code}, status={status}): {message}")]
    ApiError {
        code: i64,
        message: String,
        status: String,
    },
    /// 响应体解析失败
    #[error("改写响应解析失败: {0}")]
    ParseFailed(#[source] serde_json::Error),
    /// 响应中没有候选结果
    #[error("改写 API 未返回候选结果")]
    EmptyResponse,
    /// 首个候选结果没有内容片段
    #[error("改写 API 返回内容为空")]
    EmptyContent,
}

/// PDF 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF 文档构建失败（字体加载等）
    #[error("PDF 构建失败: {message}")]
    PdfBuildFailed { message: String },
    /// PDF 字节序列化失败
    #[error("PDF 序列化失败: {message}")]
    PdfSaveFailed { message: String },
}

/// 单个脚本的终态错误
///
/// 改写与渲染阶段按脚本隔离：一个脚本失败时记录此错误，
/// 其余脚本继续处理
#[derive(Debug, Error)]
pub enum ScriptError {
    /// 改写阶段失败
    #[error("改写失败: {0}")]
    Remote(#[from] RemoteError),
    /// 渲染阶段失败
    #[error("渲染失败: {0}")]
    Render(#[from] RenderError),
    /// 文件写出失败
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 并发任务本身执行失败
    #[error("任务执行失败: {0}")]
    TaskFailed(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API 密钥未设置
    #[error("API_KEY 未设置，请检查环境变量")]
    MissingApiKey,
}

// ========== 聚合错误 ==========

/// 读取阶段聚合错误
///
/// 读取阶段为整体成败：任一文件读取失败时汇总全部失败明细，
/// 批次在任何网络调用之前终止
#[derive(Debug)]
pub struct BatchReadError {
    pub failures: Vec<FileError>,
}

impl fmt::Display for BatchReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 个脚本文件读取失败:", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchReadError {}

/// 处理阶段聚合错误
///
/// 收集一次批量运行中所有失败脚本的 (文件名, 错误) 明细；
/// 已成功生成的 PDF 保留在输出目录中
#[derive(Debug)]
pub struct BatchError {
    pub failures: Vec<(String, ScriptError)>,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 个脚本处理失败:", self.failures.len())?;
        for (filename, failure) in &self.failures {
            write!(f, "\n  - {}: {}", filename, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchError {}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
