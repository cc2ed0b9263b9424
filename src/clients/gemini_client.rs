//! Gemini API 客户端
//!
//! 封装 `generateContent` 接口的请求构造、响应解析与错误归类。
//! 客户端本身不做重试，失败直接上报给调用方。

use crate::clients::rewriter::Rewriter;
use crate::config::Config;
use crate::error::RemoteError;
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// 固定的润色指令，作为每次请求的第一个文本片段
const INSTRUCTION: &str = "You are a professional YouTuber scriptwriter.
Please improve the following script by fixing grammar, style, and flow.
Make it sound natural and conversational, like a charismatic YouTuber speaking on camera.
Add YouTube-style delivery notations such as [Pause], [Emotional], [Excited], [Whisper], or [Joke] where appropriate.
IMPORTANT: Output only the improved script content. Do NOT include any introductory phrases, explanations, or summaries.";

// ========== 请求报文 ==========

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

// ========== 响应报文 ==========
// 所有字段都允许缺省，缺省时取零值，与服务端的部分响应兼容

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    /// `{base}/{model}:generateContent` 组合后的完整地址
    endpoint: String,
    model_name: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: &Config) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(RemoteError::ClientInitFailed)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/{}:generateContent",
                config.api_base_url, config.model_name
            ),
            model_name: config.model_name.clone(),
        })
    }

    /// 发送一次改写请求
    ///
    /// # 参数
    /// - `text`: 待润色的脚本正文
    ///
    /// # 返回
    /// 返回按服务端顺序拼接的润色结果
    pub async fn send_request(&self, text: &str) -> Result<String, RemoteError> {
        debug!("正在调用改写 API，模型: {}", self.model_name);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: INSTRUCTION }, Part { text }],
            }],
        };

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::RequestFailed)?;

        let status = response.status();
        let raw = response.text().await.map_err(RemoteError::RequestFailed)?;

        if !status.is_success() {
            warn!("改写 API 返回异常状态: {}", status);
            let message = serde_json::from_str::<GenerateContentResponse>(&raw)
                .ok()
                .and_then(|parsed| parsed.error)
                .map(|e| e.message)
                .unwrap_or_else(|| truncate_text(raw.trim(), 200));
            return Err(RemoteError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        let improved = interpret_response(&raw)?;
        debug!("改写 API 调用成功，返回 {} 字符", improved.chars().count());
        Ok(improved)
    }
}

/// 解析成功状态下的响应体
///
/// 先检查响应体内嵌的错误信息，再取第一个候选结果，
/// 并按服务端返回顺序拼接其全部文本片段
fn interpret_response(raw: &str) -> Result<String, RemoteError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(raw).map_err(RemoteError::ParseFailed)?;

    if let Some(err) = parsed.error {
        if err.code != 0 {
            return Err(RemoteError::ApiError {
                code: err.code,
                message: err.message,
                status: err.status,
            });
        }
    }

    let candidate = parsed.candidates.first().ok_or(RemoteError::EmptyResponse)?;
    if candidate.content.parts.is_empty() {
        return Err(RemoteError::EmptyContent);
    }

    let mut improved = String::new();
    for part in &candidate.content.parts {
        improved.push_str(&part.text);
    }
    Ok(improved)
}

#[async_trait]
impl Rewriter for GeminiClient {
    async fn rewrite(&self, text: &str) -> Result<String, RemoteError> {
        self.send_request(text).await
    }
}
