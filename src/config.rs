/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的脚本数量
    pub max_concurrent_scripts: usize,
    /// 待润色脚本存放目录
    pub scripts_dir: String,
    /// PDF 输出目录
    pub output_dir: String,
    // --- 改写 API 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    pub model_name: String,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_scripts: 8,
            scripts_dir: "scripts".to_string(),
            output_dir: "improved_scripts".to_string(),
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model_name: "gemini-2.0-flash".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_scripts: std::env::var("MAX_CONCURRENT_SCRIPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_scripts),
            scripts_dir: std::env::var("SCRIPTS_DIR").unwrap_or(default.scripts_dir),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            api_key: std::env::var("API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: std::env::var("MODEL_NAME").unwrap_or(default.model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }
}
