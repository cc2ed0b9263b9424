pub mod gemini_client;
pub mod rewriter;

pub use gemini_client::GeminiClient;
pub use rewriter::Rewriter;
