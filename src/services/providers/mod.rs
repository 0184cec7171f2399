/// Text-generation backends
///
/// The recommendation pipeline only needs "prompt in, text out". Anything
/// richer (structured output, streaming) stays inside the provider.
use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and returns the raw reply text
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
