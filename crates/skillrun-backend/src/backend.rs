use async_trait::async_trait;
use skillrun_core::Result;

/// An inference backend: turns one rendered prompt into generated text.
///
/// A successful skill `run` makes exactly one call. Failures surface as
/// `SkillError::Backend`; no retry happens at this layer.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Human-readable name, e.g. "anthropic".
    fn name(&self) -> &str;

    /// Generate text for a fully rendered prompt.
    async fn infer(&self, prompt: &str) -> Result<String>;
}
