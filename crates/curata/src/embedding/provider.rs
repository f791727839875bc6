use crate::error::Result;

/// Turns text into fixed-dimension vectors.
///
/// Implementations must be thread-safe so one backend can be shared by the
/// pipeline context.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()])?;
        batch
            .pop()
            .ok_or_else(|| crate::CurataError::provider(self.name(), "empty embedding batch"))
    }

    /// Embed a batch, returning one vector per input in order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Vector length produced by this backend.
    fn dimensions(&self) -> usize;

    /// Name of this backend (for logging/reports).
    fn name(&self) -> &str;

    /// Whether the backend can be used right now.
    fn is_available(&self) -> bool;
}
