//! LlmProvider trait definition.
//!
//! This is the abstraction the chat relay consumes. Every completion in this
//! system is streamed, so the trait only exposes `stream` and stays object
//! safe: providers are carried as `Arc<dyn LlmProvider>`.

use std::pin::Pin;

use futures_util::Stream;

use fchat_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Trait for LLM provider backends.
///
/// Implementations live in fchat-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Transport and protocol failures surface as `Err` items; the stream
    /// ends after the first error.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
