//! Streaming chat relay.
//!
//! `ChatService` turns a user question into a stream of [`ChatChunk`]s:
//! snapshot the session's window, send history plus the new question to the
//! provider, relay text deltas as they arrive, and commit the completed
//! exchange back to the window only when the provider stream finishes
//! cleanly. A provider failure is emitted in-band as a final
//! [`ChatChunk::Error`] frame, since the transport has usually already
//! committed a success status by the time the provider fails.

use std::sync::Arc;
use std::time::Instant;

use futures_util::{Stream, StreamExt};
use tracing::{info, warn};

use fchat_types::chat::ChatChunk;
use fchat_types::llm::{CompletionRequest, GenerationProfile, Message, MessageRole, StreamEvent};

use crate::chat::memory::DEFAULT_WINDOW_TURNS;
use crate::chat::sessions::SessionRegistry;
use crate::llm::provider::LlmProvider;

/// System prompt sent with every completion request.
const SYSTEM_PROMPT: &str = "You are an intelligent assistant. You always provide \
                             well-reasoned answers that are both correct and helpful.";

/// Orchestrates conversation memory and the provider stream.
pub struct ChatService {
    provider: Arc<dyn LlmProvider>,
    sessions: SessionRegistry,
    profile: GenerationProfile,
}

impl ChatService {
    /// Create a chat service with the default window size.
    pub fn new(provider: Arc<dyn LlmProvider>, profile: GenerationProfile) -> Self {
        Self {
            provider,
            sessions: SessionRegistry::new(DEFAULT_WINDOW_TURNS),
            profile,
        }
    }

    fn build_request(&self, history: Vec<Message>, question: &str) -> CompletionRequest {
        let mut messages = history;
        messages.push(Message {
            role: MessageRole::User,
            content: question.to_string(),
        });

        CompletionRequest {
            model: self.profile.model.clone(),
            messages,
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.profile.max_tokens,
            temperature: Some(self.profile.temperature),
            stream: true,
        }
    }

    /// Stream the model's reply to `question` within the given session.
    ///
    /// The window is read once up front and written once at the end; the
    /// lock is never held while the provider is producing, so a slow stream
    /// in one session does not block reads elsewhere. Nothing is committed
    /// when the stream fails or produces no text.
    pub fn stream_reply(
        self: Arc<Self>,
        session_key: String,
        question: String,
    ) -> impl Stream<Item = ChatChunk> + Send + 'static {
        async_stream::stream! {
            let window = self.sessions.window(&session_key);
            let history = window.lock().await.messages();
            let request = self.build_request(history, &question);

            let start_time = Instant::now();
            let mut full_response = String::new();
            let mut had_error = false;

            let mut llm_stream = std::pin::pin!(self.provider.stream(request));

            while let Some(event_result) = llm_stream.next().await {
                match event_result {
                    Ok(StreamEvent::TextDelta { text }) => {
                        full_response.push_str(&text);
                        yield ChatChunk::Delta(text);
                    }
                    Ok(StreamEvent::Done) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!(session = %session_key, error = %e, "provider stream failed");
                        had_error = true;
                        yield ChatChunk::Error(e.to_string());
                        break;
                    }
                }
            }

            if !had_error && !full_response.is_empty() {
                let response_ms = start_time.elapsed().as_millis() as u64;
                let output_chars = full_response.len();
                window.lock().await.record(question, full_response);
                info!(
                    session = %session_key,
                    output_chars,
                    response_ms,
                    "chat completion finished"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::sessions::DEFAULT_SESSION;
    use fchat_types::llm::LlmError;
    use futures_util::stream;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Provider that replays scripted event sequences (one per call, in
    /// order) and records every request it receives.
    struct ScriptedProvider {
        scripts: Mutex<Vec<Vec<Result<StreamEvent, LlmError>>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(scripts: Vec<Vec<Result<StreamEvent, LlmError>>>) -> Self {
            Self {
                scripts: Mutex::new(scripts),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn reply(chunks: &[&str]) -> Vec<Result<StreamEvent, LlmError>> {
            let mut events = vec![Ok(StreamEvent::Connected)];
            for chunk in chunks {
                events.push(Ok(StreamEvent::TextDelta {
                    text: chunk.to_string(),
                }));
            }
            events.push(Ok(StreamEvent::Done));
            events
        }

        fn request(&self, index: usize) -> CompletionRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn stream(
            &self,
            request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            self.requests.lock().unwrap().push(request);
            let script = self.scripts.lock().unwrap().remove(0);
            Box::pin(stream::iter(script))
        }
    }

    fn profile() -> GenerationProfile {
        GenerationProfile {
            model: "gpt-test".to_string(),
            temperature: 0.0,
            max_tokens: 64,
        }
    }

    fn service_with(
        scripts: Vec<Vec<Result<StreamEvent, LlmError>>>,
    ) -> (Arc<ScriptedProvider>, Arc<ChatService>) {
        let provider = Arc::new(ScriptedProvider::new(scripts));
        let service = Arc::new(ChatService::new(provider.clone(), profile()));
        (provider, service)
    }

    #[tokio::test]
    async fn test_relays_deltas_in_order() {
        let (_, service) = service_with(vec![ScriptedProvider::reply(&["Hel", "lo"])]);

        let chunks: Vec<ChatChunk> = service
            .stream_reply(DEFAULT_SESSION.to_string(), "hi".to_string())
            .collect()
            .await;

        assert_eq!(
            chunks,
            vec![
                ChatChunk::Delta("Hel".to_string()),
                ChatChunk::Delta("lo".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_profile_and_system_prompt() {
        let (provider, service) = service_with(vec![ScriptedProvider::reply(&["ok"])]);

        let _: Vec<ChatChunk> = service
            .stream_reply("s1".to_string(), "hello".to_string())
            .collect()
            .await;

        let request = provider.request(0);
        assert_eq!(request.model, "gpt-test");
        assert_eq!(request.max_tokens, 64);
        assert_eq!(request.temperature, Some(0.0));
        assert!(request.stream);
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn test_committed_turn_feeds_next_request() {
        let (provider, service) = service_with(vec![
            ScriptedProvider::reply(&["Hello", " there"]),
            ScriptedProvider::reply(&["again"]),
        ]);

        let _: Vec<ChatChunk> = service
            .clone()
            .stream_reply("s1".to_string(), "hi".to_string())
            .collect()
            .await;
        let _: Vec<ChatChunk> = service
            .stream_reply("s1".to_string(), "more".to_string())
            .collect()
            .await;

        let second = provider.request(1);
        assert_eq!(second.messages.len(), 3);
        assert_eq!(second.messages[0].role, MessageRole::User);
        assert_eq!(second.messages[0].content, "hi");
        assert_eq!(second.messages[1].role, MessageRole::Assistant);
        assert_eq!(second.messages[1].content, "Hello there");
        assert_eq!(second.messages[2].content, "more");
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_history() {
        let (provider, service) = service_with(vec![
            ScriptedProvider::reply(&["a"]),
            ScriptedProvider::reply(&["b"]),
        ]);

        let _: Vec<ChatChunk> = service
            .clone()
            .stream_reply("alice".to_string(), "first".to_string())
            .collect()
            .await;
        let _: Vec<ChatChunk> = service
            .stream_reply("bob".to_string(), "second".to_string())
            .collect()
            .await;

        let bobs = provider.request(1);
        assert_eq!(bobs.messages.len(), 1);
        assert_eq!(bobs.messages[0].content, "second");
    }

    #[tokio::test]
    async fn test_window_excludes_evicted_exchange() {
        let mut scripts = Vec::new();
        for i in 0..7 {
            let text = format!("r{i}");
            scripts.push(ScriptedProvider::reply(&[text.as_str()]));
        }
        let (provider, service) = service_with(scripts);

        for i in 0..7 {
            let _: Vec<ChatChunk> = service
                .clone()
                .stream_reply("s1".to_string(), format!("q{i}"))
                .collect()
                .await;
        }

        // Seventh request sees turns 1..=5 but not turn 0.
        let seventh = provider.request(6);
        assert_eq!(seventh.messages.len(), DEFAULT_WINDOW_TURNS * 2 + 1);
        assert_eq!(seventh.messages[0].content, "q1");
        assert!(seventh.messages.iter().all(|m| m.content != "q0" && m.content != "r0"));
        assert_eq!(seventh.messages.last().unwrap().content, "q6");
    }

    #[tokio::test]
    async fn test_provider_error_is_emitted_in_band() {
        let script = vec![
            Ok(StreamEvent::Connected),
            Ok(StreamEvent::TextDelta {
                text: "partial".to_string(),
            }),
            Err(LlmError::Overloaded("upstream busy".to_string())),
        ];
        let (provider, service) = service_with(vec![script, ScriptedProvider::reply(&["ok"])]);

        let chunks: Vec<ChatChunk> = service
            .clone()
            .stream_reply("s1".to_string(), "hi".to_string())
            .collect()
            .await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], ChatChunk::Delta("partial".to_string()));
        assert!(matches!(
            &chunks[1],
            ChatChunk::Error(msg) if msg.contains("upstream busy")
        ));

        // The failed exchange must not become history.
        let _: Vec<ChatChunk> = service
            .stream_reply("s1".to_string(), "retry".to_string())
            .collect()
            .await;
        let second = provider.request(1);
        assert_eq!(second.messages.len(), 1);
        assert_eq!(second.messages[0].content, "retry");
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_committed() {
        let (provider, service) = service_with(vec![
            vec![Ok(StreamEvent::Connected), Ok(StreamEvent::Done)],
            ScriptedProvider::reply(&["ok"]),
        ]);

        let chunks: Vec<ChatChunk> = service
            .clone()
            .stream_reply("s1".to_string(), "hi".to_string())
            .collect()
            .await;
        assert!(chunks.is_empty());

        let _: Vec<ChatChunk> = service
            .stream_reply("s1".to_string(), "next".to_string())
            .collect()
            .await;
        assert_eq!(provider.request(1).messages.len(), 1);
    }
}
