//! Support chat

use baza_domain::{ApiRequest, DomainError, MessageExchange, SupportThread};
use serde::Serialize;

use crate::auth::AuthCoordinator;
use crate::error::ApiResult;
use crate::ports::Transport;

const THREAD: &str = "/support/thread";
const MESSAGE: &str = "/support/message";

#[derive(Serialize)]
struct MessageBody<'a> {
    text: &'a str,
}

/// Support thread endpoints.
pub struct SupportService<T: Transport> {
    api: AuthCoordinator<T>,
}

impl<T: Transport> Clone for SupportService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Transport + 'static> SupportService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>) -> Self {
        Self { api }
    }

    /// The whole conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be fetched or decoded.
    pub async fn thread(&self) -> ApiResult<SupportThread> {
        self.api.execute_json(ApiRequest::get(THREAD)).await
    }

    /// Sends a message and returns it with the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` for blank text, or an error if the
    /// message is rejected.
    pub async fn send(&self, text: &str) -> ApiResult<MessageExchange> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidBody("message text is empty".to_string()).into());
        }
        let exchange: MessageExchange = self
            .api
            .execute_json(ApiRequest::post(MESSAGE).with_json(&MessageBody { text })?)
            .await?;
        if exchange.flagged {
            tracing::info!(message_id = %exchange.user_message.id, "support message escalated");
        }
        Ok(exchange)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::auth::TokenStore;
    use crate::error::ApiError;
    use crate::test_support::{FakeBackend, REFRESH_PATH};

    fn service(backend: FakeBackend) -> (SupportService<FakeBackend>, Arc<FakeBackend>) {
        let backend = Arc::new(backend.accepting("t1"));
        let api = AuthCoordinator::new(
            Arc::clone(&backend),
            Arc::new(TokenStore::with_token("t1")),
            REFRESH_PATH,
        );
        (SupportService::new(api), backend)
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_trims_text() {
        let (support, backend) = service(FakeBackend::new(Duration::from_millis(20)).route(
            MESSAGE,
            json!({
                "userMessage": { "id": "m1", "text": "Where is my order?", "sender": "USER" },
                "aiReply": { "id": "m2", "text": "Your rider is 10 minutes away.", "sender": "AI", "flagged": false },
                "humanJoined": false,
                "flagged": false
            }),
        ));

        let exchange = support.send("  Where is my order?\n").await.unwrap();

        assert_eq!(exchange.ai_reply.text, "Your rider is 10 minutes away.");
        assert_eq!(
            backend.requests()[0].body,
            Some(json!({ "text": "Where is my order?" }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_message_is_not_sent() {
        let (support, backend) = service(FakeBackend::new(Duration::from_millis(20)));

        let error = support.send("   ").await.unwrap_err();

        assert!(matches!(error, ApiError::Request(_)), "{error:?}");
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_thread() {
        let (support, _) = service(FakeBackend::new(Duration::from_millis(20)).route(
            THREAD,
            json!({
                "messages": [
                    { "id": "m1", "text": "Hi", "sender": "USER", "flagged": false,
                      "createdAt": "2026-03-01T09:00:00Z" },
                    { "id": "m2", "text": "An agent will join shortly.", "sender": "SYSTEM",
                      "flagged": false, "createdAt": "2026-03-01T09:00:05Z" }
                ],
                "humanJoined": true
            }),
        ));

        let thread = support.thread().await.unwrap();

        assert!(thread.human_joined);
        assert_eq!(thread.messages.len(), 2);
    }
}
