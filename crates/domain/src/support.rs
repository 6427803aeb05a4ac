//! Support chat payloads

use serde::{Deserialize, Serialize};

/// Author of a support message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSender {
    /// The signed-in user.
    User,
    /// The support assistant.
    Ai,
    /// A support agent.
    HumanAgent,
    /// Automated notice.
    System,
}

/// One message of the support thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    /// Server id.
    pub id: String,
    /// Message text.
    pub text: String,
    /// Author.
    pub sender: MessageSender,
    /// Set when the message was escalated for review.
    #[serde(default)]
    pub flagged: bool,
    /// Absent on the echo of a message just sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The caller's support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportThread {
    /// Messages, oldest first.
    #[serde(default)]
    pub messages: Vec<SupportMessage>,
    /// A human agent has taken over from the assistant.
    #[serde(default)]
    pub human_joined: bool,
}

/// Outcome of sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageExchange {
    /// Echo of the message just sent.
    pub user_message: SupportMessage,
    /// Assistant reply.
    pub ai_reply: SupportMessage,
    /// A human agent has joined the thread.
    #[serde(default)]
    pub human_joined: bool,
    /// The message was escalated for review.
    #[serde(default)]
    pub flagged: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_exchange_without_timestamps() {
        let exchange: MessageExchange = serde_json::from_value(json!({
            "userMessage": { "id": "m1", "text": "Where is my order?", "sender": "USER" },
            "aiReply": { "id": "m2", "text": "It left the store.", "sender": "AI", "flagged": false },
            "humanJoined": false,
            "flagged": false
        }))
        .unwrap();
        assert_eq!(exchange.user_message.sender, MessageSender::User);
        assert_eq!(exchange.ai_reply.created_at, None);
    }

    #[test]
    fn test_human_agent_sender() {
        let sender: MessageSender = serde_json::from_value(json!("HUMAN_AGENT")).unwrap();
        assert_eq!(sender, MessageSender::HumanAgent);
    }
}
