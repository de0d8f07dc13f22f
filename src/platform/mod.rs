pub mod telegram;

use async_trait::async_trait;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::RequestError;

/// The person who triggered an update (the buyer, for orders).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    /// Platform user ID; `None` when the update carried no sender.
    pub user_id: Option<u64>,
    /// Display name of the user
    pub full_name: Option<String>,
    /// Handle without `@`
    pub username: Option<String>,
}

impl Customer {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Utilisateur inconnu")
    }

    pub fn id_label(&self) -> String {
        self.user_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn handle_label(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("@{name}"),
            _ => "—".to_string(),
        }
    }
}

/// A reply to the user who sent the triggering message.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub reply_to: Option<MessageId>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
            reply_to: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::plain(text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn replying_to(mut self, message_id: Option<MessageId>) -> Self {
        self.reply_to = message_id;
        self
    }
}

/// Outbound side of the messaging platform.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Deliver plain text (no parse mode) to an arbitrary chat.
    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<(), RequestError>;

    /// Answer the customer.
    async fn send_reply(&self, chat_id: ChatId, reply: Reply) -> Result<(), RequestError>;
}
