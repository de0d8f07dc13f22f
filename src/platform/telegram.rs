use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ReplyParameters, User};
use teloxide::RequestError;

use crate::platform::{Customer, Outbox, Reply};

/// Telegram rejects messages above 4096 characters.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Split long messages for Telegram's 4096 char limit
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        // Walk back to a valid UTF-8 char boundary so slicing doesn't panic
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        let actual_end = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .or_else(|| text[start..end].rfind(' '))
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(text[start..actual_end].to_string());
        start = actual_end;
    }

    chunks
}

pub fn customer_from_user(user: Option<&User>) -> Customer {
    match user {
        Some(user) => Customer {
            user_id: Some(user.id.0),
            full_name: Some(user.full_name()),
            username: user.username.clone(),
        },
        None => Customer::default(),
    }
}

#[async_trait]
impl Outbox for Bot {
    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<(), RequestError> {
        for chunk in split_message(&text, MAX_MESSAGE_LEN) {
            self.send_message(chat_id, chunk).await?;
        }
        Ok(())
    }

    async fn send_reply(&self, chat_id: ChatId, reply: Reply) -> Result<(), RequestError> {
        let mut request = self.send_message(chat_id, reply.text);
        if let Some(mode) = reply.parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = reply.keyboard {
            request = request.reply_markup(keyboard);
        }
        if let Some(message_id) = reply.reply_to {
            request = request.reply_parameters(ReplyParameters::new(message_id));
        }
        request.await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_single_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello".to_string()]);
    }

    #[test]
    fn test_split_on_newline() {
        let text = "line one\nline two\nline three";
        let chunks = split_message(text, 12);
        assert!(chunks.iter().all(|c| c.len() <= 12));
        assert_eq!(chunks.concat(), text);
        assert_eq!(chunks[0], "line one\n");
    }

    #[test]
    fn test_split_respects_char_boundaries() {
        let text = "é".repeat(50);
        let chunks = split_message(&text, 7);
        assert!(chunks.iter().all(|c| c.len() <= 7));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_missing_user_is_unknown_customer() {
        assert_eq!(customer_from_user(None), Customer::default());
    }
}
