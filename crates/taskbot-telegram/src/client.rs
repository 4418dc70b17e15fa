use crate::error::{Result, TelegramError};
use crate::types::{ApiResponse, InlineKeyboardMarkup, Message, Update};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Extra slack on top of the long-poll timeout before reqwest gives up.
const POLL_GRACE_SECS: u64 = 10;

pub struct Bot {
    http: reqwest::Client,
    base: String,
}

impl Bot {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(format!("https://api.telegram.org/bot{token}"))
    }

    /// Point the client at a different API base. Used by tests against a
    /// local mock server.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &impl Serialize,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let mut request = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        // Decode through the body text so a garbled payload surfaces as
        // `Json`, not as a transport failure.
        let body = request.send().await?.text().await?;
        let response: ApiResponse<T> = serde_json::from_str(&body)?;
        if !response.ok {
            return Err(TelegramError::Api(
                response
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }
        response
            .result
            .ok_or_else(|| TelegramError::Api("ok response without result".to_string()))
    }

    /// Long-poll for updates. Blocks server-side for up to `timeout_secs`;
    /// the HTTP timeout is padded so the poll itself never races it.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        #[derive(Serialize)]
        struct GetUpdates {
            offset: i64,
            timeout: u64,
            allowed_updates: [&'static str; 2],
        }
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout_secs,
                allowed_updates: ["message", "callback_query"],
            },
            Some(Duration::from_secs(timeout_secs + POLL_GRACE_SECS)),
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message> {
        #[derive(Serialize)]
        struct SendMessage<'a> {
            chat_id: i64,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<&'a InlineKeyboardMarkup>,
        }
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                reply_markup: keyboard,
            },
            None,
        )
        .await
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct EditMessageText<'a> {
            chat_id: i64,
            message_id: i64,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<&'a InlineKeyboardMarkup>,
        }
        self.call::<serde_json::Value>(
            "editMessageText",
            &EditMessageText {
                chat_id,
                message_id,
                text,
                reply_markup: keyboard,
            },
            None,
        )
        .await
        .map(|_| ())
    }

    /// Ack a button press, optionally with a transient notice toast.
    pub async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        #[derive(Serialize)]
        struct AnswerCallbackQuery<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }
        self.call::<bool>(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id: callback_id,
                text,
            },
            None,
        )
        .await
        .map(|_| ())
    }

    /// The one render contract: when `edit` names the triggering bot
    /// message, try an in-place edit; on *any* failure (content unchanged,
    /// message deleted, too old) fall back to sending a new message. Callers
    /// never branch on this themselves.
    pub async fn render(
        &self,
        chat_id: i64,
        edit: Option<i64>,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<()> {
        if let Some(message_id) = edit {
            match self.edit_message_text(chat_id, message_id, text, keyboard).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    debug!(error = %err, message_id, "edit failed, sending new message");
                }
            }
        }
        self.send_message(chat_id, text, keyboard).await.map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineKeyboardButton;

    fn keyboard() -> InlineKeyboardMarkup {
        InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "🏠 Main menu".to_string(),
                callback_data: "main_menu".to_string(),
            }]],
        }
    }

    #[tokio::test]
    async fn get_updates_parses_batch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/getUpdates")
            .with_status(200)
            .with_body(
                r#"{"ok": true, "result": [
                    {"update_id": 5, "message": {"message_id": 1, "chat": {"id": 9}, "text": "/start"}},
                    {"update_id": 6, "callback_query": {"id": "c", "from": {"id": 9}, "data": "tasks"}}
                ]}"#,
            )
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        let updates = bot.get_updates(0, 0).await.unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].update_id, 6);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_carries_description() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok": false, "description": "Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        let err = bot.send_message(1, "hi", None).await.unwrap_err();
        assert!(matches!(err, TelegramError::Api(ref d) if d.contains("chat not found")));
    }

    #[tokio::test]
    async fn garbled_payload_is_a_json_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/getUpdates")
            .with_status(200)
            .with_body("<html>gateway timeout</html>")
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        let err = bot.get_updates(0, 0).await.unwrap_err();
        assert!(matches!(err, TelegramError::Json(_)));
    }

    #[tokio::test]
    async fn render_falls_back_to_new_message_when_edit_fails() {
        let mut server = mockito::Server::new_async().await;
        let edit = server
            .mock("POST", "/editMessageText")
            .with_status(400)
            .with_body(r#"{"ok": false, "description": "Bad Request: message is not modified"}"#)
            .create_async()
            .await;
        let send = server
            .mock("POST", "/sendMessage")
            .with_status(200)
            .with_body(r#"{"ok": true, "result": {"message_id": 2, "chat": {"id": 9}}}"#)
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        bot.render(9, Some(1), "menu", Some(&keyboard())).await.unwrap();

        edit.assert_async().await;
        send.assert_async().await;
    }

    #[tokio::test]
    async fn render_edits_in_place_when_possible() {
        let mut server = mockito::Server::new_async().await;
        let edit = server
            .mock("POST", "/editMessageText")
            .with_status(200)
            .with_body(r#"{"ok": true, "result": {"message_id": 1, "chat": {"id": 9}}}"#)
            .create_async()
            .await;
        let send = server
            .mock("POST", "/sendMessage")
            .expect(0)
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        bot.render(9, Some(1), "menu", None).await.unwrap();

        edit.assert_async().await;
        send.assert_async().await;
    }

    #[tokio::test]
    async fn render_without_edit_target_sends_new_message() {
        let mut server = mockito::Server::new_async().await;
        let send = server
            .mock("POST", "/sendMessage")
            .with_status(200)
            .with_body(r#"{"ok": true, "result": {"message_id": 3, "chat": {"id": 9}}}"#)
            .create_async()
            .await;

        let bot = Bot::with_base_url(server.url());
        bot.render(9, None, "menu", None).await.unwrap();
        send.assert_async().await;
    }
}
