use crate::config::Config;
use std::time::Duration;
use taskbot_core::callback::CallbackAction;
use taskbot_core::controller::{handle_event, Response};
use taskbot_core::event::{Command, Event};
use taskbot_core::memory::MemoryStore;
use taskbot_core::render::Keyboard;
use taskbot_core::session::SessionMap;
use taskbot_core::Store;
use taskbot_telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup, Update};
use taskbot_telegram::Bot;
use tracing::{info, warn};

/// Backoff after a failed getUpdates poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-poll loop: fetch updates, feed each one through the controller,
/// deliver the response. Runs until Ctrl-C.
pub async fn run(config: &Config, poll_timeout: u64, memory: bool) -> anyhow::Result<()> {
    let store: Box<dyn Store> = if memory {
        info!("using in-memory store, records are lost on exit");
        Box::new(MemoryStore::new())
    } else {
        let store = config.sheets_store()?;
        store.ensure_worksheets().await?;
        Box::new(store)
    };
    let bot = config.bot()?;
    let sessions = SessionMap::new();

    info!("taskbot started");
    let mut offset = 0i64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
            polled = bot.get_updates(offset, poll_timeout) => {
                let updates = match polled {
                    Ok(updates) => updates,
                    Err(err) => {
                        warn!(error = %err, "getUpdates failed, retrying");
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                        continue;
                    }
                };
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    if let Err(err) = handle_update(store.as_ref(), &sessions, &bot, update).await {
                        warn!(error = %err, "failed to deliver response");
                    }
                }
            }
        }
    }
}

/// One update, end to end. Delivery failures are the caller's to log;
/// domain-level misses are already part of the [`Response`].
async fn handle_update(
    store: &dyn Store,
    sessions: &SessionMap,
    bot: &Bot,
    update: Update,
) -> taskbot_telegram::Result<()> {
    if let Some(cb) = update.callback_query {
        let user = cb.from.id;
        let chat = cb.message.as_ref().map(|m| m.chat.id).unwrap_or(user);
        let edit = cb.message.as_ref().map(|m| m.message_id);
        let Some(action) = cb.data.as_deref().and_then(CallbackAction::parse) else {
            // Stale or foreign token: ack so the client stops spinning.
            return bot.answer_callback_query(&cb.id, None).await;
        };
        let response = handle_event(store, sessions, user, Event::Callback(action)).await;
        bot.answer_callback_query(&cb.id, response.notice.as_deref())
            .await?;
        return deliver(bot, chat, edit, response).await;
    }

    if let Some(message) = update.message {
        let Some(text) = message.text else {
            return Ok(());
        };
        let user = message.from.as_ref().map(|u| u.id).unwrap_or(message.chat.id);
        let event = if text.starts_with('/') {
            match Command::parse(&text) {
                Some(command) => Event::Command(command),
                // Unknown slash commands are ignored, as the menu covers
                // everything.
                None => return Ok(()),
            }
        } else {
            Event::Text(text)
        };
        let response = handle_event(store, sessions, user, event).await;
        return deliver(bot, message.chat.id, None, response).await;
    }

    Ok(())
}

async fn deliver(
    bot: &Bot,
    chat: i64,
    edit: Option<i64>,
    response: Response,
) -> taskbot_telegram::Result<()> {
    for text in &response.messages {
        bot.send_message(chat, text, None).await?;
    }
    if let Some(screen) = response.screen {
        bot.render(chat, edit, &screen.text, Some(&to_markup(&screen.keyboard)))
            .await?;
    }
    Ok(())
}

fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.label.clone(),
                        callback_data: button.action.encode(),
                    })
                    .collect()
            })
            .collect(),
    }
}
