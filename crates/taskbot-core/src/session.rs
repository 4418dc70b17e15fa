use std::collections::HashMap;
use std::sync::Mutex;

/// What kind of free-text input the bot expects next from one user.
///
/// Typed variants instead of a free-form tag; the task variant carries the
/// project name chosen by the preceding button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Awaiting {
    Project,
    Task { project: Option<String> },
    Note,
    Secret,
}

/// Transient per-user conversation state, keyed by chat-platform user id.
///
/// Lives in memory only. Critical sections never await, so a plain std
/// `Mutex` is enough even under a multi-threaded runtime.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: Mutex<HashMap<i64, Awaiting>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn awaiting(&self, user: i64) -> Option<Awaiting> {
        self.inner.lock().expect("session map poisoned").get(&user).cloned()
    }

    pub fn set_awaiting(&self, user: i64, awaiting: Awaiting) {
        self.inner
            .lock()
            .expect("session map poisoned")
            .insert(user, awaiting);
    }

    pub fn clear(&self, user: i64) {
        self.inner.lock().expect("session map poisoned").remove(&user);
    }
}
