use crate::callback::CallbackAction;

/// Slash commands the bot registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Projects,
    Tasks,
    Notes,
}

impl Command {
    /// Parse `/cmd` or `/cmd@BotName`. Unknown commands return `None` and
    /// are silently ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name {
            "start" => Some(Command::Start),
            "projects" => Some(Command::Projects),
            "tasks" => Some(Command::Tasks),
            "notes" => Some(Command::Notes),
            _ => None,
        }
    }
}

/// One inbound chat event, already translated from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Callback(CallbackAction),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_addressed_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/tasks@MyTaskBot"), Some(Command::Tasks));
        assert_eq!(Command::parse("/projects extra words"), Some(Command::Projects));
    }

    #[test]
    fn non_commands_rejected() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse(""), None);
    }
}
