use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Project a task lands in when none was selected before entering it.
pub const NO_PROJECT: &str = "No project";

/// Status a freshly created project gets. Free text in the sheet, not an enum.
pub const DEFAULT_PROJECT_STATUS: &str = "active";

/// Creation timestamp string, `YYYY-MM-DD HH:MM:SS`, stored verbatim in the
/// sheet so it stays readable for people looking at the spreadsheet directly.
pub fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {what}: {value}")]
pub struct UnknownValue {
    pub what: &'static str,
    pub value: String,
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Emoji marker used in chat listings.
    pub fn icon(self) -> &'static str {
        match self {
            TaskStatus::Todo => "📝",
            TaskStatus::InProgress => "⏳",
            TaskStatus::Done => "✅",
        }
    }

    /// Read a sheet cell, defaulting to `todo` on anything unrecognized.
    /// Cells are user-visible and occasionally hand-edited.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(UnknownValue {
                what: "task status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }

    /// Input contract: anything outside {high, medium, low} is coerced to
    /// medium, including the empty string.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(UnknownValue {
                what: "priority",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            let parsed: TaskStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn priority_lenient_coerces_to_medium() {
        assert_eq!(Priority::parse_lenient("urgent"), Priority::Medium);
        assert_eq!(Priority::parse_lenient(""), Priority::Medium);
        assert_eq!(Priority::parse_lenient("HIGH"), Priority::Medium);
    }

    #[test]
    fn priority_lenient_passes_valid_through() {
        assert_eq!(Priority::parse_lenient("high"), Priority::High);
        assert_eq!(Priority::parse_lenient("medium"), Priority::Medium);
        assert_eq!(Priority::parse_lenient("low"), Priority::Low);
    }

    #[test]
    fn status_lenient_defaults_to_todo() {
        assert_eq!(TaskStatus::parse_lenient("cancelled"), TaskStatus::Todo);
        assert_eq!(TaskStatus::parse_lenient("done"), TaskStatus::Done);
    }

    #[test]
    fn now_stamp_shape() {
        let stamp = now_stamp();
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
    }
}
