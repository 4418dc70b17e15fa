use crate::error::ParseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Comma-separated, free-form.
    pub tags: String,
    pub created: String,
    /// Optional project name, same denormalized linkage as tasks.
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub project: String,
}

/// Input contract: line 1 = title and line 2 = content are both required;
/// line 3 = tags, line 4 = project.
pub fn parse_input(text: &str) -> Result<NewNote, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewLines {
            required: 2,
            got: lines.len(),
        });
    }
    Ok(NewNote {
        title: lines[0].trim().to_string(),
        content: lines[1].trim().to_string(),
        tags: lines.get(2).map(|l| l.trim()).unwrap_or_default().to_string(),
        project: lines.get(3).map(|l| l.trim()).unwrap_or_default().to_string(),
    })
}
