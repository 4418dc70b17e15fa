use crate::error::ParseError;
use crate::types::DEFAULT_PROJECT_STATUS;
use serde::{Deserialize, Serialize};

/// A project row. No uniqueness constraint on `name`; tasks reference
/// projects by this name, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created: String,
    pub status: String,
}

/// Fields for an append-only project creation. `created` and `id` are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: DEFAULT_PROJECT_STATUS.to_string(),
        }
    }
}

/// Input contract: line 1 = name (required), line 2 = description (optional).
pub fn parse_input(text: &str) -> Result<NewProject, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let name = lines[0].trim();
    if name.is_empty() {
        return Err(ParseError::TooFewLines {
            required: 1,
            got: 0,
        });
    }
    let description = lines.get(1).map(|l| l.trim()).unwrap_or_default();
    Ok(NewProject::new(name, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_description() {
        let p = parse_input("Home\nChores and errands").unwrap();
        assert_eq!(p.name, "Home");
        assert_eq!(p.description, "Chores and errands");
        assert_eq!(p.status, "active");
    }

    #[test]
    fn description_defaults_empty() {
        let p = parse_input("Home").unwrap();
        assert_eq!(p.description, "");
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(
            parse_input("   "),
            Err(ParseError::TooFewLines {
                required: 1,
                got: 0
            })
        );
    }
}
