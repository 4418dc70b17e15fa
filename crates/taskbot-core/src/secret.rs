use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// A secret row. `data` is stored plaintext in the sheet — a known gap of
/// the design, documented rather than hidden. It is never rendered in chat
/// listings and never serialized into CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created: String,
    #[serde(skip_serializing, default)]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSecret {
    pub name: String,
    pub description: String,
    pub data: String,
}

/// Input contract: line 1 = name and line 2 = description are required;
/// line 3 = data.
pub fn parse_input(text: &str) -> Result<NewSecret, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewLines {
            required: 2,
            got: lines.len(),
        });
    }
    Ok(NewSecret {
        name: lines[0].trim().to_string(),
        description: lines[1].trim().to_string(),
        data: lines.get(2).map(|l| l.trim()).unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_two_lines() {
        assert!(parse_input("wifi").is_err());
    }

    #[test]
    fn data_defaults_empty() {
        let s = parse_input("wifi\nhome router").unwrap();
        assert_eq!(s.data, "");
    }

    #[test]
    fn data_never_serialized() {
        let secret = Secret {
            id: 1,
            name: "wifi".to_string(),
            description: "home router".to_string(),
            created: "2025-01-01 00:00:00".to_string(),
            data: "hunter2".to_string(),
        };
        let json = serde_json::to_string(&secret).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
