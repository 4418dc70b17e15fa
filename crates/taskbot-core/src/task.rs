use crate::error::ParseError;
use crate::types::{Priority, TaskStatus, NO_PROJECT};
use serde::{Deserialize, Serialize};

/// A task row. `project` is the denormalized project *name* — renaming a
/// project does not follow its tasks (recorded as a data-model decision in
/// DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub project: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub deadline: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: String,
}

/// Input contract: line 1 = title (required), line 2 = description,
/// line 3 = priority (lenient), line 4 = deadline. The project name comes
/// from the prior button selection and falls back to [`NO_PROJECT`].
pub fn parse_input(text: &str, project: Option<&str>) -> Result<NewTask, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let title = lines[0].trim();
    if title.is_empty() {
        return Err(ParseError::TooFewLines {
            required: 1,
            got: 0,
        });
    }
    Ok(NewTask {
        project: project.unwrap_or(NO_PROJECT).to_string(),
        title: title.to_string(),
        description: lines.get(1).map(|l| l.trim()).unwrap_or_default().to_string(),
        priority: Priority::parse_lenient(lines.get(2).map(|l| l.trim()).unwrap_or_default()),
        deadline: lines.get(3).map(|l| l.trim()).unwrap_or_default().to_string(),
    })
}

/// Group tasks by project name, preserving first-seen project order and
/// creation order within each group. Used by the aggregate task screen.
pub fn group_by_project(tasks: &[Task]) -> Vec<(&str, Vec<&Task>)> {
    let mut groups: Vec<(&str, Vec<&Task>)> = Vec::new();
    for task in tasks {
        match groups.iter_mut().find(|(name, _)| *name == task.project) {
            Some((_, group)) => group.push(task),
            None => groups.push((task.project.as_str(), vec![task])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, project: &str, title: &str) -> Task {
        Task {
            id,
            project: project.to_string(),
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            deadline: String::new(),
            created: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn parses_all_four_lines() {
        let t = parse_input("Buy milk\n\nhigh\n2025-01-01", Some("Home")).unwrap();
        assert_eq!(t.title, "Buy milk");
        assert_eq!(t.description, "");
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.deadline, "2025-01-01");
        assert_eq!(t.project, "Home");
    }

    #[test]
    fn invalid_priority_coerced_to_medium() {
        let t = parse_input("Fix roof\nleaking\nurgent", None).unwrap();
        assert_eq!(t.priority, Priority::Medium);
    }

    #[test]
    fn missing_project_falls_back() {
        let t = parse_input("Buy milk", None).unwrap();
        assert_eq!(t.project, NO_PROJECT);
    }

    #[test]
    fn blank_title_rejected() {
        assert!(parse_input("\ndescription only", Some("Home")).is_err());
    }

    #[test]
    fn grouping_preserves_order() {
        let tasks = vec![
            task(1, "Home", "a"),
            task(2, "Work", "b"),
            task(3, "Home", "c"),
        ];
        let groups = group_by_project(&tasks);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Home");
        assert_eq!(groups[0].1.iter().map(|t| t.id).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(groups[1].0, "Work");
    }
}
