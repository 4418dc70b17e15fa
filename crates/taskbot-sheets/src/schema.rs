//! Worksheet layouts and row codecs.
//!
//! Column order is part of the persisted contract — the sheet is
//! user-visible and may be read by other tooling, so these layouts never
//! change silently.

use taskbot_core::note::Note;
use taskbot_core::project::Project;
use taskbot_core::secret::Secret;
use taskbot_core::task::Task;
use taskbot_core::types::{Priority, TaskStatus};
use taskbot_core::{Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Worksheet {
    Projects,
    Tasks,
    Notes,
    Secrets,
}

impl Worksheet {
    pub fn all() -> &'static [Worksheet] {
        &[
            Worksheet::Projects,
            Worksheet::Tasks,
            Worksheet::Notes,
            Worksheet::Secrets,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            Worksheet::Projects => "Projects",
            Worksheet::Tasks => "Tasks",
            Worksheet::Notes => "Notes",
            Worksheet::Secrets => "Secrets",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Worksheet::Projects => &["ID", "Name", "Description", "Created", "Status"],
            Worksheet::Tasks => &[
                "ID",
                "Project",
                "Title",
                "Description",
                "Status",
                "Priority",
                "Deadline",
                "Created",
            ],
            Worksheet::Notes => &["ID", "Title", "Content", "Tags", "Created", "Project"],
            Worksheet::Secrets => &["ID", "Name", "Description", "Created", "Data"],
        }
    }
}

/// 1-based column of Tasks.Status, for the single-cell status update.
pub const TASK_STATUS_COL: usize = 5;

// ---------------------------------------------------------------------------
// Row decoding
//
// The values API trims trailing empty cells, so every optional column is
// read with `cell`. The ID column is load-bearing and fails loudly;
// enum columns are read leniently because cells get hand-edited.
// ---------------------------------------------------------------------------

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn parse_id(row: &[String], sheet: Worksheet, sheet_row: usize) -> Result<u64> {
    let raw = cell(row, 0);
    raw.trim().parse().map_err(|_| StoreError::MalformedRow {
        sheet: sheet.title().to_string(),
        row: sheet_row,
        reason: format!("non-numeric id '{raw}'"),
    })
}

pub fn project_from_row(row: &[String], sheet_row: usize) -> Result<Project> {
    Ok(Project {
        id: parse_id(row, Worksheet::Projects, sheet_row)?,
        name: cell(row, 1),
        description: cell(row, 2),
        created: cell(row, 3),
        status: cell(row, 4),
    })
}

pub fn task_from_row(row: &[String], sheet_row: usize) -> Result<Task> {
    Ok(Task {
        id: parse_id(row, Worksheet::Tasks, sheet_row)?,
        project: cell(row, 1),
        title: cell(row, 2),
        description: cell(row, 3),
        status: TaskStatus::parse_lenient(&cell(row, 4)),
        priority: Priority::parse_lenient(&cell(row, 5)),
        deadline: cell(row, 6),
        created: cell(row, 7),
    })
}

pub fn note_from_row(row: &[String], sheet_row: usize) -> Result<Note> {
    Ok(Note {
        id: parse_id(row, Worksheet::Notes, sheet_row)?,
        title: cell(row, 1),
        content: cell(row, 2),
        tags: cell(row, 3),
        created: cell(row, 4),
        project: cell(row, 5),
    })
}

pub fn secret_from_row(row: &[String], sheet_row: usize) -> Result<Secret> {
    Ok(Secret {
        id: parse_id(row, Worksheet::Secrets, sheet_row)?,
        name: cell(row, 1),
        description: cell(row, 2),
        created: cell(row, 3),
        data: cell(row, 4),
    })
}

// ---------------------------------------------------------------------------
// Row encoding
// ---------------------------------------------------------------------------

pub fn project_to_row(id: u64, new: &taskbot_core::project::NewProject, created: &str) -> Vec<String> {
    vec![
        id.to_string(),
        new.name.clone(),
        new.description.clone(),
        created.to_string(),
        new.status.clone(),
    ]
}

pub fn task_to_row(id: u64, new: &taskbot_core::task::NewTask, created: &str) -> Vec<String> {
    vec![
        id.to_string(),
        new.project.clone(),
        new.title.clone(),
        new.description.clone(),
        TaskStatus::Todo.as_str().to_string(),
        new.priority.as_str().to_string(),
        new.deadline.clone(),
        created.to_string(),
    ]
}

pub fn note_to_row(id: u64, new: &taskbot_core::note::NewNote, created: &str) -> Vec<String> {
    vec![
        id.to_string(),
        new.title.clone(),
        new.content.clone(),
        new.tags.clone(),
        created.to_string(),
        new.project.clone(),
    ]
}

pub fn secret_to_row(id: u64, new: &taskbot_core::secret::NewSecret, created: &str) -> Vec<String> {
    vec![
        id.to_string(),
        new.name.clone(),
        new.description.clone(),
        created.to_string(),
        new.data.clone(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn task_roundtrip_through_row() {
        let new = taskbot_core::task::NewTask {
            project: "Home".to_string(),
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: Priority::High,
            deadline: "2025-01-01".to_string(),
        };
        let row = task_to_row(3, &new, "2025-01-01 10:00:00");
        assert_eq!(row.len(), Worksheet::Tasks.headers().len());

        let task = task_from_row(&row, 4).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.project, "Home");
    }

    #[test]
    fn short_rows_read_as_empty_trailing_fields() {
        // values API trims trailing empty cells
        let task = task_from_row(&strings(&["1", "Home", "Buy milk"]), 2).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.deadline, "");
    }

    #[test]
    fn hand_edited_enum_cells_are_lenient() {
        let task =
            task_from_row(&strings(&["1", "Home", "t", "", "DONE!!", "urgent"]), 2).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn non_numeric_id_is_malformed() {
        let err = project_from_row(&strings(&["first", "Home"]), 2).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedRow { ref sheet, row: 2, .. } if sheet == "Projects"
        ));
    }

    #[test]
    fn status_column_constant_matches_header() {
        assert_eq!(Worksheet::Tasks.headers()[TASK_STATUS_COL - 1], "Status");
    }
}
