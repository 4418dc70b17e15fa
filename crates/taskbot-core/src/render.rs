//! Screen rendering: message text plus inline keyboard, as plain data.
//!
//! Pure functions — the transport layer decides whether a screen replaces
//! the triggering message or goes out as a new one.

use crate::callback::CallbackAction;
use crate::note::Note;
use crate::project::Project;
use crate::secret::Secret;
use crate::task::{group_by_project, Task};

/// At most this many project buttons on the list screen.
pub const PROJECT_BUTTON_CAP: usize = 10;
/// Per-project cap on the aggregate task screen. Single-project view is uncapped.
pub const TASKS_PER_GROUP: usize = 5;
pub const NOTES_CAP: usize = 10;
pub const SECRETS_CAP: usize = 5;
/// Note content preview length, in characters.
pub const NOTE_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of buttons, one button per row in most screens.
pub type Keyboard = Vec<Vec<Button>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Keyboard,
}

fn row(label: impl Into<String>, action: CallbackAction) -> Vec<Button> {
    vec![Button::new(label, action)]
}

fn main_menu_row() -> Vec<Button> {
    row("🏠 Main menu", CallbackAction::MainMenu)
}

// ---------------------------------------------------------------------------
// Menus and listings
// ---------------------------------------------------------------------------

pub fn main_menu() -> Screen {
    Screen {
        text: "🏠 Main menu\n\nPick an action:".to_string(),
        keyboard: vec![
            row("📋 Projects", CallbackAction::Projects),
            row("✅ Tasks", CallbackAction::Tasks),
            row("📝 Notes", CallbackAction::Notes),
            row("🔐 Secrets", CallbackAction::Secrets),
            row("➕ New project", CallbackAction::CreateProject),
            row("➕ New task", CallbackAction::SelectProjectForTask),
            row("➕ New note", CallbackAction::AddNote),
            row("➕ New secret", CallbackAction::AddSecret),
        ],
    }
}

pub fn projects(projects: &[Project]) -> Screen {
    if projects.is_empty() {
        return Screen {
            text: "📭 No projects yet. Create the first one!".to_string(),
            keyboard: vec![
                row("➕ New project", CallbackAction::CreateProject),
                main_menu_row(),
            ],
        };
    }

    let mut text = String::from("📁 Your projects:\n\n");
    for project in projects {
        text.push_str(&format!("🔹 {}. {}\n", project.id, project.name));
        if !project.description.is_empty() {
            text.push_str(&format!("   {}\n", project.description));
        }
        text.push('\n');
    }

    let mut keyboard: Keyboard = projects
        .iter()
        .take(PROJECT_BUTTON_CAP)
        .map(|p| row(format!("📝 {}", p.name), CallbackAction::ProjectTasks(p.id)))
        .collect();
    keyboard.push(row("➕ New project", CallbackAction::CreateProject));
    keyboard.push(main_menu_row());

    Screen { text, keyboard }
}

/// All tasks, grouped by project name, at most [`TASKS_PER_GROUP`] shown per
/// group.
pub fn tasks_overview(tasks: &[Task]) -> Screen {
    if tasks.is_empty() {
        return Screen {
            text: "📭 No tasks yet. Create the first one!".to_string(),
            keyboard: vec![
                row("➕ New task", CallbackAction::SelectProjectForTask),
                main_menu_row(),
            ],
        };
    }

    let mut text = String::from("✅ Your tasks:\n\n");
    for (project, group) in group_by_project(tasks) {
        text.push_str(&format!("📁 {project}:\n"));
        for task in group.iter().take(TASKS_PER_GROUP) {
            text.push_str(&format!(
                "  {} {} {}. {}\n",
                task.status.icon(),
                task.priority.icon(),
                task.id,
                task.title
            ));
            if !task.deadline.is_empty() {
                text.push_str(&format!("     📅 {}\n", task.deadline));
            }
        }
        text.push('\n');
    }

    Screen {
        text,
        keyboard: vec![
            row("➕ New task", CallbackAction::SelectProjectForTask),
            main_menu_row(),
        ],
    }
}

/// One project's tasks, uncapped.
pub fn project_tasks(project_id: u64, name: &str, tasks: &[Task]) -> Screen {
    let text = if tasks.is_empty() {
        format!("📭 No tasks in '{name}'")
    } else {
        let mut text = format!("✅ Tasks in '{name}':\n\n");
        for task in tasks {
            text.push_str(&format!(
                "{} {} {}. {}\n",
                task.status.icon(),
                task.priority.icon(),
                task.id,
                task.title
            ));
            if !task.description.is_empty() {
                text.push_str(&format!("   {}\n", task.description));
            }
            if !task.deadline.is_empty() {
                text.push_str(&format!("   📅 {}\n", task.deadline));
            }
            text.push('\n');
        }
        text
    };

    Screen {
        text,
        keyboard: vec![
            row("➕ New task", CallbackAction::AddTaskToProject(project_id)),
            row("📋 All projects", CallbackAction::Projects),
            main_menu_row(),
        ],
    }
}

/// Project picker shown before task creation. Every project gets a button;
/// with no projects the user is sent to create one first.
pub fn project_picker(projects: &[Project]) -> Screen {
    if projects.is_empty() {
        return Screen {
            text: "Create a project first!".to_string(),
            keyboard: vec![
                row("➕ New project", CallbackAction::CreateProject),
                main_menu_row(),
            ],
        };
    }

    let mut keyboard: Keyboard = projects
        .iter()
        .map(|p| row(p.name.clone(), CallbackAction::ProjectSelected(p.id)))
        .collect();
    keyboard.push(main_menu_row());

    Screen {
        text: "Pick a project for the new task:".to_string(),
        keyboard,
    }
}

pub fn notes(notes: &[Note]) -> Screen {
    if notes.is_empty() {
        return Screen {
            text: "📭 No notes yet. Create the first one!".to_string(),
            keyboard: vec![row("➕ New note", CallbackAction::AddNote), main_menu_row()],
        };
    }

    let mut text = String::from("📝 Your notes:\n\n");
    for note in notes.iter().take(NOTES_CAP) {
        text.push_str(&format!("📌 {}. {}\n", note.id, note.title));
        if !note.tags.is_empty() {
            text.push_str(&format!("   🏷️ {}\n", note.tags));
        }
        text.push_str(&format!("   {}\n", truncate(&note.content, NOTE_PREVIEW_CHARS)));
        text.push_str(&format!("   📅 {}\n\n", note.created));
    }
    if notes.len() > NOTES_CAP {
        text.push_str(&format!("… and {} more notes\n\n", notes.len() - NOTES_CAP));
    }

    Screen {
        text,
        keyboard: vec![row("➕ New note", CallbackAction::AddNote), main_menu_row()],
    }
}

/// Secret values are never rendered — name, description, and timestamp only.
pub fn secrets(secrets: &[Secret]) -> Screen {
    if secrets.is_empty() {
        return Screen {
            text: "📭 No secrets yet. Add the first one!".to_string(),
            keyboard: vec![
                row("➕ New secret", CallbackAction::AddSecret),
                main_menu_row(),
            ],
        };
    }

    let mut text = String::from("🔐 Your secrets:\n\n");
    for secret in secrets.iter().take(SECRETS_CAP) {
        text.push_str(&format!("🔒 {}. {}\n", secret.id, secret.name));
        if !secret.description.is_empty() {
            text.push_str(&format!("   {}\n", secret.description));
        }
        text.push_str(&format!("   📅 {}\n\n", secret.created));
    }
    if secrets.len() > SECRETS_CAP {
        text.push_str(&format!(
            "… and {} more secrets\n\n",
            secrets.len() - SECRETS_CAP
        ));
    }

    Screen {
        text,
        keyboard: vec![
            row("➕ New secret", CallbackAction::AddSecret),
            main_menu_row(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Creation prompts
// ---------------------------------------------------------------------------

pub fn project_prompt() -> Screen {
    Screen {
        text: "Enter the project name and description (newline-separated):\n\
               Example:\n\
               My project\n\
               What it is about"
            .to_string(),
        keyboard: vec![main_menu_row()],
    }
}

pub fn task_prompt(project: &str) -> Screen {
    Screen {
        text: format!(
            "Creating a task in: {project}\n\n\
             Enter the task as:\n\
             Title\n\
             Description (optional)\n\
             Priority (high/medium/low, optional)\n\
             Deadline (optional, YYYY-MM-DD)"
        ),
        keyboard: vec![main_menu_row()],
    }
}

pub fn note_prompt() -> Screen {
    Screen {
        text: "Enter the note as:\n\
               Title\n\
               Content\n\
               Tags (optional, comma-separated)\n\
               Project (optional)"
            .to_string(),
        keyboard: vec![main_menu_row()],
    }
}

pub fn secret_prompt() -> Screen {
    Screen {
        text: "Enter the secret as:\n\
               Name\n\
               Description\n\
               Data (login/password etc.)"
            .to_string(),
        keyboard: vec![main_menu_row()],
    }
}

// ---------------------------------------------------------------------------
// Failure screens
// ---------------------------------------------------------------------------

/// Rendered when a listing fails — distinct from an empty listing. The
/// error itself goes to the log, not to the chat.
pub fn store_unavailable() -> Screen {
    Screen {
        text: "⚠️ Couldn't reach storage. Try again in a moment.".to_string(),
        keyboard: vec![main_menu_row()],
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars).collect();
    format!("{cut}…")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
