use std::fmt;

/// Typed form of the opaque callback tokens carried by inline buttons.
///
/// The wire strings are stable: they are baked into keyboards of messages
/// that may be pressed long after a redeploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    MainMenu,
    Projects,
    Tasks,
    Notes,
    Secrets,
    CreateProject,
    SelectProjectForTask,
    /// Project chosen in the picker; the next free text becomes a task in it.
    ProjectSelected(u64),
    /// Show the tasks of one project.
    ProjectTasks(u64),
    /// Add-task button on a single-project screen; routes back through the
    /// project picker.
    AddTaskToProject(u64),
    AddNote,
    AddSecret,
}

impl CallbackAction {
    pub fn encode(self) -> String {
        match self {
            CallbackAction::MainMenu => "main_menu".to_string(),
            CallbackAction::Projects => "projects".to_string(),
            CallbackAction::Tasks => "tasks".to_string(),
            CallbackAction::Notes => "notes".to_string(),
            CallbackAction::Secrets => "secrets".to_string(),
            CallbackAction::CreateProject => "create_project".to_string(),
            CallbackAction::SelectProjectForTask => "select_project_for_task".to_string(),
            CallbackAction::ProjectSelected(id) => format!("selected_project_{id}"),
            CallbackAction::ProjectTasks(id) => format!("project_tasks_{id}"),
            CallbackAction::AddTaskToProject(id) => format!("add_task_to_project_{id}"),
            CallbackAction::AddNote => "add_note".to_string(),
            CallbackAction::AddSecret => "add_secret".to_string(),
        }
    }

    /// Parse a wire token. Unknown tokens return `None` and are ignored by
    /// the dispatcher rather than treated as errors.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "main_menu" => return Some(CallbackAction::MainMenu),
            "projects" => return Some(CallbackAction::Projects),
            "tasks" => return Some(CallbackAction::Tasks),
            "notes" => return Some(CallbackAction::Notes),
            "secrets" => return Some(CallbackAction::Secrets),
            "create_project" => return Some(CallbackAction::CreateProject),
            "select_project_for_task" => return Some(CallbackAction::SelectProjectForTask),
            "add_note" => return Some(CallbackAction::AddNote),
            "add_secret" => return Some(CallbackAction::AddSecret),
            _ => {}
        }
        if let Some(rest) = token.strip_prefix("selected_project_") {
            return rest.parse().ok().map(CallbackAction::ProjectSelected);
        }
        if let Some(rest) = token.strip_prefix("project_tasks_") {
            return rest.parse().ok().map(CallbackAction::ProjectTasks);
        }
        if let Some(rest) = token.strip_prefix("add_task_to_project_") {
            return rest.parse().ok().map(CallbackAction::AddTaskToProject);
        }
        None
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let actions = [
            CallbackAction::MainMenu,
            CallbackAction::Projects,
            CallbackAction::Tasks,
            CallbackAction::Notes,
            CallbackAction::Secrets,
            CallbackAction::CreateProject,
            CallbackAction::SelectProjectForTask,
            CallbackAction::ProjectSelected(7),
            CallbackAction::ProjectTasks(12),
            CallbackAction::AddTaskToProject(3),
            CallbackAction::AddNote,
            CallbackAction::AddSecret,
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.encode()), Some(action));
        }
    }

    #[test]
    fn unknown_tokens_rejected() {
        assert_eq!(CallbackAction::parse("delete_everything"), None);
        assert_eq!(CallbackAction::parse("selected_project_abc"), None);
        assert_eq!(CallbackAction::parse(""), None);
    }
}
