//! Conversation controller: one inbound event in, one [`Response`] out.
//!
//! The controller owns every state decision; the transport layer only
//! executes the response (answer the callback, send confirmations, render
//! the screen in place or as a new message).

use crate::callback::CallbackAction;
use crate::error::StoreError;
use crate::event::{Command, Event};
use crate::render::{self, Screen};
use crate::session::{Awaiting, SessionMap};
use crate::store::Store;
use crate::{note, project, secret, task};
use tracing::warn;

/// Everything the transport layer must do for one event.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// Screen to render via the edit-or-send contract.
    pub screen: Option<Screen>,
    /// Plain confirmations/errors, always sent as new messages, before the
    /// screen.
    pub messages: Vec<String>,
    /// Transient callback notice (lookup misses).
    pub notice: Option<String>,
}

impl Response {
    fn ignore() -> Self {
        Self::default()
    }

    fn screen(screen: Screen) -> Self {
        Self {
            screen: Some(screen),
            ..Self::default()
        }
    }

    fn notice(text: impl Into<String>) -> Self {
        Self {
            notice: Some(text.into()),
            ..Self::default()
        }
    }

    fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            ..Self::default()
        }
    }
}

/// Handle one inbound event for one user. Never fails: backend errors become
/// user-facing output, distinct from empty results.
pub async fn handle_event<S: Store + ?Sized>(
    store: &S,
    sessions: &SessionMap,
    user: i64,
    event: Event,
) -> Response {
    match event {
        Event::Command(cmd) => handle_command(store, cmd).await,
        Event::Callback(action) => handle_callback(store, sessions, user, action).await,
        Event::Text(text) => handle_text(store, sessions, user, &text).await,
    }
}

async fn handle_command<S: Store + ?Sized>(store: &S, cmd: Command) -> Response {
    match cmd {
        Command::Start => Response::screen(render::main_menu()),
        Command::Projects => list_projects(store).await,
        Command::Tasks => list_tasks(store).await,
        Command::Notes => list_notes(store).await,
    }
}

async fn handle_callback<S: Store + ?Sized>(
    store: &S,
    sessions: &SessionMap,
    user: i64,
    action: CallbackAction,
) -> Response {
    match action {
        // Main menu cancels any pending input; other navigation leaves it.
        CallbackAction::MainMenu => {
            sessions.clear(user);
            Response::screen(render::main_menu())
        }
        CallbackAction::Projects => list_projects(store).await,
        CallbackAction::Tasks => list_tasks(store).await,
        CallbackAction::Notes => list_notes(store).await,
        CallbackAction::Secrets => match store.list_secrets().await {
            Ok(secrets) => Response::screen(render::secrets(&secrets)),
            Err(err) => storage_failed("secrets", &err),
        },
        CallbackAction::CreateProject => {
            sessions.set_awaiting(user, Awaiting::Project);
            Response::screen(render::project_prompt())
        }
        CallbackAction::SelectProjectForTask | CallbackAction::AddTaskToProject(_) => {
            match store.list_projects().await {
                Ok(projects) => Response::screen(render::project_picker(&projects)),
                Err(err) => storage_failed("projects", &err),
            }
        }
        CallbackAction::ProjectSelected(id) => match store.list_projects().await {
            Ok(projects) => match projects.iter().find(|p| p.id == id) {
                Some(project) => {
                    sessions.set_awaiting(
                        user,
                        Awaiting::Task {
                            project: Some(project.name.clone()),
                        },
                    );
                    Response::screen(render::task_prompt(&project.name))
                }
                None => Response::notice("Project not found"),
            },
            Err(err) => storage_failed("projects", &err),
        },
        CallbackAction::ProjectTasks(id) => match store.list_projects().await {
            Ok(projects) => match projects.iter().find(|p| p.id == id) {
                Some(project) => match store.list_tasks(Some(&project.name)).await {
                    Ok(tasks) => {
                        Response::screen(render::project_tasks(project.id, &project.name, &tasks))
                    }
                    Err(err) => storage_failed("tasks", &err),
                },
                None => Response::notice("Project not found"),
            },
            Err(err) => storage_failed("projects", &err),
        },
        CallbackAction::AddNote => {
            sessions.set_awaiting(user, Awaiting::Note);
            Response::screen(render::note_prompt())
        }
        CallbackAction::AddSecret => {
            sessions.set_awaiting(user, Awaiting::Secret);
            Response::screen(render::secret_prompt())
        }
    }
}

/// Free text: only meaningful while awaiting input. On a validation error
/// the awaiting flag is kept so the user can retry; after a create attempt
/// (success or backend failure) it is cleared and the main menu re-rendered.
async fn handle_text<S: Store + ?Sized>(
    store: &S,
    sessions: &SessionMap,
    user: i64,
    text: &str,
) -> Response {
    let Some(awaiting) = sessions.awaiting(user) else {
        return Response::ignore();
    };

    let mut response = match awaiting {
        Awaiting::Project => match project::parse_input(text) {
            Ok(new) => {
                let name = new.name.clone();
                created_message(
                    store.create_project(new).await,
                    &format!("Project '{name}'"),
                )
            }
            Err(err) => return Response::message(format!("❌ Invalid format: {err}")),
        },
        Awaiting::Task { project } => match task::parse_input(text, project.as_deref()) {
            Ok(new) => {
                let title = new.title.clone();
                created_message(store.create_task(new).await, &format!("Task '{title}'"))
            }
            Err(err) => return Response::message(format!("❌ Invalid format: {err}")),
        },
        Awaiting::Note => match note::parse_input(text) {
            Ok(new) => {
                let title = new.title.clone();
                created_message(store.create_note(new).await, &format!("Note '{title}'"))
            }
            Err(err) => return Response::message(format!("❌ Invalid format: {err}")),
        },
        Awaiting::Secret => match secret::parse_input(text) {
            Ok(new) => {
                let name = new.name.clone();
                created_message(store.create_secret(new).await, &format!("Secret '{name}'"))
            }
            Err(err) => return Response::message(format!("❌ Invalid format: {err}")),
        },
    };

    sessions.clear(user);
    response.screen = Some(render::main_menu());
    response
}

fn created_message(result: crate::error::Result<u64>, what: &str) -> Response {
    match result {
        Ok(id) => Response::message(format!("✅ {what} created! ID: {id}")),
        Err(err) => {
            warn!(error = %err, "create failed");
            Response::message(format!("❌ {what} not created: storage error ({err})"))
        }
    }
}

fn storage_failed(what: &str, err: &StoreError) -> Response {
    warn!(error = %err, "listing {what} failed");
    Response::screen(render::store_unavailable())
}

async fn list_projects<S: Store + ?Sized>(store: &S) -> Response {
    match store.list_projects().await {
        Ok(projects) => Response::screen(render::projects(&projects)),
        Err(err) => storage_failed("projects", &err),
    }
}

async fn list_tasks<S: Store + ?Sized>(store: &S) -> Response {
    match store.list_tasks(None).await {
        Ok(tasks) => Response::screen(render::tasks_overview(&tasks)),
        Err(err) => storage_failed("tasks", &err),
    }
}

async fn list_notes<S: Store + ?Sized>(store: &S) -> Response {
    match store.list_notes(None).await {
        Ok(notes) => Response::screen(render::notes(&notes)),
        Err(err) => storage_failed("notes", &err),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::memory::MemoryStore;
    use crate::note::{NewNote, Note};
    use crate::project::{NewProject, Project};
    use crate::secret::{NewSecret, Secret};
    use crate::task::NewTask;
    use crate::types::{Priority, TaskStatus};
    use async_trait::async_trait;

    const USER: i64 = 42;

    async fn press<S: Store + ?Sized>(
        store: &S,
        sessions: &SessionMap,
        action: CallbackAction,
    ) -> Response {
        handle_event(store, sessions, USER, Event::Callback(action)).await
    }

    async fn say<S: Store + ?Sized>(store: &S, sessions: &SessionMap, text: &str) -> Response {
        handle_event(store, sessions, USER, Event::Text(text.to_string())).await
    }

    #[tokio::test]
    async fn idle_text_is_ignored() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        let response = say(&store, &sessions, "random chatter").await;
        assert_eq!(response, Response::default());
        assert!(store.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_project_flow() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();

        let prompt = press(&store, &sessions, CallbackAction::CreateProject).await;
        assert!(prompt.screen.unwrap().text.contains("project name"));
        assert_eq!(sessions.awaiting(USER), Some(Awaiting::Project));

        let response = say(&store, &sessions, "Home\nChores").await;
        assert_eq!(response.messages, ["✅ Project 'Home' created! ID: 1"]);
        assert!(response.screen.is_some());
        assert_eq!(sessions.awaiting(USER), None);

        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects[0].name, "Home");
        assert_eq!(projects[0].status, "active");
    }

    #[tokio::test]
    async fn task_flow_end_to_end() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        store
            .create_project(NewProject::new("Home", ""))
            .await
            .unwrap();

        press(&store, &sessions, CallbackAction::ProjectSelected(1)).await;
        assert_eq!(
            sessions.awaiting(USER),
            Some(Awaiting::Task {
                project: Some("Home".to_string())
            })
        );

        say(&store, &sessions, "Buy milk\n\nhigh\n2025-01-01").await;
        let tasks = store.list_tasks(None).await.unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.deadline, "2025-01-01");
        assert_eq!(task.project, "Home");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn short_note_keeps_awaiting_and_creates_nothing() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        press(&store, &sessions, CallbackAction::AddNote).await;

        let response = say(&store, &sessions, "Ideas").await;
        assert_eq!(response.messages.len(), 1);
        assert!(response.messages[0].contains("Invalid format"));
        assert!(response.screen.is_none());
        assert_eq!(sessions.awaiting(USER), Some(Awaiting::Note));
        assert!(store.list_notes(None).await.unwrap().is_empty());

        // retry with corrected input succeeds
        let response = say(&store, &sessions, "Ideas\nTry the new API").await;
        assert_eq!(response.messages, ["✅ Note 'Ideas' created! ID: 1"]);
        assert_eq!(sessions.awaiting(USER), None);
    }

    #[tokio::test]
    async fn main_menu_cancels_pending_input() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        press(&store, &sessions, CallbackAction::AddSecret).await;
        assert_eq!(sessions.awaiting(USER), Some(Awaiting::Secret));

        press(&store, &sessions, CallbackAction::MainMenu).await;
        assert_eq!(sessions.awaiting(USER), None);

        // stale text is now ignored instead of consumed as a secret
        say(&store, &sessions, "wifi\nrouter\nhunter2").await;
        assert!(store.list_secrets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_navigation_keeps_pending_input() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        press(&store, &sessions, CallbackAction::AddNote).await;
        press(&store, &sessions, CallbackAction::Projects).await;
        assert_eq!(sessions.awaiting(USER), Some(Awaiting::Note));
    }

    #[tokio::test]
    async fn unknown_project_selection_is_a_notice() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        let response = press(&store, &sessions, CallbackAction::ProjectSelected(9)).await;
        assert_eq!(response.notice.as_deref(), Some("Project not found"));
        assert_eq!(sessions.awaiting(USER), None);
    }

    #[tokio::test]
    async fn project_tasks_screen_filters_by_name() {
        let store = MemoryStore::new();
        let sessions = SessionMap::new();
        store
            .create_project(NewProject::new("Home", ""))
            .await
            .unwrap();
        for (project, title) in [("Home", "a"), ("Work", "b"), ("Home", "c")] {
            store
                .create_task(NewTask {
                    project: project.to_string(),
                    title: title.to_string(),
                    description: String::new(),
                    priority: Priority::Medium,
                    deadline: String::new(),
                })
                .await
                .unwrap();
        }

        let response = press(&store, &sessions, CallbackAction::ProjectTasks(1)).await;
        let text = response.screen.unwrap().text;
        assert!(text.contains("1. a"));
        assert!(text.contains("3. c"));
        assert!(!text.contains("2. b"));
    }

    // Store whose every call fails; proves failures render distinctly from
    // empty results.
    struct BrokenStore;

    fn broken<T>() -> Result<T> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    #[async_trait]
    impl Store for BrokenStore {
        async fn list_projects(&self) -> Result<Vec<Project>> {
            broken()
        }
        async fn create_project(&self, _new: NewProject) -> Result<u64> {
            broken()
        }
        async fn delete_project(&self, _id: u64) -> Result<bool> {
            broken()
        }
        async fn list_tasks(&self, _project: Option<&str>) -> Result<Vec<crate::task::Task>> {
            broken()
        }
        async fn create_task(&self, _new: NewTask) -> Result<u64> {
            broken()
        }
        async fn update_task_status(&self, _id: u64, _status: TaskStatus) -> Result<bool> {
            broken()
        }
        async fn list_notes(&self, _project: Option<&str>) -> Result<Vec<Note>> {
            broken()
        }
        async fn create_note(&self, _new: NewNote) -> Result<u64> {
            broken()
        }
        async fn list_secrets(&self) -> Result<Vec<Secret>> {
            broken()
        }
        async fn create_secret(&self, _new: NewSecret) -> Result<u64> {
            broken()
        }
    }

    #[tokio::test]
    async fn backend_failure_renders_distinctly_from_empty() {
        let sessions = SessionMap::new();

        let empty = press(&MemoryStore::new(), &sessions, CallbackAction::Projects).await;
        let failed = press(&BrokenStore, &sessions, CallbackAction::Projects).await;

        let empty_text = empty.screen.unwrap().text;
        let failed_text = failed.screen.unwrap().text;
        assert!(empty_text.contains("No projects"));
        assert!(failed_text.contains("Couldn't reach storage"));
        assert_ne!(empty_text, failed_text);
    }

    #[tokio::test]
    async fn failed_create_reports_and_clears_awaiting() {
        let sessions = SessionMap::new();
        press(&BrokenStore, &sessions, CallbackAction::CreateProject).await;

        let response = say(&BrokenStore, &sessions, "Home").await;
        assert!(response.messages[0].contains("not created"));
        assert!(response.screen.is_some());
        assert_eq!(sessions.awaiting(USER), None);
    }
}
