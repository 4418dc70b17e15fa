use crate::error::Result;
use crate::note::{NewNote, Note};
use crate::project::{NewProject, Project};
use crate::secret::{NewSecret, Secret};
use crate::store::Store;
use crate::task::{NewTask, Task};
use crate::types::{now_stamp, TaskStatus};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory [`Store`] with the same id-assignment and ordering semantics as
/// the spreadsheet backend. Substrate for controller tests and `run
/// --memory` dry runs; nothing survives process exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    notes: Vec<Note>,
    secrets: Vec<Secret>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.inner.lock().expect("store poisoned").projects.clone())
    }

    async fn create_project(&self, new: NewProject) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store poisoned");
        let id = next_id(inner.projects.iter().map(|p| p.id));
        inner.projects.push(Project {
            id,
            name: new.name,
            description: new.description,
            created: now_stamp(),
            status: new.status,
        });
        Ok(id)
    }

    async fn delete_project(&self, id: u64) -> Result<bool> {
        let mut inner = self.inner.lock().expect("store poisoned");
        let before = inner.projects.len();
        inner.projects.retain(|p| p.id != id);
        Ok(inner.projects.len() < before)
    }

    async fn list_tasks(&self, project: Option<&str>) -> Result<Vec<Task>> {
        let inner = self.inner.lock().expect("store poisoned");
        Ok(inner
            .tasks
            .iter()
            .filter(|t| project.is_none_or(|p| t.project == p))
            .cloned()
            .collect())
    }

    async fn create_task(&self, new: NewTask) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store poisoned");
        let id = next_id(inner.tasks.iter().map(|t| t.id));
        inner.tasks.push(Task {
            id,
            project: new.project,
            title: new.title,
            description: new.description,
            status: TaskStatus::Todo,
            priority: new.priority,
            deadline: new.deadline,
            created: now_stamp(),
        });
        Ok(id)
    }

    async fn update_task_status(&self, id: u64, status: TaskStatus) -> Result<bool> {
        let mut inner = self.inner.lock().expect("store poisoned");
        match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_notes(&self, project: Option<&str>) -> Result<Vec<Note>> {
        let inner = self.inner.lock().expect("store poisoned");
        Ok(inner
            .notes
            .iter()
            .filter(|n| project.is_none_or(|p| n.project == p))
            .cloned()
            .collect())
    }

    async fn create_note(&self, new: NewNote) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store poisoned");
        let id = next_id(inner.notes.iter().map(|n| n.id));
        inner.notes.push(Note {
            id,
            title: new.title,
            content: new.content,
            tags: new.tags,
            created: now_stamp(),
            project: new.project,
        });
        Ok(id)
    }

    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        Ok(self.inner.lock().expect("store poisoned").secrets.clone())
    }

    async fn create_secret(&self, new: NewSecret) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store poisoned");
        let id = next_id(inner.secrets.iter().map(|s| s.id));
        inner.secrets.push(Secret {
            id,
            name: new.name,
            description: new.description,
            created: now_stamp(),
            data: new.data,
        });
        Ok(id)
    }
}
