use crate::error::Result;
use crate::note::{NewNote, Note};
use crate::project::{NewProject, Project};
use crate::secret::{NewSecret, Secret};
use crate::task::{NewTask, Task};
use crate::types::TaskStatus;
use async_trait::async_trait;

/// Data-access contract over the four record collections.
///
/// All listings preserve creation (row) order. Creation assigns the new id
/// as max-existing-id + 1 (1 on an empty collection), so ids stay unique
/// under deletion. Update/delete return `Ok(false)` for an unknown id —
/// that's a lookup miss, not a backend failure.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, new: NewProject) -> Result<u64>;
    /// Removes the project row only; its tasks are left untouched.
    async fn delete_project(&self, id: u64) -> Result<bool>;

    /// `project = Some(name)` filters to tasks whose project field equals
    /// that name exactly.
    async fn list_tasks(&self, project: Option<&str>) -> Result<Vec<Task>>;
    async fn create_task(&self, new: NewTask) -> Result<u64>;
    async fn update_task_status(&self, id: u64, status: TaskStatus) -> Result<bool>;

    async fn list_notes(&self, project: Option<&str>) -> Result<Vec<Note>>;
    async fn create_note(&self, new: NewNote) -> Result<u64>;

    async fn list_secrets(&self) -> Result<Vec<Secret>>;
    async fn create_secret(&self, new: NewSecret) -> Result<u64>;
}
