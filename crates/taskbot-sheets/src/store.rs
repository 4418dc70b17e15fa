use crate::client::SheetsClient;
use crate::schema::{self, Worksheet, TASK_STATUS_COL};
use async_trait::async_trait;
use std::collections::HashMap;
use taskbot_core::note::{NewNote, Note};
use taskbot_core::project::{NewProject, Project};
use taskbot_core::secret::{NewSecret, Secret};
use taskbot_core::task::{NewTask, Task};
use taskbot_core::types::{now_stamp, TaskStatus};
use taskbot_core::{Result, Store, StoreError};
use tracing::{info, warn};

/// [`Store`] backed by one spreadsheet, one worksheet per record kind.
///
/// No locking and no transactions: a concurrent writer in another process
/// can still race id assignment. Within this process the single dispatch
/// loop serializes writes.
pub struct SheetsStore {
    client: SheetsClient,
}

impl std::fmt::Debug for SheetsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsStore").finish_non_exhaustive()
    }
}

/// One data row: its 1-based sheet row number and its cells.
type NumberedRow = (usize, Vec<String>);

impl SheetsStore {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    /// Idempotent bootstrap: create any missing worksheet with its header
    /// row. Existing worksheets are never touched, so re-running on a
    /// populated spreadsheet is safe.
    pub async fn ensure_worksheets(&self) -> Result<()> {
        let existing = self.client.worksheets().await?;
        for ws in Worksheet::all() {
            if existing.iter().any(|info| info.title == ws.title()) {
                continue;
            }
            info!(worksheet = ws.title(), "creating missing worksheet");
            self.client.add_worksheet(ws.title()).await?;
            let headers: Vec<String> = ws.headers().iter().map(|h| h.to_string()).collect();
            self.client.append_row(ws.title(), &headers).await?;
        }
        Ok(())
    }

    /// Data rows of one worksheet, numbered with their sheet row (header is
    /// row 1, first record row 2). Rows whose id cell doesn't parse are
    /// logged and skipped rather than failing the whole listing.
    async fn rows(&self, ws: Worksheet) -> Result<Vec<NumberedRow>> {
        let values = self.client.values(ws.title()).await?;
        Ok(values
            .into_iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| (i + 1, row))
            .collect())
    }

    fn next_id(rows: &[NumberedRow]) -> u64 {
        rows.iter()
            .filter_map(|(_, row)| row.first().and_then(|c| c.trim().parse::<u64>().ok()))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// id → sheet row number, rebuilt from one fetch. First match wins if a
    /// legacy sheet carries duplicate ids.
    fn row_index(rows: &[NumberedRow]) -> HashMap<u64, usize> {
        let mut index = HashMap::new();
        for (sheet_row, row) in rows {
            if let Some(id) = row.first().and_then(|c| c.trim().parse::<u64>().ok()) {
                index.entry(id).or_insert(*sheet_row);
            }
        }
        index
    }

    fn decode<T>(
        ws: Worksheet,
        rows: Vec<NumberedRow>,
        decode: impl Fn(&[String], usize) -> Result<T>,
    ) -> Vec<T> {
        rows.iter()
            .filter_map(|(sheet_row, row)| match decode(row, *sheet_row) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(worksheet = ws.title(), row = sheet_row, error = %err, "skipping bad row");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl Store for SheetsStore {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let rows = self.rows(Worksheet::Projects).await?;
        Ok(Self::decode(Worksheet::Projects, rows, schema::project_from_row))
    }

    async fn create_project(&self, new: NewProject) -> Result<u64> {
        let rows = self.rows(Worksheet::Projects).await?;
        let id = Self::next_id(&rows);
        let row = schema::project_to_row(id, &new, &now_stamp());
        self.client.append_row(Worksheet::Projects.title(), &row).await?;
        Ok(id)
    }

    async fn delete_project(&self, id: u64) -> Result<bool> {
        let rows = self.rows(Worksheet::Projects).await?;
        let Some(&sheet_row) = Self::row_index(&rows).get(&id) else {
            return Ok(false);
        };
        let sheet_id = self
            .client
            .worksheets()
            .await?
            .into_iter()
            .find(|info| info.title == Worksheet::Projects.title())
            .ok_or_else(|| StoreError::WorksheetMissing(Worksheet::Projects.title().to_string()))?
            .sheet_id;
        // deleteDimension indexes rows from 0
        self.client.delete_row(sheet_id, sheet_row - 1).await?;
        Ok(true)
    }

    async fn list_tasks(&self, project: Option<&str>) -> Result<Vec<Task>> {
        let rows = self.rows(Worksheet::Tasks).await?;
        let mut tasks = Self::decode(Worksheet::Tasks, rows, schema::task_from_row);
        if let Some(project) = project {
            tasks.retain(|t| t.project == project);
        }
        Ok(tasks)
    }

    async fn create_task(&self, new: NewTask) -> Result<u64> {
        let rows = self.rows(Worksheet::Tasks).await?;
        let id = Self::next_id(&rows);
        let row = schema::task_to_row(id, &new, &now_stamp());
        self.client.append_row(Worksheet::Tasks.title(), &row).await?;
        Ok(id)
    }

    async fn update_task_status(&self, id: u64, status: TaskStatus) -> Result<bool> {
        let rows = self.rows(Worksheet::Tasks).await?;
        let Some(&sheet_row) = Self::row_index(&rows).get(&id) else {
            return Ok(false);
        };
        self.client
            .update_cell(
                Worksheet::Tasks.title(),
                sheet_row,
                TASK_STATUS_COL,
                status.as_str(),
            )
            .await?;
        Ok(true)
    }

    async fn list_notes(&self, project: Option<&str>) -> Result<Vec<Note>> {
        let rows = self.rows(Worksheet::Notes).await?;
        let mut notes = Self::decode(Worksheet::Notes, rows, schema::note_from_row);
        if let Some(project) = project {
            notes.retain(|n| n.project == project);
        }
        Ok(notes)
    }

    async fn create_note(&self, new: NewNote) -> Result<u64> {
        let rows = self.rows(Worksheet::Notes).await?;
        let id = Self::next_id(&rows);
        let row = schema::note_to_row(id, &new, &now_stamp());
        self.client.append_row(Worksheet::Notes.title(), &row).await?;
        Ok(id)
    }

    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        let rows = self.rows(Worksheet::Secrets).await?;
        Ok(Self::decode(Worksheet::Secrets, rows, schema::secret_from_row))
    }

    async fn create_secret(&self, new: NewSecret) -> Result<u64> {
        let rows = self.rows(Worksheet::Secrets).await?;
        let id = Self::next_id(&rows);
        let row = schema::secret_to_row(id, &new, &now_stamp());
        self.client.append_row(Worksheet::Secrets.title(), &row).await?;
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
