use crate::output::{print_json, print_table};
use anyhow::bail;
use clap::Subcommand;
use serde_json::json;
use taskbot_core::types::TaskStatus;
use taskbot_core::Store;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// List tasks, optionally filtered to one project name
    List {
        #[arg(long)]
        project: Option<String>,
    },
    /// Mark a task in progress
    Start { id: u64 },
    /// Mark a task done
    Done { id: u64 },
}

pub async fn run(store: &dyn Store, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::List { project } => list(store, project.as_deref(), json).await,
        TaskSubcommand::Start { id } => set_status(store, id, TaskStatus::InProgress, json).await,
        TaskSubcommand::Done { id } => set_status(store, id, TaskStatus::Done, json).await,
    }
}

async fn list(store: &dyn Store, project: Option<&str>, json: bool) -> anyhow::Result<()> {
    let tasks = store.list_tasks(project).await?;
    if json {
        return print_json(&tasks);
    }
    let rows = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.project.clone(),
                t.title.clone(),
                t.status.as_str().to_string(),
                t.priority.as_str().to_string(),
                t.deadline.clone(),
            ]
        })
        .collect();
    print_table(
        &["ID", "PROJECT", "TITLE", "STATUS", "PRIORITY", "DEADLINE"],
        rows,
    );
    Ok(())
}

async fn set_status(
    store: &dyn Store,
    id: u64,
    status: TaskStatus,
    json: bool,
) -> anyhow::Result<()> {
    if !store.update_task_status(id, status).await? {
        bail!("task {id} not found");
    }
    if json {
        print_json(&json!({ "id": id, "status": status.as_str() }))
    } else {
        println!("task {id} → {}", status.as_str());
        Ok(())
    }
}
