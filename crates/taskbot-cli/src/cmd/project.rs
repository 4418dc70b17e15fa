use crate::output::{print_json, print_table};
use anyhow::bail;
use clap::Subcommand;
use serde_json::json;
use taskbot_core::Store;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// List all projects
    List,
    /// Delete a project by id (its tasks are left untouched)
    Delete { id: u64 },
}

pub async fn run(store: &dyn Store, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::List => list(store, json).await,
        ProjectSubcommand::Delete { id } => delete(store, id, json).await,
    }
}

async fn list(store: &dyn Store, json: bool) -> anyhow::Result<()> {
    let projects = store.list_projects().await?;
    if json {
        return print_json(&projects);
    }
    let rows = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.status.clone(),
                p.created.clone(),
                p.description.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "CREATED", "DESCRIPTION"], rows);
    Ok(())
}

async fn delete(store: &dyn Store, id: u64, json: bool) -> anyhow::Result<()> {
    if !store.delete_project(id).await? {
        bail!("project {id} not found");
    }
    if json {
        print_json(&json!({ "id": id, "deleted": true }))
    } else {
        println!("deleted project {id}");
        Ok(())
    }
}
