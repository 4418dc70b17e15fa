use crate::output::{print_json, print_table};
use clap::Subcommand;
use taskbot_core::Store;

#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// List notes, optionally filtered to one project name
    List {
        #[arg(long)]
        project: Option<String>,
    },
}

pub async fn run(store: &dyn Store, subcmd: NoteSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        NoteSubcommand::List { project } => list(store, project.as_deref(), json).await,
    }
}

async fn list(store: &dyn Store, project: Option<&str>, json: bool) -> anyhow::Result<()> {
    let notes = store.list_notes(project).await?;
    if json {
        return print_json(&notes);
    }
    let rows = notes
        .iter()
        .map(|n| {
            vec![
                n.id.to_string(),
                n.title.clone(),
                n.tags.clone(),
                n.project.clone(),
                n.created.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "TAGS", "PROJECT", "CREATED"], rows);
    Ok(())
}
