use crate::output::{print_json, print_table};
use clap::Subcommand;
use taskbot_core::Store;

#[derive(Subcommand)]
pub enum SecretSubcommand {
    /// List secret metadata (the stored values are never printed)
    List,
}

pub async fn run(store: &dyn Store, subcmd: SecretSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SecretSubcommand::List => list(store, json).await,
    }
}

async fn list(store: &dyn Store, json: bool) -> anyhow::Result<()> {
    let secrets = store.list_secrets().await?;
    if json {
        // Secret's Serialize impl skips the data field.
        return print_json(&secrets);
    }
    let rows = secrets
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.description.clone(),
                s.created.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DESCRIPTION", "CREATED"], rows);
    Ok(())
}
