use crate::config::Config;

/// Create the `Projects`, `Tasks`, `Notes`, and `Secrets` worksheets (with
/// header rows) if they don't exist yet. Idempotent.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let store = config.sheets_store()?;
    store.ensure_worksheets().await?;
    println!("spreadsheet is ready");
    Ok(())
}
