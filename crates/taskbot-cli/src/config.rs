use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use taskbot_sheets::auth::{Credentials, ServiceAccountKey};
use taskbot_sheets::client::SheetsClient;
use taskbot_sheets::store::SheetsStore;
use taskbot_telegram::client::Bot;

pub const DEFAULT_CONFIG_FILE: &str = "taskbot.yaml";

/// On-disk config file. Every field is optional; flags and env vars win.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads `taskbot.yaml` from the working directory if present,
    /// otherwise an empty config.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved runtime configuration: CLI flags / env vars layered over the
/// config file.
#[derive(Debug)]
pub struct Config {
    pub bot_token: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub credentials_file: Option<PathBuf>,
    pub access_token: Option<String>,
}

impl Config {
    pub fn resolve(
        config_file: Option<&Path>,
        bot_token: Option<String>,
        spreadsheet_id: Option<String>,
        credentials_file: Option<PathBuf>,
        access_token: Option<String>,
    ) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::load_default()?,
        };
        Ok(Self {
            bot_token: bot_token.or(file.bot_token),
            spreadsheet_id: spreadsheet_id.or(file.spreadsheet_id),
            credentials_file: credentials_file.or(file.credentials_file),
            access_token: access_token.or(file.access_token),
        })
    }

    pub fn bot(&self) -> anyhow::Result<Bot> {
        let token = self.bot_token.as_deref().context(
            "bot token not configured (set --token, TASKBOT_TOKEN, or bot_token in taskbot.yaml)",
        )?;
        Ok(Bot::new(token))
    }

    pub fn sheets_store(&self) -> anyhow::Result<SheetsStore> {
        let spreadsheet_id = self.spreadsheet_id.clone().context(
            "spreadsheet id not configured (set --spreadsheet-id, TASKBOT_SPREADSHEET_ID, \
             or spreadsheet_id in taskbot.yaml)",
        )?;
        let credentials = if let Some(token) = &self.access_token {
            Credentials::Static(token.clone())
        } else if let Some(path) = &self.credentials_file {
            Credentials::ServiceAccount(ServiceAccountKey::from_file(path)?)
        } else {
            bail!(
                "no Sheets credentials configured (set --credentials, TASKBOT_CREDENTIALS, \
                 or credentials_file in taskbot.yaml)"
            );
        };
        Ok(SheetsStore::new(SheetsClient::new(
            spreadsheet_id,
            credentials,
        )))
    }
}
