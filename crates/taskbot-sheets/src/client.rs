use crate::auth::{Credentials, TokenProvider};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskbot_core::{Result, StoreError};

/// Thin HTTP wrapper over the Sheets v4 endpoints the store needs. All
/// semantics (ids, row lookup, bootstrap) live in [`crate::store`].
pub struct SheetsClient {
    http: reqwest::Client,
    base: String,
    spreadsheet_id: String,
    tokens: TokenProvider,
}

/// Numeric id + title of one worksheet, from spreadsheet metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    pub sheet_id: i64,
    pub title: String,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_base_url("https://sheets.googleapis.com", spreadsheet_id, credentials)
    }

    /// Point the client at a different API base. Used by tests against a
    /// local mock server.
    pub fn with_base_url(
        base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            spreadsheet_id: spreadsheet_id.into(),
            tokens: TokenProvider::new(credentials),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}{suffix}",
            self.base, self.spreadsheet_id
        )
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let bearer = self.tokens.bearer().await?;
        let response = request
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        // Decode through the body text so a garbled payload surfaces as
        // `Json`, not as a transport failure.
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// All values of one worksheet, header row included. A worksheet with no
    /// values at all comes back as an empty list (the API omits the field).
    pub async fn values(&self, title: &str) -> Result<Vec<Vec<String>>> {
        #[derive(Deserialize)]
        struct ValueRange {
            #[serde(default)]
            values: Vec<Vec<String>>,
        }
        let range: ValueRange = self
            .execute(self.http.get(self.url(&format!("/values/{title}"))))
            .await?;
        Ok(range.values)
    }

    pub async fn append_row(&self, title: &str, row: &[String]) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            values: [&'a [String]; 1],
        }
        self.execute::<serde_json::Value>(
            self.http
                .post(self.url(&format!(
                    "/values/{title}:append?valueInputOption=USER_ENTERED"
                )))
                .json(&Body { values: [row] }),
        )
        .await
        .map(|_| ())
    }

    /// Overwrite a single cell, addressed by 1-based row and column.
    pub async fn update_cell(
        &self,
        title: &str,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            values: [[&'a str; 1]; 1],
        }
        let a1 = format!("{title}!{}{row}", col_letter(col));
        self.execute::<serde_json::Value>(
            self.http
                .put(self.url(&format!("/values/{a1}?valueInputOption=USER_ENTERED")))
                .json(&Body { values: [[value]] }),
        )
        .await
        .map(|_| ())
    }

    pub async fn worksheets(&self) -> Result<Vec<WorksheetInfo>> {
        #[derive(Deserialize)]
        struct Metadata {
            #[serde(default)]
            sheets: Vec<Sheet>,
        }
        #[derive(Deserialize)]
        struct Sheet {
            properties: Properties,
        }
        #[derive(Deserialize)]
        struct Properties {
            #[serde(rename = "sheetId")]
            sheet_id: i64,
            title: String,
        }

        let metadata: Metadata = self
            .execute(self.http.get(self.url("?fields=sheets.properties")))
            .await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| WorksheetInfo {
                sheet_id: s.properties.sheet_id,
                title: s.properties.title,
            })
            .collect())
    }

    pub async fn add_worksheet(&self, title: &str) -> Result<()> {
        let body = serde_json::json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        self.execute::<serde_json::Value>(
            self.http.post(self.url(":batchUpdate")).json(&body),
        )
        .await
        .map(|_| ())
    }

    /// Delete one row by 0-based index. Subsequent rows shift up; record ids
    /// are not renumbered.
    pub async fn delete_row(&self, sheet_id: i64, row_index: usize) -> Result<()> {
        let body = serde_json::json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row_index,
                        "endIndex": row_index + 1
                    }
                }
            }]
        });
        self.execute::<serde_json::Value>(
            self.http.post(self.url(":batchUpdate")).json(&body),
        )
        .await
        .map(|_| ())
    }
}

/// 1-based column number to A1 letter(s). Our widest sheet has 8 columns,
/// but two letters are handled anyway.
fn col_letter(col: usize) -> String {
    debug_assert!(col >= 1);
    let mut col = col;
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}
