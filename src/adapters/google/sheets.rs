use crate::adapters::http::ensure_success;
use crate::domain::model::{Row, ValueInputOption, WorksheetRef};
use crate::domain::ports::{SpreadsheetService, TokenProvider};
use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// 涵蓋整個工作表的 A1 範圍，例如 `'Mano de obra'`
pub fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Google Sheets v4 REST 客戶端
pub struct SheetsClient<T: TokenProvider> {
    base_url: String,
    tokens: T,
    client: Client,
}

impl<T: TokenProvider> SheetsClient<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        Self {
            base_url: base_url.into(),
            tokens,
            client: Client::new(),
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| crate::utils::error::SyncError::config("Invalid Sheets API base URL"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, sheet: &WorksheetRef, suffix: &str) -> Result<Url> {
        let range = format!("{}{}", sheet_range(&sheet.title), suffix);
        self.url(&[sheet.spreadsheet_id.as_str(), "values", range.as_str()])
    }
}

impl<T: TokenProvider> SpreadsheetService for SheetsClient<T> {
    async fn find_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<Option<WorksheetRef>> {
        let token = self.tokens.access_token().await?;
        let url = self.url(&[spreadsheet_id])?;

        let response = self
            .client
            .get(url)
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(token)
            .send()
            .await?;
        let response = ensure_success(response, "Google Sheets open").await?;

        let meta: SpreadsheetMeta = response.json().await?;
        Ok(meta
            .sheets
            .iter()
            .any(|s| s.properties.title == title)
            .then(|| WorksheetRef::new(spreadsheet_id, title)))
    }

    async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: usize,
        cols: usize,
    ) -> Result<WorksheetRef> {
        let token = self.tokens.access_token().await?;
        let batch_update = format!("{}:batchUpdate", spreadsheet_id);
        let url = self.url(&[batch_update.as_str()])?;

        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": cols }
                    }
                }
            }]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        ensure_success(response, "Google Sheets addSheet").await?;

        Ok(WorksheetRef::new(spreadsheet_id, title))
    }

    async fn get_all_values(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        let token = self.tokens.access_token().await?;
        let url = self.values_url(sheet, "")?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = ensure_success(response, "Google Sheets get values").await?;

        let range: ValueRange = response.json().await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn clear(&self, sheet: &WorksheetRef) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let url = self.values_url(sheet, ":clear")?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({}))
            .send()
            .await?;
        ensure_success(response, "Google Sheets clear").await?;
        Ok(())
    }

    async fn append_rows(
        &self,
        sheet: &WorksheetRef,
        rows: &[Row],
        input: ValueInputOption,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let token = self.tokens.access_token().await?;
        let url = self.values_url(sheet, ":append")?;

        let response = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", input.as_str()),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        ensure_success(response, "Google Sheets append").await?;

        tracing::debug!("Appended {} rows to '{}'", rows.len(), sheet.title);
        Ok(())
    }
}
