#![allow(dead_code)]

use clap::Parser;
use costos_sync::core::{DocumentSource, FileStore, Row, SpreadsheetService, TokenProvider};
use costos_sync::domain::model::{Document, RemoteFile, ValueInputOption, WorksheetRef};
use costos_sync::{AppConfig, Cli, Result, SyncError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Config built from flags only, with credentials pointing nowhere.
/// `overrides` are (flag, value) pairs replacing the defaults.
pub fn unconfigured(overrides: &[(&str, &str)]) -> AppConfig {
    let mut flags: Vec<(&str, &str)> = vec![
        ("--remitos-bearer-token", ""),
        ("--google-credentials-json", ""),
        (
            "--google-credentials-path",
            "/nonexistent/credentials/service_account.json",
        ),
        ("--sync-secret", ""),
    ];
    for &(flag, value) in overrides {
        flags.retain(|(f, _)| *f != flag);
        flags.push((flag, value));
    }

    let mut args = vec!["costos-sync".to_string()];
    for (flag, value) in flags {
        args.push(format!("{}={}", flag, value));
    }
    Cli::parse_from(args).config
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct StaticToken(pub &'static str);

impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

fn cell_text(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Default)]
pub struct SheetState {
    pub worksheets: HashMap<String, Vec<Vec<String>>>,
    pub added: Vec<(String, usize, usize)>,
    pub calls: Vec<String>,
}

/// In-memory spreadsheet that records every call.
#[derive(Default)]
pub struct FakeSheets {
    pub state: Mutex<SheetState>,
}

impl FakeSheets {
    pub fn with_sheet(title: &str, rows: Vec<Vec<&str>>) -> Self {
        let sheets = Self::default();
        sheets.state.lock().unwrap().worksheets.insert(
            title.to_string(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        );
        sheets
    }

    pub fn values(&self, title: &str) -> Vec<Vec<String>> {
        self.state.lock().unwrap().worksheets.get(title).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn added(&self) -> Vec<(String, usize, usize)> {
        self.state.lock().unwrap().added.clone()
    }
}

impl SpreadsheetService for FakeSheets {
    async fn find_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<Option<WorksheetRef>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find:{}", title));
        Ok(state
            .worksheets
            .contains_key(title)
            .then(|| WorksheetRef::new(spreadsheet_id, title)))
    }

    async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: usize,
        cols: usize,
    ) -> Result<WorksheetRef> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("add:{}", title));
        state.added.push((title.to_string(), rows, cols));
        state.worksheets.insert(title.to_string(), Vec::new());
        Ok(WorksheetRef::new(spreadsheet_id, title))
    }

    async fn get_all_values(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get:{}", sheet.title));
        Ok(state.worksheets.get(&sheet.title).cloned().unwrap_or_default())
    }

    async fn clear(&self, sheet: &WorksheetRef) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear:{}", sheet.title));
        state.worksheets.insert(sheet.title.clone(), Vec::new());
        Ok(())
    }

    async fn append_rows(
        &self,
        sheet: &WorksheetRef,
        rows: &[Row],
        input: ValueInputOption,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(format!("append:{}:{}:{}", sheet.title, rows.len(), input.as_str()));
        let target = state.worksheets.entry(sheet.title.clone()).or_default();
        target.extend(rows.iter().map(|r| r.iter().map(cell_text).collect::<Vec<_>>()));
        Ok(())
    }
}

/// Document source returning a fixed list, or an upstream failure.
pub struct FakeDocuments {
    pub docs: Vec<Document>,
    pub fail_status: Option<u16>,
    pub calls: AtomicUsize,
}

impl FakeDocuments {
    pub fn returning(docs: Vec<Document>) -> Self {
        Self {
            docs,
            fail_status: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            docs: Vec::new(),
            fail_status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }
}

impl DocumentSource for FakeDocuments {
    async fn fetch_documents(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(SyncError::UpstreamError {
                status,
                message: "Remitos API: unavailable".to_string(),
            }),
            None => Ok(self.docs.clone()),
        }
    }
}

/// Drive folder with fixed listing and contents.
#[derive(Default)]
pub struct FakeFiles {
    pub files: Vec<RemoteFile>,
    pub contents: HashMap<String, Vec<u8>>,
    pub downloads: Mutex<Vec<String>>,
}

impl FakeFiles {
    pub fn with_file(mut self, id: &str, name: &str, content: &str) -> Self {
        self.files.push(RemoteFile {
            id: id.to_string(),
            name: name.to_string(),
            modified_time: "2024-07-01T10:00:00.000Z".to_string(),
        });
        self.contents.insert(id.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl FileStore for FakeFiles {
    async fn list_csv_files(&self, _folder_id: &str) -> Result<Vec<RemoteFile>> {
        Ok(self.files.clone())
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(file_id.to_string());
        self.contents
            .get(file_id)
            .cloned()
            .ok_or_else(|| SyncError::UpstreamError {
                status: 404,
                message: format!("file {} not found", file_id),
            })
    }
}

pub fn document(cuenta: &str, obra: &str, total: f64, moneda: i64) -> Document {
    Document {
        fecha: Some("2024-06-10T00:00:00".to_string()),
        tipo_doc: Some("RM".to_string()),
        serie: Some("A".to_string()),
        numero: Some("0001".to_string()),
        cuenta: Some(cuenta.to_string()),
        desc_cuenta: Some(obra.to_string()),
        dir_cuenta: Some("Av. Siempre Viva 742".to_string()),
        total: serde_json::json!(total),
        moneda: serde_json::json!(moneda),
    }
}

// 讓測試可以在 pipeline 執行後檢查 fake 的狀態
impl SpreadsheetService for &FakeSheets {
    async fn find_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<Option<WorksheetRef>> {
        (**self).find_worksheet(spreadsheet_id, title).await
    }

    async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: usize,
        cols: usize,
    ) -> Result<WorksheetRef> {
        (**self).add_worksheet(spreadsheet_id, title, rows, cols).await
    }

    async fn get_all_values(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        (**self).get_all_values(sheet).await
    }

    async fn clear(&self, sheet: &WorksheetRef) -> Result<()> {
        (**self).clear(sheet).await
    }

    async fn append_rows(
        &self,
        sheet: &WorksheetRef,
        rows: &[Row],
        input: ValueInputOption,
    ) -> Result<()> {
        (**self).append_rows(sheet, rows, input).await
    }
}

impl DocumentSource for &FakeDocuments {
    async fn fetch_documents(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Document>> {
        (**self).fetch_documents(from, to).await
    }
}

impl FileStore for &FakeFiles {
    async fn list_csv_files(&self, folder_id: &str) -> Result<Vec<RemoteFile>> {
        (**self).list_csv_files(folder_id).await
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        (**self).download(file_id).await
    }
}
