use crate::adapters::google::auth::{SCOPE_DRIVE, SCOPE_SPREADSHEETS};
use crate::adapters::google::{ServiceAccountAuth, SheetsClient};
use crate::adapters::RemitosClient;
use crate::config::AppConfig;
use crate::core::documents::{documents_to_rows, materiales_headers, MATERIALES_HEADERS};
use crate::core::period::month_range;
use crate::core::worksheet::{open_or_create, reset_header_if_mismatch};
use crate::core::{DocumentSource, Pipeline, Row, SpreadsheetService, SyncEngine, SyncResult};
use crate::domain::model::{Document, ValueInputOption, WorksheetRef};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use chrono::NaiveDate;

pub const SHEET_NAME_MATERIALES: &str = "Materiales";
const NEW_SHEET_ROWS: usize = 1000;

/// Remitos API → "Materiales" 工作表
pub struct MaterialesPipeline<S: SpreadsheetService, D: DocumentSource> {
    sheets: S,
    source: D,
    spreadsheet_id: String,
    from: NaiveDate,
    to: NaiveDate,
}

impl<S: SpreadsheetService, D: DocumentSource> MaterialesPipeline<S, D> {
    pub fn new(
        sheets: S,
        source: D,
        spreadsheet_id: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        Self {
            sheets,
            source,
            spreadsheet_id: spreadsheet_id.into(),
            from,
            to,
        }
    }
}

#[async_trait]
impl<S: SpreadsheetService, D: DocumentSource> Pipeline for MaterialesPipeline<S, D> {
    type Target = WorksheetRef;
    type Extracted = Vec<Document>;
    type Batch = Vec<Row>;

    fn name(&self) -> &'static str {
        "materiales"
    }

    async fn prepare(&self) -> Result<WorksheetRef> {
        open_or_create(
            &self.sheets,
            &self.spreadsheet_id,
            SHEET_NAME_MATERIALES,
            &materiales_headers(),
            NEW_SHEET_ROWS,
            MATERIALES_HEADERS.len(),
        )
        .await
    }

    async fn extract(&self) -> Result<Vec<Document>> {
        self.source.fetch_documents(self.from, self.to).await
    }

    async fn transform(&self, data: Vec<Document>) -> Result<Vec<Row>> {
        Ok(documents_to_rows(&data))
    }

    async fn load(&self, sheet: WorksheetRef, rows: Vec<Row>) -> Result<SyncResult> {
        if rows.is_empty() {
            tracing::info!("No documents between {} and {}", self.from, self.to);
            return Ok(SyncResult::success(0));
        }

        reset_header_if_mismatch(&self.sheets, &sheet, &materiales_headers()).await?;
        self.sheets
            .append_rows(&sheet, &rows, ValueInputOption::UserEntered)
            .await?;
        Ok(SyncResult::success(rows.len()))
    }
}

/// 同步 `from..=to` 期間的單據，`sheet_id` 可覆蓋設定值
pub async fn sync_materiales(
    config: &AppConfig,
    from: NaiveDate,
    to: NaiveDate,
    sheet_id: Option<&str>,
) -> SyncResult {
    let spreadsheet_id = sheet_id
        .filter(|id| !id.is_empty())
        .unwrap_or(config.sheet_id_materiales.as_str());
    if spreadsheet_id.is_empty() {
        return failed(SyncError::missing("SHEET_ID_MATERIALES"));
    }

    let credentials = match config.resolve_credentials() {
        Ok(Some(credentials)) => credentials,
        Ok(None) => return failed(SyncError::config("Credenciales Google no configuradas")),
        Err(e) => return failed(e),
    };

    let key = match credentials.load().await {
        Ok(key) => key,
        Err(e) => return failed(e),
    };
    let source = match RemitosClient::new(&config.remitos_api_url, &config.remitos_bearer_token) {
        Ok(client) => client,
        Err(e) => return failed(e),
    };

    let auth = ServiceAccountAuth::new(key, &[SCOPE_SPREADSHEETS, SCOPE_DRIVE]);
    let sheets = SheetsClient::new(&config.sheets_api_base, auth);
    let pipeline = MaterialesPipeline::new(sheets, source, spreadsheet_id, from, to);

    SyncEngine::new(pipeline).run_to_result().await
}

/// 同步整個月份
pub async fn sync_materiales_month(
    config: &AppConfig,
    year: i32,
    month: u32,
    sheet_id: Option<&str>,
) -> SyncResult {
    match month_range(year, month) {
        Ok((from, to)) => sync_materiales(config, from, to, sheet_id).await,
        Err(e) => failed(e),
    }
}

fn failed(err: SyncError) -> SyncResult {
    tracing::warn!("⚠️ materiales sync skipped: {}", err);
    SyncResult::from(&err)
}
