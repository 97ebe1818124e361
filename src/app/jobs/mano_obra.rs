use crate::adapters::google::auth::{SCOPE_DRIVE, SCOPE_DRIVE_READONLY, SCOPE_SPREADSHEETS};
use crate::adapters::google::{DriveClient, ServiceAccountAuth, SheetsClient};
use crate::config::AppConfig;
use crate::core::labor_csv::{decode_utf8, parse_csv_content, select_latest};
use crate::core::worksheet::{open_or_create, write_header_if_empty};
use crate::core::{FileStore, Pipeline, Row, SpreadsheetService, SyncEngine, SyncResult};
use crate::domain::model::{CsvTable, LaborCsvFile, ValueInputOption};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use serde_json::Value;

pub const SHEET_NAME_MANO_OBRA: &str = "Mano de obra";
pub const PERIODO_HEADER: &str = "Periodo";
const NEW_SHEET_ROWS: usize = 2000;

/// 待寫入的資料列，每列都已加上期間
pub struct LaborBatch {
    pub file: LaborCsvFile,
    pub periodo: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Drive 中最新的 `Costos_MM_YYYY.csv` → "Mano de obra" 工作表
pub struct ManoObraPipeline<S: SpreadsheetService, F: FileStore> {
    sheets: S,
    files: F,
    spreadsheet_id: String,
    folder_id: String,
}

impl<S: SpreadsheetService, F: FileStore> ManoObraPipeline<S, F> {
    pub fn new(
        sheets: S,
        files: F,
        spreadsheet_id: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            sheets,
            files,
            spreadsheet_id: spreadsheet_id.into(),
            folder_id: folder_id.into(),
        }
    }
}

pub fn tag_rows(periodo: &str, table: &CsvTable) -> (Vec<String>, Vec<Row>) {
    let mut headers = Vec::with_capacity(table.headers.len() + 1);
    headers.push(PERIODO_HEADER.to_string());
    headers.extend(table.headers.iter().cloned());

    let rows = table
        .rows
        .iter()
        .map(|row| {
            std::iter::once(Value::String(periodo.to_string()))
                .chain(row.iter().map(|v| Value::String(v.clone())))
                .collect()
        })
        .collect();
    (headers, rows)
}

#[async_trait]
impl<S: SpreadsheetService, F: FileStore> Pipeline for ManoObraPipeline<S, F> {
    type Target = ();
    type Extracted = (LaborCsvFile, CsvTable);
    type Batch = LaborBatch;

    fn name(&self) -> &'static str {
        "mano_obra"
    }

    async fn prepare(&self) -> Result<()> {
        // 工作表欄數取決於 CSV 標頭，所以在 load 才開啟
        Ok(())
    }

    async fn extract(&self) -> Result<(LaborCsvFile, CsvTable)> {
        let listed = self.files.list_csv_files(&self.folder_id).await?;
        let file = select_latest(&listed).ok_or_else(|| SyncError::NotFoundError {
            message: "No se encontró ningún CSV Costos_MM_YYYY en la carpeta".to_string(),
        })?;
        tracing::info!("📁 Latest labor CSV: {} (modified {})", file.name, file.modified_time);

        let bytes = self.files.download(&file.id).await?;
        let table = parse_csv_content(&decode_utf8(bytes)?)?;
        tracing::debug!("Parsed {} columns, {} rows", table.headers.len(), table.rows.len());
        Ok((file, table))
    }

    async fn transform(&self, data: (LaborCsvFile, CsvTable)) -> Result<LaborBatch> {
        let (file, table) = data;
        let periodo = file.periodo();
        let (headers, rows) = tag_rows(&periodo, &table);
        Ok(LaborBatch {
            file,
            periodo,
            headers,
            rows,
        })
    }

    async fn load(&self, _target: (), batch: LaborBatch) -> Result<SyncResult> {
        let sheet = open_or_create(
            &self.sheets,
            &self.spreadsheet_id,
            SHEET_NAME_MANO_OBRA,
            &batch.headers,
            NEW_SHEET_ROWS,
            batch.headers.len() + 1,
        )
        .await?;

        write_header_if_empty(&self.sheets, &sheet, &batch.headers).await?;
        self.sheets
            .append_rows(&sheet, &batch.rows, ValueInputOption::UserEntered)
            .await?;

        Ok(SyncResult::success(batch.rows.len())
            .with_file(batch.file.name)
            .with_periodo(batch.periodo))
    }

    fn on_failure(&self, result: SyncResult) -> SyncResult {
        result.with_file("")
    }
}

/// 附加最新月份的人工成本 CSV，兩個 id 未指定時使用設定值
pub async fn sync_mano_obra(
    config: &AppConfig,
    sheet_id: Option<&str>,
    folder_id: Option<&str>,
) -> SyncResult {
    let spreadsheet_id = sheet_id
        .filter(|id| !id.is_empty())
        .unwrap_or(config.sheet_id_mano_obra.as_str());
    if spreadsheet_id.is_empty() {
        return failed(SyncError::missing("SHEET_ID_MANO_OBRA"));
    }
    let folder_id = folder_id
        .filter(|id| !id.is_empty())
        .unwrap_or(config.drive_folder_id_mano_obra.as_str());

    let credentials = match config.resolve_credentials() {
        Ok(Some(credentials)) => credentials,
        Ok(None) => return failed(SyncError::config("Credenciales Google no configuradas")),
        Err(e) => return failed(e),
    };
    let key = match credentials.load().await {
        Ok(key) => key,
        Err(e) => return failed(e),
    };

    let drive = DriveClient::new(
        &config.drive_api_base,
        ServiceAccountAuth::new(key.clone(), &[SCOPE_DRIVE_READONLY]),
    );
    let sheets = SheetsClient::new(
        &config.sheets_api_base,
        ServiceAccountAuth::new(key, &[SCOPE_SPREADSHEETS, SCOPE_DRIVE]),
    );
    let pipeline = ManoObraPipeline::new(sheets, drive, spreadsheet_id, folder_id);

    SyncEngine::new(pipeline).run_to_result().await
}

fn failed(err: SyncError) -> SyncResult {
    tracing::warn!("⚠️ mano_obra sync skipped: {}", err);
    SyncResult::from(&err).with_file("")
}
