use crate::utils::error::{ErrorCategory, SyncError};
use serde::{Deserialize, Serialize};

/// 試算表的一列，儲存格保留 JSON 型別
pub type Row = Vec<serde_json::Value>;

/// remitos API 回傳的成本單據
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "FECHA", default)]
    pub fecha: Option<String>,
    #[serde(rename = "TIPDOCUM", default)]
    pub tipo_doc: Option<String>,
    #[serde(rename = "SERIEDOCUM", default)]
    pub serie: Option<String>,
    #[serde(rename = "NRODOCUM", default)]
    pub numero: Option<String>,
    #[serde(rename = "CUENTA", default)]
    pub cuenta: Option<String>,
    /// 帳戶描述，即工地 (obra) 名稱
    #[serde(rename = "DESCCUENTA", default)]
    pub desc_cuenta: Option<String>,
    #[serde(rename = "DIRCUENTA", default)]
    pub dir_cuenta: Option<String>,
    #[serde(rename = "TOTAL", default)]
    pub total: serde_json::Value,
    #[serde(rename = "MONEDA", default)]
    pub moneda: serde_json::Value,
}

/// remitos API 回應的外層結構
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub documentos: Option<Vec<Document>>,
}

/// 雲端資料夾中列出的檔案
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modified_time: String,
}

/// 檔名符合 `Costos_MM_YYYY.csv` 的月份 CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaborCsvFile {
    pub id: String,
    pub name: String,
    pub modified_time: String,
    pub month: u32,
    pub year: i32,
}

impl LaborCsvFile {
    /// 寫在每列前面的期間標籤，例如 `06/2024`
    pub fn periodo(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

/// 解析後的 CSV：標頭列與資料列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 試算表 id 與工作表標題
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorksheetRef {
    pub spreadsheet_id: String,
    pub title: String,
}

impl WorksheetRef {
    pub fn new(spreadsheet_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    Raw,
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// 單次任務的結果，原樣放入 `/sync` 回應
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncResult {
    pub ok: bool,
    pub rows_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodo: Option<String>,
}

impl SyncResult {
    pub fn success(rows_written: usize) -> Self {
        Self {
            ok: true,
            rows_written,
            error: None,
            reason: None,
            file_name: None,
            periodo: None,
        }
    }

    pub fn failure(reason: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            rows_written: 0,
            error: Some(message.into()),
            reason: Some(reason),
            file_name: None,
            periodo: None,
        }
    }

    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_periodo(mut self, periodo: impl Into<String>) -> Self {
        self.periodo = Some(periodo.into());
        self
    }
}

impl From<&SyncError> for SyncResult {
    fn from(err: &SyncError) -> Self {
        Self::failure(err.category(), err.to_string())
    }
}

/// 一次 `/sync` 呼叫的完整回應
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub materiales: SyncResult,
    pub mano_obra: SyncResult,
}
