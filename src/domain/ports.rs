use crate::domain::model::{Document, RemoteFile, Row, ValueInputOption, WorksheetRef};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// 依日期區間回傳成本單據的遠端 API
pub trait DocumentSource: Send + Sync {
    fn fetch_documents(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Document>>> + Send;
}

/// 存放人工成本 CSV 的雲端資料夾
pub trait FileStore: Send + Sync {
    /// `folder_id` 中的 CSV 檔案，最近修改的在前
    fn list_csv_files(
        &self,
        folder_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RemoteFile>>> + Send;

    fn download(&self, file_id: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait SpreadsheetService: Send + Sync {
    /// 開啟試算表並依標題尋找工作表
    fn find_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Option<WorksheetRef>>> + Send;

    fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: usize,
        cols: usize,
    ) -> impl std::future::Future<Output = Result<WorksheetRef>> + Send;

    fn get_all_values(
        &self,
        sheet: &WorksheetRef,
    ) -> impl std::future::Future<Output = Result<Vec<Vec<String>>>> + Send;

    fn clear(&self, sheet: &WorksheetRef) -> impl std::future::Future<Output = Result<()>> + Send;

    fn append_rows(
        &self,
        sheet: &WorksheetRef,
        rows: &[Row],
        input: ValueInputOption,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 提供 Google API 使用的 OAuth bearer token
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> impl std::future::Future<Output = Result<String>> + Send;
}
