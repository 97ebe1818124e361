use crate::domain::model::{Row, ValueInputOption, WorksheetRef};
use crate::domain::ports::SpreadsheetService;
use crate::utils::error::Result;

pub fn header_row(headers: &[String]) -> Row {
    headers
        .iter()
        .map(|h| serde_json::Value::String(h.clone()))
        .collect()
}

/// 開啟 `title` 工作表，不存在時建立並寫入 `headers` 作為第一列
pub async fn open_or_create<S: SpreadsheetService>(
    sheets: &S,
    spreadsheet_id: &str,
    title: &str,
    headers: &[String],
    rows: usize,
    cols: usize,
) -> Result<WorksheetRef> {
    if let Some(sheet) = sheets.find_worksheet(spreadsheet_id, title).await? {
        return Ok(sheet);
    }

    tracing::info!("📄 Worksheet '{}' not found, creating it", title);
    let sheet = sheets.add_worksheet(spreadsheet_id, title, rows, cols).await?;
    sheets
        .append_rows(&sheet, &[header_row(headers)], ValueInputOption::Raw)
        .await?;
    Ok(sheet)
}

/// 第一列與標頭不同時清空工作表並重寫標頭
/// 有重設時回傳 true
pub async fn reset_header_if_mismatch<S: SpreadsheetService>(
    sheets: &S,
    sheet: &WorksheetRef,
    headers: &[String],
) -> Result<bool> {
    let existing = sheets.get_all_values(sheet).await?;
    if existing.first().map(|first| first.as_slice()) == Some(headers) {
        return Ok(false);
    }

    tracing::warn!("Header of '{}' does not match, clearing sheet", sheet.title);
    sheets.clear(sheet).await?;
    sheets
        .append_rows(sheet, &[header_row(headers)], ValueInputOption::Raw)
        .await?;
    Ok(true)
}

/// 只在工作表完全空白時寫入標頭
/// 非空白的工作表即使標頭不同也不修改
pub async fn write_header_if_empty<S: SpreadsheetService>(
    sheets: &S,
    sheet: &WorksheetRef,
    headers: &[String],
) -> Result<bool> {
    let existing = sheets.get_all_values(sheet).await?;
    if !existing.is_empty() {
        if existing[0].as_slice() != headers {
            tracing::warn!(
                "Header of '{}' differs from the CSV columns; appending anyway",
                sheet.title
            );
        }
        return Ok(false);
    }

    sheets
        .append_rows(sheet, &[header_row(headers)], ValueInputOption::Raw)
        .await?;
    Ok(true)
}
