use crate::domain::model::{CsvTable, LaborCsvFile, RemoteFile};
use crate::utils::error::{Result, SyncError};
use regex::Regex;
use std::sync::OnceLock;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)Costos_(\d{2})_(\d{4})\.csv$").expect("filename pattern is valid")
    })
}

/// 從 `Costos_MM_YYYY.csv` 檔名取出 (月, 年)
pub fn parse_period_from_name(name: &str) -> Option<(u32, i32)> {
    let caps = filename_pattern().captures(name)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let year = caps.get(2)?.as_str().parse().ok()?;
    Some((month, year))
}

/// 只保留檔名含月份的檔案，維持列表順序
pub fn matching_files(files: &[RemoteFile]) -> Vec<LaborCsvFile> {
    files
        .iter()
        .filter_map(|f| {
            let (month, year) = parse_period_from_name(&f.name)?;
            Some(LaborCsvFile {
                id: f.id.clone(),
                name: f.name.clone(),
                modified_time: f.modified_time.clone(),
                month,
                year,
            })
        })
        .collect()
}

/// 選出 (年, 月) 最大的檔案
/// `files` 依修改時間遞減排列，相同時取第一個
pub fn select_latest(files: &[RemoteFile]) -> Option<LaborCsvFile> {
    let mut best: Option<LaborCsvFile> = None;
    for candidate in matching_files(files) {
        let newer = match &best {
            None => true,
            Some(b) => (candidate.year, candidate.month) > (b.year, b.month),
        };
        if newer {
            best = Some(candidate);
        }
    }
    best
}

/// 解碼 UTF-8 (可含 BOM)
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|e| SyncError::ValidationError {
        message: format!("El CSV no es UTF-8 válido: {}", e),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn normalize_header(header: &str) -> String {
    header.to_lowercase().replace(' ', "")
}

pub fn has_id_obra_column(headers: &[String]) -> bool {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    normalized.iter().any(|h| h == "idobr" || h == "id_obr")
        || normalized.iter().any(|h| h.contains("id") && h.contains("obr"))
}

/// 將 CSV 拆成標頭與資料列，空檔案回傳空表
pub fn read_csv_table(content: &str) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(CsvTable::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(|v| v.to_string()).collect());
    }
    Ok(CsvTable { headers, rows })
}

/// 解析人工成本 CSV 並檢查 idObr 欄位
pub fn parse_csv_content(content: &str) -> Result<CsvTable> {
    let table = read_csv_table(content)?;
    if table.headers.is_empty() {
        return Ok(table);
    }

    if !has_id_obra_column(&table.headers) {
        return Err(SyncError::ValidationError {
            message: format!(
                "Columna idObr no encontrada en el CSV. Columnas: {:?}",
                table.headers
            ),
        });
    }
    Ok(table)
}
