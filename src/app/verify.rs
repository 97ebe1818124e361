use crate::adapters::google::auth::SCOPE_DRIVE_READONLY;
use crate::adapters::google::{DriveClient, ServiceAccountAuth};
use crate::adapters::RemitosClient;
use crate::config::AppConfig;
use crate::core::labor_csv::{decode_utf8, has_id_obra_column, matching_files, read_csv_table, select_latest};
use crate::core::{DocumentSource, FileStore};
use crate::utils::error::{Result, SyncError};
use chrono::{Duration, Utc};

/// 檢查 remitos API：最近 31 天的單據
pub async fn check_remitos(config: &AppConfig) -> Result<()> {
    println!("--- Costos materiales (API Remitos) ---");
    if config.remitos_bearer_token.is_empty() {
        return Err(SyncError::missing("REMITOS_BEARER_TOKEN"));
    }

    let to = Utc::now().date_naive();
    let from = to - Duration::days(31);
    let client = RemitosClient::new(&config.remitos_api_url, &config.remitos_bearer_token)?;
    let docs = client.fetch_documents(from, to).await?;
    println!("  OK. Rango {} .. {}: {} documentos.", from, to, docs.len());

    if let Some(doc) = docs.first() {
        let desc: String = doc.desc_cuenta.as_deref().unwrap_or("").chars().take(40).collect();
        println!(
            "  Muestra: CUENTA={}, DESCCUENTA={}...",
            doc.cuenta.as_deref().unwrap_or(""),
            desc
        );
        let by_obra = doc.cuenta.is_some() && doc.desc_cuenta.is_some();
        println!(
            "  Separación por obra (CUENTA + DESCCUENTA): {}",
            if by_obra { "Sí" } else { "No" }
        );
    }
    Ok(())
}

/// 檢查 Drive 資料夾：列出 CSV 並解析最新的一個
pub async fn check_mano_obra(config: &AppConfig) -> Result<()> {
    println!("--- Costos mano de obra (Drive CSV) ---");
    let credentials = config
        .resolve_credentials()?
        .ok_or_else(|| SyncError::config("Credenciales Google no configuradas"))?;
    let key = credentials.load().await?;
    let drive = DriveClient::new(
        &config.drive_api_base,
        ServiceAccountAuth::new(key, &[SCOPE_DRIVE_READONLY]),
    );

    let listed = drive.list_csv_files(&config.drive_folder_id_mano_obra).await?;
    println!("  CSVs en carpeta: {}", matching_files(&listed).len());

    let latest = select_latest(&listed).ok_or_else(|| SyncError::NotFoundError {
        message: "No se encontraron archivos Costos_MM_YYYY.CSV en la carpeta.".to_string(),
    })?;
    let modified: String = latest.modified_time.chars().take(19).collect();
    println!("  Último mes: {} (modified: {})", latest.name, modified);

    let content = decode_utf8(drive.download(&latest.id).await?)?;
    let table = read_csv_table(&content)?;
    println!("  Columnas: {:?}", table.headers);
    println!(
        "  Columna idObr presente: {}",
        if has_id_obra_column(&table.headers) { "Sí" } else { "Revisar nombres" }
    );
    if let Some(first) = table.rows.first() {
        let preview: Vec<&String> = first.iter().take(5).collect();
        println!("  Filas de muestra: {} (primera: {:?}...)", table.rows.len(), preview);
    }
    Ok(())
}

/// 結束碼：至少一個來源可用為 0，全部失敗為 1
pub async fn run_verify(config: &AppConfig) -> i32 {
    let remitos_ok = report(check_remitos(config).await);
    let mano_obra_ok = report(check_mano_obra(config).await);
    println!();

    match (remitos_ok, mano_obra_ok) {
        (true, true) => {
            println!("Ambas fuentes accesibles.");
            0
        }
        (false, false) => {
            println!("No se pudo acceder a ninguna fuente.");
            1
        }
        _ => {
            println!("Una fuente accesible, otra no (revisar variables de entorno).");
            0
        }
    }
}

fn report(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            println!("  Error: {}", e);
            false
        }
    }
}
