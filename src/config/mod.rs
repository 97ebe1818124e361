pub mod cli;
pub mod credentials;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

pub use credentials::{CredentialSource, ServiceAccountKey};

/// 執行期設定，每個欄位都可以來自命令列參數或環境變數
/// (本地執行時會先載入 `.env`)
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    #[arg(
        long,
        help = "Remitos API endpoint",
        env = "REMITOS_API_URL",
        default_value = "https://642f0538ae6d.sn.mynetname.net:5010/api/Remitos"
    )]
    pub remitos_api_url: String,

    #[arg(long, env = "REMITOS_BEARER_TOKEN", default_value = "", hide_env_values = true)]
    pub remitos_bearer_token: String,

    #[arg(
        long,
        help = "Drive folder with the Costos_MM_YYYY.csv exports",
        env = "DRIVE_FOLDER_ID_MANO_OBRA",
        default_value = "1iEuqLWPnE8i-XJWPp-CF1B1r-X-5-yDu"
    )]
    pub drive_folder_id_mano_obra: String,

    #[arg(
        long,
        help = "Destination folder of both spreadsheets",
        env = "DRIVE_FOLDER_ID_SYNC",
        default_value = "1ATAyoexZYqlpYbcn3md27zo1NLezdsb5"
    )]
    pub drive_folder_id_sync: String,

    #[arg(
        long,
        env = "SHEET_ID_MATERIALES",
        default_value = "16rVICcrR5LyNn5VEgxehkYs9E7gIe6fbyP1covq2s14"
    )]
    pub sheet_id_materiales: String,

    #[arg(
        long,
        env = "SHEET_ID_MANO_OBRA",
        default_value = "1KdhF5-q6WKRKkwyrh4LhK0itm-DDyQc6TH7eJ2dKihU"
    )]
    pub sheet_id_mano_obra: String,

    #[arg(
        long,
        env = "GOOGLE_CREDENTIALS_JSON",
        default_value = "",
        hide_env_values = true,
        help = "Service account JSON (takes precedence over the path)"
    )]
    pub google_credentials_json: String,

    #[arg(
        long,
        env = "GOOGLE_CREDENTIALS_PATH",
        default_value = "credentials/service_account.json"
    )]
    pub google_credentials_path: String,

    #[arg(
        long,
        env = "PROJECT_ROOT",
        default_value = ".",
        help = "Base directory for relative paths"
    )]
    pub project_root: PathBuf,

    #[arg(
        long,
        env = "SYNC_SECRET",
        default_value = "",
        hide_env_values = true,
        help = "Shared secret required by /sync"
    )]
    pub sync_secret: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    #[arg(long, env = "GOOGLE_SHEETS_API_BASE", default_value = "https://sheets.googleapis.com")]
    pub sheets_api_base: String,

    #[arg(long, env = "GOOGLE_DRIVE_API_BASE", default_value = "https://www.googleapis.com")]
    pub drive_api_base: String,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl AppConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            crate::utils::error::SyncError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("{}", e),
            }
        })
    }

    /// 優先使用內嵌 JSON，其次是存在的憑證檔案
    /// 每次呼叫都重新解析
    pub fn resolve_credentials(&self) -> Result<Option<CredentialSource>> {
        credentials::resolve(
            &self.google_credentials_json,
            &self.google_credentials_path,
            &self.project_root,
        )
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("remitos_api_url", &self.remitos_api_url)?;
        validate_url("sheets_api_base", &self.sheets_api_base)?;
        validate_url("drive_api_base", &self.drive_api_base)?;
        validate_path("google_credentials_path", &self.google_credentials_path)?;
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        self.listen_addr()?;

        if self.remitos_bearer_token.is_empty() {
            tracing::warn!("REMITOS_BEARER_TOKEN is not set; materiales sync will fail");
        }
        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
