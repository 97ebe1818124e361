use crate::utils::error::{Result, SyncError};
use reqwest::tls::Version;
use reqwest::{Client, Response};
use std::time::Duration;

/// 舊版 TLS 伺服器的連線設定
#[derive(Debug, Clone, Copy)]
pub struct LegacyTlsOptions {
    pub min_version: Version,
    pub verify_certificates: bool,
    pub timeout: Duration,
}

impl Default for LegacyTlsOptions {
    fn default() -> Self {
        Self {
            min_version: Version::TLS_1_0,
            verify_certificates: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// 使用 native-tls 建立客戶端，可協商 TLS 1.0
pub fn legacy_tls_client(options: LegacyTlsOptions) -> Result<Client> {
    let client = Client::builder()
        .use_native_tls()
        .min_tls_version(options.min_version)
        .danger_accept_invalid_certs(!options.verify_certificates)
        .danger_accept_invalid_hostnames(!options.verify_certificates)
        .timeout(options.timeout)
        .build()?;
    Ok(client)
}

/// 非 2xx 回應轉為帶有內容的 `UpstreamError`
pub async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("{} returned {}: {}", context, status, body);
    Err(SyncError::UpstreamError {
        status: status.as_u16(),
        message: format!("{}: {}", context, body.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_defaults() {
        let options = LegacyTlsOptions::default();
        assert_eq!(options.min_version, Version::TLS_1_0);
        assert!(!options.verify_certificates);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(legacy_tls_client(options).is_ok());
    }
}
