use crate::adapters::http::{ensure_success, legacy_tls_client, LegacyTlsOptions};
use crate::domain::model::{Document, DocumentsResponse};
use crate::domain::ports::DocumentSource;
use crate::utils::error::{Result, SyncError};
use chrono::NaiveDate;
use reqwest::Client;
use url::Url;

/// 舊版 remitos REST API 客戶端
pub struct RemitosClient {
    base_url: String,
    bearer_token: String,
    client: Client,
}

impl RemitosClient {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Result<Self> {
        Self::with_tls(base_url, bearer_token, LegacyTlsOptions::default())
    }

    pub fn with_tls(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        options: LegacyTlsOptions,
    ) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            client: legacy_tls_client(options)?,
        })
    }

    /// 在原 URL 加上 `fromDate`/`toDate`，保留既有查詢參數
    pub fn documents_url(&self, from: NaiveDate, to: NaiveDate) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())?;
        url.query_pairs_mut()
            .append_pair("fromDate", &from.format("%Y-%m-%d").to_string())
            .append_pair("toDate", &to.format("%Y-%m-%d").to_string());
        Ok(url)
    }
}

impl DocumentSource for RemitosClient {
    async fn fetch_documents(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Document>> {
        if self.bearer_token.is_empty() {
            return Err(SyncError::missing("REMITOS_BEARER_TOKEN"));
        }

        let url = self.documents_url(from, to)?;
        tracing::debug!("Fetching remitos from {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        let response = ensure_success(response, "Remitos API").await?;

        let body: DocumentsResponse = response.json().await?;
        let documentos = body.documentos.unwrap_or_default();
        tracing::info!("📥 Fetched {} documents ({} .. {})", documentos.len(), from, to);
        Ok(documentos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_documents_url_without_query() {
        let client = RemitosClient::new("https://host:5010/api/Remitos", "t").unwrap();
        let url = client.documents_url(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://host:5010/api/Remitos?fromDate=2024-06-01&toDate=2024-06-30"
        );
    }

    #[test]
    fn test_documents_url_with_existing_query() {
        let client = RemitosClient::new(" https://host/api/Remitos?empresa=2 ", "t").unwrap();
        let url = client.documents_url(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://host/api/Remitos?empresa=2&fromDate=2024-06-01&toDate=2024-06-30"
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_config_error() {
        let client = RemitosClient::new("https://host/api/Remitos", "").unwrap();
        let err = client
            .fetch_documents(date(2024, 6, 1), date(2024, 6, 30))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "REMITOS_BEARER_TOKEN no configurado");
    }
}
