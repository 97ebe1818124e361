use crate::adapters::http::ensure_success;
use crate::domain::model::RemoteFile;
use crate::domain::ports::{FileStore, TokenProvider};
use crate::utils::error::{Result, SyncError};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Google Drive v3 REST 客戶端 (唯讀)
pub struct DriveClient<T: TokenProvider> {
    base_url: String,
    tokens: T,
    client: Client,
}

impl<T: TokenProvider> DriveClient<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        Self {
            base_url: base_url.into(),
            tokens,
            client: Client::new(),
        }
    }

    fn files_url(&self, file_id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| SyncError::config("Invalid Drive API base URL"))?;
            segments.pop_if_empty().extend(["drive", "v3", "files"]);
            if let Some(id) = file_id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

pub fn csv_query(folder_id: &str) -> String {
    format!(
        "'{}' in parents and mimeType='text/csv'",
        folder_id.replace('\'', "\\'")
    )
}

impl<T: TokenProvider> FileStore for DriveClient<T> {
    async fn list_csv_files(&self, folder_id: &str) -> Result<Vec<RemoteFile>> {
        let query = csv_query(folder_id);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.tokens.access_token().await?;
            let mut request = self
                .client
                .get(self.files_url(None)?)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", "nextPageToken,files(id,name,modifiedTime)"),
                    ("orderBy", "modifiedTime desc"),
                ])
                .bearer_auth(token);
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let response = ensure_success(request.send().await?, "Google Drive list").await?;
            let page: FileList = response.json().await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        tracing::debug!("Found {} CSV files in folder {}", files.len(), folder_id);
        Ok(files)
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(self.files_url(Some(file_id))?)
            .query(&[("alt", "media")])
            .bearer_auth(token)
            .send()
            .await?;
        let mut response = ensure_success(response, "Google Drive download").await?;

        let mut buffer = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
        }

        tracing::debug!("Downloaded {} bytes from file {}", buffer.len(), file_id);
        Ok(buffer)
    }
}
