use crate::adapters::http::ensure_success;
use crate::config::ServiceAccountKey;
use crate::domain::ports::TokenProvider;
use crate::utils::error::Result;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

pub const SCOPE_DRIVE_READONLY: &str = "https://www.googleapis.com/auth/drive.readonly";
pub const SCOPE_DRIVE: &str = "https://www.googleapis.com/auth/drive";
pub const SCOPE_SPREADSHEETS: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// 服務帳戶授權的 JWT claims
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// 固定 scopes 的 OAuth2 服務帳戶認證
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    scopes: Vec<String>,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scopes: &[&str]) -> Self {
        Self {
            key,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    fn signed_assertion(&self) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = JwtClaims {
            iss: self.key.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &key)?)
    }

    async fn fetch_new_token(&self) -> Result<(String, Duration)> {
        let assertion = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;
        let response = ensure_success(response, "Google token exchange").await?;

        let token: TokenResponse = response.json().await?;
        // 提前 5 分鐘過期，避免邊界情況
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600).saturating_sub(300));
        tracing::debug!("Obtained Google access token for {}", self.key.client_email);
        Ok((token.access_token, lifetime))
    }
}

impl TokenProvider for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() {
                    return Ok(token.token.clone());
                }
            }
        }

        let (token, lifetime) = self.fetch_new_token().await?;

        let mut cached = self.cached_token.write().await;
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at: SystemTime::now() + lifetime,
        });

        Ok(token)
    }
}
