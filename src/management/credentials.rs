use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Contents of the `oauth.json` file written by `ytmusicapi oauth`.
///
/// Only read here; obtaining and refreshing the token is done by that tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthCredentials {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

pub struct CredentialsManager {
    path: PathBuf,
    credentials: OAuthCredentials,
}

impl CredentialsManager {
    pub fn new(path: PathBuf, credentials: OAuthCredentials) -> Self {
        Self { path, credentials }
    }

    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let credentials = Self::parse(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            credentials,
        })
    }

    pub fn parse(content: &str) -> Result<OAuthCredentials, String> {
        let credentials: OAuthCredentials =
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;
        if credentials.access_token.trim().is_empty() {
            return Err("access_token is empty".to_string());
        }
        Ok(credentials)
    }

    pub fn is_expired(&self) -> bool {
        match self.credentials.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!(
            "{} {}",
            self.credentials.token_type, self.credentials.access_token
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
