//! Sources of access tokens for YouTube API calls.
//!
//! Obtaining and refreshing OAuth tokens is left to the caller. This module only reads
//! tokens that have already been issued, either handed over directly or stored as JSON
//! in the same `tokens.json` format the OAuth flow writes out.

use eyre::Context;
use oauth2::TokenResponse;
use oauth2::basic::BasicTokenResponse;
use std::path::Path;

/// Something that can supply the access token of the current session.
pub trait CredentialSource: std::fmt::Debug + Send + Sync {
    /// The bearer access token, or `None` if the session has none.
    fn access_token(&self) -> Option<String>;
}

impl CredentialSource for BasicTokenResponse {
    fn access_token(&self) -> Option<String> {
        let secret = TokenResponse::access_token(self).secret();
        (!secret.is_empty()).then(|| secret.clone())
    }
}

impl CredentialSource for String {
    fn access_token(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

/// Reads previously stored OAuth tokens.
///
/// The file holds a JSON array of token responses. A missing or empty file yields no
/// tokens.
pub async fn load_stored_tokens(path: impl AsRef<Path>) -> eyre::Result<Vec<BasicTokenResponse>> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("check for token file {}", path.display()))?
    {
        tracing::debug!(path = %path.display(), "no stored tokens");
        return Ok(Vec::new());
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read token file {}", path.display()))?;
    parse_stored_tokens(&raw)
}

fn parse_stored_tokens(raw: &str) -> eyre::Result<Vec<BasicTokenResponse>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).context("parse stored YouTube access tokens")
}
