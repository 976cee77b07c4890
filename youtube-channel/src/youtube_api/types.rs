//! Shared types for YouTube API responses.

use serde::de::DeserializeOwned;

/// Paging details for lists of resources.
///
/// Includes the total number of items available and the number of resources
/// returned in a single page response.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

/// The error body YouTube sends instead of a resource list.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Returns the upstream error carried by `body`, if it is error-shaped.
pub(crate) fn api_error(body: &serde_json::Value) -> Option<ApiError> {
    let error = body.get("error")?;
    Some(
        serde_json::from_value(error.clone()).unwrap_or(ApiError {
            code: None,
            message: error.as_str().map(String::from),
        }),
    )
}

/// Decodes a response body into `T`.
///
/// Error-shaped bodies and bodies that lack the keys `T` requires both decode to `None`.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: serde_json::Value) -> Option<T> {
    if let Some(error) = api_error(&body) {
        tracing::warn!(
            endpoint,
            code = ?error.code,
            message = error.message.as_deref().unwrap_or("unknown error"),
            "YouTube API returned an error"
        );
        return None;
    }

    match serde_json::from_value(body) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!(endpoint, "unexpected YouTube API response shape: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn detects_error_shape() {
        let body = json!({ "error": { "code": 403, "message": "quotaExceeded", "errors": [] } });
        let error = api_error(&body).unwrap();
        assert_eq!(error.code, Some(403));
        assert_eq!(error.message.as_deref(), Some("quotaExceeded"));

        let body = json!({ "error": "invalid_token" });
        let error = api_error(&body).unwrap();
        assert_eq!(error.code, None);
        assert_eq!(error.message.as_deref(), Some("invalid_token"));

        assert!(api_error(&json!({ "items": [] })).is_none());
    }

    #[test]
    fn decode_rejects_errors_and_bad_shapes() {
        let page: Option<PageInfo> = decode("test", json!({ "totalResults": 3 }));
        assert_eq!(page.map(|p| p.total_results), Some(3));

        let page: Option<PageInfo> = decode("test", json!({ "error": { "code": 401 } }));
        assert!(page.is_none());

        let page: Option<PageInfo> = decode("test", json!({ "resultsPerPage": 5 }));
        assert!(page.is_none());
    }
}
