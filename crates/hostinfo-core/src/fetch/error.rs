//! Error type for a single HTTP fetch.

/// Error returned by [`super::get`] and [`super::get_json`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS failure, connection refused, TLS, etc.).
    #[error("{url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// HTTP response had a non-2xx status.
    #[error("{url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// Body was not the JSON shape we expected.
    #[error("{url}: invalid JSON response: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub(crate) fn curl(url: &str, source: curl::Error) -> Self {
        FetchError::Curl {
            url: url.to_string(),
            source,
        }
    }
}
