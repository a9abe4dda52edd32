//! Blocking HTTP GET via the curl crate (libcurl).
//!
//! Used for the DNS JSON endpoint, the IP info endpoint, and for loading
//! pages and same-origin frames. No timeouts and no retries: a request either
//! completes or fails with a transport-level error.
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

mod error;

pub use error::FetchError;

use serde::de::DeserializeOwned;

/// Response body and final URL (after redirects) of a successful GET.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: Vec<u8>,
    pub effective_url: String,
}

/// Performs a GET request and returns the body. Follows redirects.
///
/// `accept` sets the `Accept` header when given. Non-2xx statuses are errors.
pub fn get(url: &str, accept: Option<&str>, user_agent: &str) -> Result<Fetched, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|e| FetchError::curl(url, e))?;
    easy.follow_location(true)
        .map_err(|e| FetchError::curl(url, e))?;
    easy.useragent(user_agent)
        .map_err(|e| FetchError::curl(url, e))?;

    if let Some(accept) = accept {
        let mut list = curl::easy::List::new();
        list.append(&format!("Accept: {}", accept))
            .map_err(|e| FetchError::curl(url, e))?;
        easy.http_headers(list)
            .map_err(|e| FetchError::curl(url, e))?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(|e| FetchError::curl(url, e))?;
        transfer.perform().map_err(|e| FetchError::curl(url, e))?;
    }

    let code = easy.response_code().map_err(|e| FetchError::curl(url, e))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }

    let effective_url = easy
        .effective_url()
        .ok()
        .flatten()
        .unwrap_or(url)
        .to_string();

    tracing::debug!(url, code, bytes = body.len(), "GET complete");

    Ok(Fetched {
        body,
        effective_url,
    })
}

/// GET `url` and decode the body as JSON into `T`.
pub fn get_json<T: DeserializeOwned>(
    url: &str,
    accept: Option<&str>,
    user_agent: &str,
) -> Result<T, FetchError> {
    let fetched = get(url, accept.or(Some("application/json")), user_agent)?;
    decode_json(url, &fetched.body)
}

pub(crate) fn decode_json<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
