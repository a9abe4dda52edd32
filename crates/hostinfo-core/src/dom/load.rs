//! Loading page source from a local file or an http(s) URL.

use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

use super::Page;
use crate::fetch;

/// Where a page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Remote(Url),
    File(PathBuf),
}

impl Location {
    /// `http(s)://` and `file://` URLs are taken as URLs; anything else is a filesystem path.
    pub fn parse(input: &str) -> Result<Self> {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Location::Remote(url)),
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| anyhow::anyhow!("not a local file URL: {}", input))?;
                Ok(Location::File(path))
            }
            _ => Ok(Location::File(PathBuf::from(input))),
        }
    }
}

/// Blocking read of a page's source. Returns the source and the document URL.
pub fn read_location(location: &Location, user_agent: &str) -> Result<(String, Url)> {
    match location {
        Location::Remote(url) => fetch_document(url, user_agent),
        Location::File(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("read page: {}", path.display()))?;
            let abs = std::fs::canonicalize(path)
                .with_context(|| format!("resolve path: {}", path.display()))?;
            let url = Url::from_file_path(&abs)
                .map_err(|_| anyhow::anyhow!("cannot express {} as URL", abs.display()))?;
            Ok((source, url))
        }
    }
}

/// Blocking GET of an HTML document. Returns the body and the final URL after redirects.
pub fn fetch_document(url: &Url, user_agent: &str) -> Result<(String, Url)> {
    let fetched = fetch::get(url.as_str(), Some("text/html,*/*;q=0.8"), user_agent)?;
    let final_url = Url::parse(&fetched.effective_url).unwrap_or_else(|_| url.clone());
    let source = String::from_utf8_lossy(&fetched.body).into_owned();
    Ok((source, final_url))
}

/// Load and parse a page from a path or URL. The read runs on the blocking pool.
pub async fn load_page(input: &str, user_agent: &str) -> Result<Page> {
    let location = Location::parse(input)?;
    tracing::debug!(?location, "loading page");
    let (source, url) = tokio::task::spawn_blocking({
        let user_agent = user_agent.to_string();
        move || read_location(&location, &user_agent)
    })
    .await
    .context("page load task join")??;
    Ok(Page::parse(&source, Some(url)))
}
