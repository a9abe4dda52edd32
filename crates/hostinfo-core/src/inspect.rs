//! One interaction, start to finish: overlay → click → source extraction →
//! DNS → IP info → alert → overlay teardown.

use anyhow::{anyhow, Result};
use std::net::Ipv4Addr;
use tokio::sync::oneshot;
use url::Url;

use crate::extract::extract_source;
use crate::overlay::{Click, CrossOriginIframe, Overlay, Viewport};
use crate::report::{self, Alert};
use crate::resolve::{HostInfo, HostResolver};

/// How an interaction ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved {
        url: Url,
        ip: Ipv4Addr,
        info: HostInfo,
    },
    /// No source URL, or the source's host has no IPv4 address.
    NoAsset { url: Option<Url> },
    CrossOriginIframe(CrossOriginIframe),
}

impl Outcome {
    /// Text shown to the user for this outcome.
    pub fn message(&self) -> String {
        match self {
            Outcome::Resolved { url, info, .. } => report::format_report(url, Some(info)),
            Outcome::NoAsset { .. } => report::NO_ASSET_MESSAGE.to_string(),
            Outcome::CrossOriginIframe(_) => report::CROSS_ORIGIN_MESSAGE.to_string(),
        }
    }
}

/// Run one interaction on `viewport`.
///
/// The result is always shown through `alert`. Cross-origin frames are an
/// [`Outcome`]; any other failure is alerted verbatim and returned as `Err`.
/// The overlay is removed before this returns, whatever happened.
pub async fn inspect(
    viewport: &mut Viewport,
    click: oneshot::Receiver<Click>,
    resolver: &HostResolver,
    alert: &mut dyn Alert,
) -> Result<Outcome> {
    let mut overlay = viewport.open_overlay()?;
    let result = locate_and_resolve(&mut overlay, click, resolver).await;

    let result = match result {
        Ok(outcome) => Ok(outcome),
        Err(err) => match err.downcast::<CrossOriginIframe>() {
            Ok(cross) => {
                tracing::info!(src = %cross.src, "click landed in a cross-origin iframe");
                Ok(Outcome::CrossOriginIframe(cross))
            }
            Err(err) => Err(err),
        },
    };

    match &result {
        Ok(outcome) => alert.alert(&outcome.message()),
        Err(err) => {
            tracing::warn!("interaction failed: {:#}", err);
            alert.alert(&format!("{:#}", err));
        }
    }
    drop(overlay);
    result
}

/// Run the overlay/click part only and return the absolutized source URL.
pub async fn extract_at(viewport: &mut Viewport, click: oneshot::Receiver<Click>) -> Result<Option<Url>> {
    let mut overlay = viewport.open_overlay()?;
    let url = choose_source(&mut overlay, click).await?;
    Ok(url)
}

async fn choose_source(overlay: &mut Overlay<'_>, click: oneshot::Receiver<Click>) -> Result<Option<Url>> {
    let target = overlay.choose_element(click).await?;
    let vp = overlay.viewport();
    let page = vp
        .document(target.frame)
        .ok_or_else(|| anyhow!("frame {:?} is not open", target.frame))?;
    let element = vp
        .element(&target)
        .ok_or_else(|| anyhow!("chosen element is not in the document"))?;

    let Some(src) = extract_source(&element) else {
        tracing::info!(element = %element.describe(), "no media source found");
        return Ok(None);
    };
    let url = page.absolutize(&src);
    if url.is_none() {
        tracing::info!(%src, "source is not a resolvable URL");
    }
    Ok(url)
}

async fn locate_and_resolve(
    overlay: &mut Overlay<'_>,
    click: oneshot::Receiver<Click>,
    resolver: &HostResolver,
) -> Result<Outcome> {
    let Some(url) = choose_source(overlay, click).await? else {
        return Ok(Outcome::NoAsset { url: None });
    };
    tracing::info!(%url, "resolving host of source");
    Ok(match resolver.resolve(&url).await? {
        Some((ip, info)) => Outcome::Resolved { url, ip, info },
        None => Outcome::NoAsset { url: Some(url) },
    })
}
