//! `hostinfo extract <page> --click <path>` – print the media source URL only.

use anyhow::Result;
use hostinfo_core::config::HostinfoConfig;
use hostinfo_core::dom;
use hostinfo_core::inspect::extract_at;
use hostinfo_core::overlay::{Click, Viewport};
use hostinfo_core::report::NO_ASSET_MESSAGE;
use tokio::sync::oneshot;

pub async fn run_extract(cfg: &HostinfoConfig, page: &str, click: &str) -> Result<()> {
    let click = Click::parse(click)?;
    let page = dom::load_page(page, &cfg.user_agent).await?;
    let mut viewport = Viewport::new(page).with_user_agent(cfg.user_agent.clone());

    let (tx, rx) = oneshot::channel();
    let _ = tx.send(click);
    match extract_at(&mut viewport, rx).await? {
        Some(url) => println!("{}", url),
        None => println!("{}", NO_ASSET_MESSAGE),
    }
    Ok(())
}
