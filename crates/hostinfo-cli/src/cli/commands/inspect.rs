//! `hostinfo inspect <page>` – the full interaction.

use anyhow::Result;
use hostinfo_core::config::HostinfoConfig;
use hostinfo_core::dom;
use hostinfo_core::inspect::{inspect, Outcome};
use hostinfo_core::overlay::{Click, Viewport};
use hostinfo_core::report::StdoutAlert;
use hostinfo_core::resolve::HostResolver;
use std::io::{self, Write};
use tokio::sync::oneshot;

pub async fn run_inspect(cfg: &HostinfoConfig, page: &str, click: Option<&str>) -> Result<()> {
    let page = dom::load_page(page, &cfg.user_agent).await?;
    let mut viewport = Viewport::new(page).with_user_agent(cfg.user_agent.clone());

    let (tx, rx) = oneshot::channel();
    match click {
        Some(path) => {
            let _ = tx.send(Click::parse(path)?);
        }
        None => {
            tokio::task::spawn_blocking(move || prompt_click(tx));
        }
    }

    let resolver = HostResolver::new(cfg);
    let outcome = inspect(&mut viewport, rx, &resolver, &mut StdoutAlert).await?;
    if let Outcome::Resolved { ip, .. } = outcome {
        tracing::info!(%ip, "inspection complete");
    }
    Ok(())
}

/// Read one click path from stdin. Dropping `tx` without sending abandons the interaction.
fn prompt_click(tx: oneshot::Sender<Click>) {
    eprint!("click (CSS selector, `>>` into frames)> ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if let Err(e) = io::stdin().read_line(&mut line) {
        eprintln!("read click: {}", e);
        return;
    }
    match Click::parse(line.trim()) {
        Ok(click) => {
            let _ = tx.send(click);
        }
        Err(e) => eprintln!("{:#}", e),
    }
}
