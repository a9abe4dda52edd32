//! `hostinfo resolve <url>` – host lookups for a known asset URL.

use anyhow::{Context, Result};
use hostinfo_core::config::HostinfoConfig;
use hostinfo_core::report::format_report;
use hostinfo_core::resolve::HostResolver;
use url::Url;

pub async fn run_resolve(cfg: &HostinfoConfig, url: &str) -> Result<()> {
    let url = Url::parse(url).with_context(|| format!("invalid URL: {}", url))?;
    let resolver = HostResolver::new(cfg);
    match resolver.resolve(&url).await? {
        Some((ip, info)) => {
            println!("{}", format_report(&url, Some(&info)));
            println!("Address: {}", ip);
        }
        None => println!("{}", format_report(&url, None)),
    }
    Ok(())
}
