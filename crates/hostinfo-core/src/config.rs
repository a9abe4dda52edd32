use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default DNS-over-HTTPS JSON endpoint (Google Public DNS).
pub const DEFAULT_DNS_ENDPOINT: &str = "https://dns.google/resolve";
/// Default IP ownership/geolocation endpoint.
pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipinfo.io";

/// Global configuration loaded from `~/.config/hostinfo/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostinfoConfig {
    /// DNS JSON endpoint; queried as `{dns_endpoint}?name=<host>&type=A`.
    pub dns_endpoint: String,
    /// IP info endpoint; queried as `{geo_endpoint}/<ipv4>/json`.
    pub geo_endpoint: String,
    /// Optional ipinfo access token, sent as `?token=`.
    #[serde(default)]
    pub ipinfo_token: Option<String>,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!("hostinfo/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HostinfoConfig {
    fn default() -> Self {
        Self {
            dns_endpoint: DEFAULT_DNS_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            ipinfo_token: None,
            user_agent: default_user_agent(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hostinfo")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HostinfoConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HostinfoConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HostinfoConfig = toml::from_str(&data)?;
    Ok(cfg)
}
