//! Host resolution: URL → IPv4 (DNS JSON endpoint) → owner/location (IP info endpoint).
//!
//! The two lookups are strictly sequential; the second needs the first's
//! answer. Curl calls run on the blocking pool.

mod dns;
mod geo;

pub use dns::{DnsAnswer, DnsResponse, RecordType};
pub use geo::{HostInfo, IpInfoResponse};

use anyhow::{Context, Result};
use std::net::Ipv4Addr;
use url::{Host, Url};

use crate::config::HostinfoConfig;
use crate::fetch;

const DNS_JSON: &str = "application/dns-json";

/// Endpoints and client settings for the two lookups.
#[derive(Debug, Clone)]
pub struct HostResolver {
    dns_endpoint: String,
    geo_endpoint: String,
    token: Option<String>,
    user_agent: String,
}

impl HostResolver {
    pub fn new(cfg: &HostinfoConfig) -> Self {
        Self {
            dns_endpoint: cfg.dns_endpoint.clone(),
            geo_endpoint: cfg.geo_endpoint.trim_end_matches('/').to_string(),
            token: cfg.ipinfo_token.clone().filter(|t| !t.is_empty()),
            user_agent: cfg.user_agent.clone(),
        }
    }

    /// Request URL for the `A` records of `hostname`.
    pub fn dns_query_url(&self, hostname: &str) -> Result<Url> {
        let mut url = Url::parse(&self.dns_endpoint)
            .with_context(|| format!("invalid DNS endpoint: {}", self.dns_endpoint))?;
        url.query_pairs_mut()
            .append_pair("name", hostname)
            .append_pair("type", "A");
        Ok(url)
    }

    /// Request URL for the IP info of `ip`.
    pub fn host_info_url(&self, ip: Ipv4Addr) -> Result<Url> {
        let raw = format!("{}/{}/json", self.geo_endpoint, ip);
        let mut url =
            Url::parse(&raw).with_context(|| format!("invalid IP info endpoint: {}", raw))?;
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(url)
    }

    /// IPv4 address of the host serving `url`.
    ///
    /// IPv4 literal hosts are returned as-is. URLs without a domain host
    /// (`data:`, `file:`, IPv6 literals) and DNS answers without an `A`
    /// record give `Ok(None)`. Transport and decode failures are errors.
    pub async fn resolve_ipv4(&self, url: &Url) -> Result<Option<Ipv4Addr>> {
        let hostname = match url.host() {
            Some(Host::Ipv4(ip)) => return Ok(Some(ip)),
            Some(Host::Domain(d)) if !d.is_empty() => d.to_string(),
            _ => {
                tracing::debug!(%url, "no domain host to resolve");
                return Ok(None);
            }
        };
        let query = self.dns_query_url(&hostname)?;
        let user_agent = self.user_agent.clone();
        let response: DnsResponse = tokio::task::spawn_blocking(move || {
            fetch::get_json(query.as_str(), Some(DNS_JSON), &user_agent)
        })
        .await
        .context("DNS lookup task join")??;
        let ip = response.first_ipv4();
        tracing::debug!(%hostname, ?ip, answers = response.answer.len(), "DNS lookup");
        Ok(ip)
    }

    /// Owner, hostname and location of `ip`.
    pub async fn lookup_host_info(&self, ip: Ipv4Addr) -> Result<HostInfo> {
        let query = self.host_info_url(ip)?;
        let user_agent = self.user_agent.clone();
        let response: IpInfoResponse = tokio::task::spawn_blocking(move || {
            fetch::get_json(query.as_str(), None, &user_agent)
        })
        .await
        .context("IP info task join")??;
        let info = HostInfo::from(response);
        tracing::debug!(%ip, ?info, "IP info lookup");
        Ok(info)
    }

    /// Both lookups in sequence. `Ok(None)` when the host has no IPv4 address.
    pub async fn resolve(&self, url: &Url) -> Result<Option<(Ipv4Addr, HostInfo)>> {
        match self.resolve_ipv4(url).await? {
            Some(ip) => Ok(Some((ip, self.lookup_host_info(ip).await?))),
            None => Ok(None),
        }
    }
}
