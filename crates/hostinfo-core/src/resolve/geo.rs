//! IP ownership/location response and its projection into [`HostInfo`].

use serde::Deserialize;
use std::fmt;

/// Raw IP info response (`{org, hostname, city?, country}`); other fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct IpInfoResponse {
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Who runs a host and where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub owner: Option<String>,
    pub hostname: Option<String>,
    /// `"city, country"` when a city is known, else `"country"`.
    pub location: String,
}

impl From<IpInfoResponse> for HostInfo {
    fn from(r: IpInfoResponse) -> Self {
        let country = r.country.unwrap_or_default();
        let location = match r.city.as_deref().map(str::trim) {
            Some(city) if !city.is_empty() => format!("{}, {}", city, country),
            _ => country,
        };
        HostInfo {
            owner: r.org,
            hostname: r.hostname,
            location,
        }
    }
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Hostname: {}", self.hostname.as_deref().unwrap_or("unknown"))?;
        writeln!(f, "Owner: {}", self.owner.as_deref().unwrap_or("unknown"))
    }
}
