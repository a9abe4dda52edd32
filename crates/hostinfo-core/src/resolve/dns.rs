//! DNS-over-HTTPS JSON responses.
//!
//! Two shapes are accepted:
//! - `{"Answer": [{"type": 1, "data": "1.2.3.4"}]}` (Google / Cloudflare style)
//! - `{"answer": [{"type": "A", "rdata": "1.2.3.4"}]}`

use serde::Deserialize;
use std::net::Ipv4Addr;

/// A record type code for IPv4 addresses.
const TYPE_A: u16 = 1;

#[derive(Debug, Deserialize)]
pub struct DnsResponse {
    #[serde(rename = "Answer", alias = "answer", default)]
    pub answer: Vec<DnsAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct DnsAnswer {
    #[serde(rename = "type")]
    pub kind: RecordType,
    #[serde(alias = "rdata", default)]
    pub data: Option<String>,
}

/// Record type as a numeric code or a mnemonic.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordType {
    Code(u16),
    Name(String),
}

impl RecordType {
    pub fn is_a(&self) -> bool {
        match self {
            RecordType::Code(code) => *code == TYPE_A,
            RecordType::Name(name) => name.eq_ignore_ascii_case("A"),
        }
    }
}

impl DnsResponse {
    /// Address of the first `A` answer in response order; `None` when its data is not an IPv4 address.
    pub fn first_ipv4(&self) -> Option<Ipv4Addr> {
        let first = self.answer.iter().find(|a| a.kind.is_a())?;
        first.data.as_deref()?.trim().parse().ok()
    }
}
