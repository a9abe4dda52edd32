//! Pointer clicks.
//!
//! Without a layout engine, a pointer position is named by a CSS selector.
//! Clicks that land inside frames carry one selector per frame level,
//! separated by `>>`: `iframe#player >> video`.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

const FRAME_SEPARATOR: &str = ">>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    segments: Vec<String>,
}

impl Click {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path
            .split(FRAME_SEPARATOR)
            .map(|s| s.trim().to_string())
            .collect();
        if segments.iter().any(String::is_empty) {
            bail!("empty selector in click path {:?}", path);
        }
        Ok(Self { segments })
    }

    /// Selectors from the top document inwards.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for Click {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Click::parse(s)
    }
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" >> "))
    }
}
