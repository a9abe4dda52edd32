//! User-facing messages and the surface that shows them.

use url::Url;

use crate::resolve::HostInfo;

pub const NO_ASSET_MESSAGE: &str = "Failed to find an asset. Is the selected element an <iframe>?";

pub const CROSS_ORIGIN_MESSAGE: &str = "Clicked in a cross-origin iframe.\n\
\n\
Unfortunately elements inside cross-origin iframes can't be inspected.";

/// A blocking, modal text display. One call per message.
pub trait Alert {
    fn alert(&mut self, message: &str);
}

/// Writes each message to stdout followed by a newline.
#[derive(Debug, Default)]
pub struct StdoutAlert;

impl Alert for StdoutAlert {
    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Keeps messages in memory; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct RecordingAlert {
    pub messages: Vec<String>,
}

impl Alert for RecordingAlert {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Report for a resolved asset; `None` info means no asset could be located.
pub fn format_report(url: &Url, info: Option<&HostInfo>) -> String {
    match info {
        None => NO_ASSET_MESSAGE.to_string(),
        Some(info) => format!("\n{}\n\n{}", url, info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_layout() {
        let url = Url::parse("https://i.imgur.com/abc.jpg").unwrap();
        let info = HostInfo {
            owner: Some("AS54113 Fastly".to_string()),
            hostname: Some("h.example".to_string()),
            location: "Paris, FR".to_string(),
        };
        assert_eq!(
            format_report(&url, Some(&info)),
            "\nhttps://i.imgur.com/abc.jpg\n\nLocation: Paris, FR\nHostname: h.example\nOwner: AS54113 Fastly\n"
        );
    }

    #[test]
    fn report_without_info() {
        let url = Url::parse("https://x.example/a.png").unwrap();
        assert_eq!(format_report(&url, None), NO_ASSET_MESSAGE);
    }

    #[test]
    fn recording_alert_keeps_order() {
        let mut a = RecordingAlert::default();
        a.alert("one");
        a.alert("two");
        assert_eq!(a.messages, ["one", "two"]);
    }
}
