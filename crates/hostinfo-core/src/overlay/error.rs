/// The click landed in a frame whose document the page may not inspect
/// (different origin than its parent). Downcast from `anyhow::Error` to report it specifically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clicked in a cross-origin iframe ({src})")]
pub struct CrossOriginIframe {
    /// Frame `src` as written in the parent document.
    pub src: String,
}
