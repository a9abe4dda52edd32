//! Interaction overlay: a full-viewport layer that captures one click and
//! turns it into a page element.
//!
//! Lifecycle: absent → created → awaiting-click → resolving-element → consumed.
//! The overlay is an RAII guard over the viewport; dropping it removes the
//! layer and closes the frames opened during the interaction, so every exit
//! path tears it down.

mod click;
mod error;
mod layer;
mod viewport;

pub use click::Click;
pub use error::CrossOriginIframe;
pub use layer::{Cursor, Layer, LayerId, LayerStyle, Length};
pub use viewport::{Hit, Target, Viewport};

use anyhow::{anyhow, bail, Result};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Created,
    AwaitingClick,
    ResolvingElement,
    Consumed,
}

/// The click-capturing layer of one interaction.
pub struct Overlay<'v> {
    viewport: &'v mut Viewport,
    layer: LayerId,
    state: OverlayState,
}

impl Viewport {
    /// Put a click catcher above the page. Only one overlay may exist at a time.
    pub fn open_overlay(&mut self) -> Result<Overlay<'_>> {
        if !self.layers().is_empty() {
            bail!("an overlay is already open");
        }
        let layer = self.push_layer(LayerStyle::click_catcher());
        tracing::debug!(?layer, "overlay created");
        Ok(Overlay {
            viewport: self,
            layer,
            state: OverlayState::Created,
        })
    }
}

impl<'v> Overlay<'v> {
    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn viewport(&self) -> &Viewport {
        self.viewport
    }

    fn style_mut(&mut self) -> Result<&mut LayerStyle> {
        let id = self.layer;
        self.viewport
            .layer_mut(id)
            .map(|l| &mut l.style)
            .ok_or_else(|| anyhow!("overlay layer {:?} is gone", id))
    }

    /// Wait for the click, then locate the element beneath it.
    ///
    /// The layer is collapsed while hit-testing so it does not catch the hit
    /// itself, then restored with a busy cursor for the rest of the interaction.
    /// A dropped sender means the interaction was abandoned.
    pub async fn choose_element(&mut self, click: oneshot::Receiver<Click>) -> Result<Target> {
        if self.state != OverlayState::Created {
            bail!("overlay already used ({:?})", self.state);
        }
        self.state = OverlayState::AwaitingClick;
        let click = click
            .await
            .map_err(|_| anyhow!("interaction abandoned before a click"))?;
        tracing::debug!(%click, "click received");

        self.state = OverlayState::ResolvingElement;
        self.style_mut()?.collapse();
        let hit = self.viewport.hit_test(&click).await;
        {
            let style = self.style_mut()?;
            style.expand();
            style.cursor = layer::Cursor::Progress;
        }
        self.state = OverlayState::Consumed;

        let target = hit?;
        if let Some(el) = self.viewport.element(&target) {
            tracing::debug!(element = %el.describe(), frame = ?target.frame, "element chosen");
        }
        Ok(target)
    }
}

impl Drop for Overlay<'_> {
    fn drop(&mut self) {
        if self.viewport.remove_layer(self.layer) {
            tracing::debug!(layer = ?self.layer, "overlay removed");
        }
        let frames = self.viewport.close_frames();
        if frames > 0 {
            tracing::debug!(frames, "frames closed");
        }
    }
}
