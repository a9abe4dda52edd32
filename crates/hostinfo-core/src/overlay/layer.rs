//! Layers stacked above the page content.

/// Opaque layer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) u64);

/// CSS length subset used by layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Px(u32),
    /// Percent of viewport width.
    Vw(u32),
    /// Percent of viewport height.
    Vh(u32),
}

impl Length {
    pub fn is_zero(&self) -> bool {
        matches!(self, Length::Px(0) | Length::Vw(0) | Length::Vh(0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    /// Busy indicator while the click is being processed.
    Progress,
}

/// Presentation of a layer. Layers are `position: fixed` at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub width: Length,
    pub height: Length,
    pub z_index: i64,
    pub opacity: f32,
    pub background: String,
    pub cursor: Cursor,
}

impl LayerStyle {
    /// Full-viewport, semi-transparent click catcher above all page content.
    pub fn click_catcher() -> Self {
        Self {
            width: Length::Vw(100),
            height: Length::Vh(100),
            z_index: 99_999_999,
            opacity: 0.2,
            background: "#000".to_string(),
            cursor: Cursor::Crosshair,
        }
    }

    /// True when the layer covers no area and cannot receive hits.
    pub fn is_collapsed(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }

    pub fn collapse(&mut self) {
        self.width = Length::Px(0);
        self.height = Length::Px(0);
    }

    pub fn expand(&mut self) {
        self.width = Length::Vw(100);
        self.height = Length::Vh(100);
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub style: LayerStyle,
}
