//! The viewport: top-level page, frames opened while hit-testing, and layers above them.

use anyhow::{anyhow, Context, Result};
use url::Url;

use super::click::Click;
use super::error::CrossOriginIframe;
use super::layer::{Cursor, Layer, LayerId, LayerStyle};
use crate::dom::{self, ElementLike, Page, PageElement};

/// An element located by a hit test: frame (`None` = top document) and document-order position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub frame: Option<usize>,
    pub ordinal: usize,
}

/// What sits under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Layer(LayerId),
    Element(usize),
    Nothing,
}

/// How a frame's document can be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FrameContent {
    /// `srcdoc` or an empty frame; shares the parent's origin and base URL.
    Inline(String),
    /// Same-origin `src`, fetched.
    Fetch(Url),
}

#[derive(Debug)]
struct Frame {
    page: Page,
}

#[derive(Debug)]
pub struct Viewport {
    page: Page,
    frames: Vec<Frame>,
    layers: Vec<Layer>,
    next_layer: u64,
    user_agent: String,
}

impl Viewport {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            frames: Vec::new(),
            layers: Vec::new(),
            next_layer: 0,
            user_agent: concat!("hostinfo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// User-Agent used when fetching same-origin frames.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Document of the top page (`None`) or of an opened frame.
    pub fn document(&self, frame: Option<usize>) -> Option<&Page> {
        match frame {
            None => Some(&self.page),
            Some(i) => self.frames.get(i).map(|f| &f.page),
        }
    }

    pub fn element(&self, target: &Target) -> Option<PageElement<'_>> {
        self.document(target.frame)?.element_at(target.ordinal)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub(crate) fn push_layer(&mut self, style: LayerStyle) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.push(Layer { id, style });
        id
    }

    /// Forget the frames opened by the last interaction; their targets become stale.
    pub(crate) fn close_frames(&mut self) -> usize {
        let closed = self.frames.len();
        self.frames.clear();
        closed
    }

    pub(crate) fn remove_layer(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        before != self.layers.len()
    }

    /// Cursor shown over the page: that of the topmost layer, if any.
    pub fn cursor(&self) -> Cursor {
        self.layers
            .iter()
            .max_by_key(|l| l.style.z_index)
            .map(|l| l.style.cursor)
            .unwrap_or_default()
    }

    /// What a pointer at `point` hits in `frame`. Uncollapsed layers cover the
    /// top document, so they take the hit before any element.
    pub fn element_from_point(&self, frame: Option<usize>, point: &str) -> Result<Hit> {
        if frame.is_none() {
            if let Some(layer) = self
                .layers
                .iter()
                .filter(|l| !l.style.is_collapsed())
                .max_by_key(|l| l.style.z_index)
            {
                return Ok(Hit::Layer(layer.id));
            }
        }
        let page = self
            .document(frame)
            .ok_or_else(|| anyhow!("no such frame: {:?}", frame))?;
        Ok(match page.select_first(point)? {
            Some(el) => page
                .ordinal_of(&el)
                .map(Hit::Element)
                .unwrap_or(Hit::Nothing),
            None => Hit::Nothing,
        })
    }

    /// Locate the element under `click`, descending into frames along its path.
    pub async fn hit_test(&mut self, click: &Click) -> Result<Target> {
        let mut frame: Option<usize> = None;
        let mut segments = click.segments().iter();
        let mut point = segments.next().map(String::as_str);

        loop {
            let ordinal = match point {
                Some(p) => match self.element_from_point(frame, p)? {
                    Hit::Element(ordinal) => ordinal,
                    Hit::Layer(id) => {
                        return Err(anyhow!("click landed on layer {:?}, not the page", id))
                    }
                    Hit::Nothing => return Err(anyhow!("no element under the pointer at {:?}", p)),
                },
                None => {
                    let page = self
                        .document(frame)
                        .ok_or_else(|| anyhow!("no such frame: {:?}", frame))?;
                    let body = page.body();
                    page.ordinal_of(&body)
                        .ok_or_else(|| anyhow!("frame document has no body"))?
                }
            };

            let target = Target { frame, ordinal };
            let is_frame = self
                .element(&target)
                .map(|el| el.tag().eq_ignore_ascii_case("iframe"))
                .unwrap_or(false);
            if !is_frame {
                if let Some(extra) = segments.next() {
                    let found = self
                        .element(&target)
                        .map(|el| el.describe())
                        .unwrap_or_default();
                    return Err(anyhow!(
                        "click path continues with {:?} but {} is not an iframe",
                        extra,
                        found
                    ));
                }
                return Ok(target);
            }

            frame = Some(self.open_frame(&target).await?);
            point = segments.next().map(String::as_str);
        }
    }

    /// Open the document of the `<iframe>` at `target` and return its frame index.
    async fn open_frame(&mut self, target: &Target) -> Result<usize> {
        let content = {
            let page = self
                .document(target.frame)
                .ok_or_else(|| anyhow!("no such frame: {:?}", target.frame))?;
            let el = page
                .element_at(target.ordinal)
                .ok_or_else(|| anyhow!("frame element vanished"))?;
            frame_content(page, &el)?
        };

        let page = match content {
            FrameContent::Inline(source) => {
                let parent = self
                    .document(target.frame)
                    .ok_or_else(|| anyhow!("no such frame: {:?}", target.frame))?;
                Page::parse_inline(&source, parent)
            }
            FrameContent::Fetch(url) => {
                tracing::debug!(%url, "fetching same-origin frame");
                let (source, final_url) = tokio::task::spawn_blocking({
                    let user_agent = self.user_agent.clone();
                    move || dom::fetch_document(&url, &user_agent)
                })
                .await
                .context("frame fetch task join")??;
                Page::parse(&source, Some(final_url))
            }
        };
        self.frames.push(Frame { page });
        Ok(self.frames.len() - 1)
    }
}

/// Decide whether the frame's document may be inspected from `parent`.
fn frame_content(parent: &Page, iframe: &PageElement<'_>) -> Result<FrameContent, CrossOriginIframe> {
    if let Some(srcdoc) = iframe.attr("srcdoc") {
        return Ok(FrameContent::Inline(srcdoc.to_string()));
    }
    let src = iframe.attr("src").map(str::trim).unwrap_or("");
    if src.is_empty() || src.eq_ignore_ascii_case("about:blank") {
        return Ok(FrameContent::Inline(String::new()));
    }
    let cross_origin = || CrossOriginIframe {
        src: src.to_string(),
    };
    let url = parent.absolutize(src).ok_or_else(cross_origin)?;
    let parent_origin = parent.origin();
    if parent_origin.is_tuple() && url.origin() == parent_origin {
        Ok(FrameContent::Fetch(url))
    } else {
        Err(cross_origin())
    }
}
