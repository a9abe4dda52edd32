//! Page model: a parsed HTML document with its base URL and author styles.
//!
//! [`ElementLike`] is the narrow view of an element the source extractor
//! needs; [`PageElement`] implements it over `scraper`.

mod load;
mod style;

pub use load::{fetch_document, load_page, read_location, Location};
pub use style::StyleSheet;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use url::{Origin, Url};

/// The capabilities the source extractor relies on.
pub trait ElementLike: Sized {
    /// Lowercase tag name.
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn parent(&self) -> Option<Self>;
    /// Child elements in document order.
    fn children(&self) -> Vec<Self>;
    /// Descendant elements (excluding `self`) with the given tag, in document order.
    fn descendants_by_tag(&self, tag: &str) -> Vec<Self>;
    /// Computed `background-image`, `None` when unset or `none`.
    fn background_image(&self) -> Option<String>;
}

/// A parsed document.
#[derive(Debug)]
pub struct Page {
    html: Html,
    url: Option<Url>,
    base: Option<Url>,
    styles: StyleSheet,
}

impl Page {
    /// Parse `source` as an HTML document fetched from `url` (if known).
    pub fn parse(source: &str, url: Option<Url>) -> Self {
        let html = Html::parse_document(source);
        let styles = StyleSheet::from_document(&html);
        let base = document_base(&html, url.as_ref());
        Self {
            html,
            url,
            base,
            styles,
        }
    }

    /// Parse an inline frame document (`srcdoc` or blank). It shares the
    /// parent's URL and origin and resolves references against the parent's base.
    pub fn parse_inline(source: &str, parent: &Page) -> Self {
        let html = Html::parse_document(source);
        let styles = StyleSheet::from_document(&html);
        let base = document_base(&html, parent.base.as_ref());
        Self {
            html,
            url: parent.url.clone(),
            base,
            styles,
        }
    }

    /// URL the document was loaded from.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Base URL for relative references (`<base href>` or the document URL).
    pub fn base_url(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Origin of the document; opaque when the URL is unknown or not a tuple origin.
    pub fn origin(&self) -> Origin {
        match &self.url {
            Some(u) => u.origin(),
            None => Origin::new_opaque(),
        }
    }

    /// Resolve a reference from the document against its base URL.
    pub fn absolutize(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        match &self.base {
            Some(base) => base.join(reference).ok(),
            None => Url::parse(reference).ok(),
        }
    }

    pub fn root(&self) -> PageElement<'_> {
        self.wrap(self.html.root_element())
    }

    /// The `<body>` element, or the root element when there is none.
    pub fn body(&self) -> PageElement<'_> {
        self.root()
            .children()
            .into_iter()
            .find(|c| c.tag() == "body")
            .unwrap_or_else(|| self.root())
    }

    /// First element matching a CSS selector, in document order.
    pub fn select_first(&self, selector: &str) -> Result<Option<PageElement<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| anyhow!("invalid selector {:?}: {:?}", selector, e))?;
        Ok(self.html.select(&sel).next().map(|el| self.wrap(el)))
    }

    /// Element at document-order position `ordinal` (root element is 0).
    pub fn element_at(&self, ordinal: usize) -> Option<PageElement<'_>> {
        self.elements().nth(ordinal).map(|el| self.wrap(el))
    }

    /// Document-order position of `element`, the inverse of [`Page::element_at`].
    pub fn ordinal_of(&self, element: &PageElement<'_>) -> Option<usize> {
        let id = element.el.id();
        self.elements().position(|el| el.id() == id)
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    fn wrap<'a>(&'a self, el: ElementRef<'a>) -> PageElement<'a> {
        PageElement {
            el,
            styles: &self.styles,
        }
    }
}

fn document_base(html: &Html, url: Option<&Url>) -> Option<Url> {
    let href = Selector::parse("base[href]")
        .ok()
        .and_then(|sel| html.select(&sel).next())
        .and_then(|el| el.value().attr("href"))
        .map(str::trim);
    match (href, url) {
        (Some(href), Some(url)) => url.join(href).ok().or_else(|| Some(url.clone())),
        (Some(href), None) => Url::parse(href).ok(),
        (None, url) => url.cloned(),
    }
}

/// An element of a [`Page`].
#[derive(Debug, Clone, Copy)]
pub struct PageElement<'a> {
    el: ElementRef<'a>,
    styles: &'a StyleSheet,
}

impl<'a> PageElement<'a> {
    fn wrap(&self, el: ElementRef<'a>) -> Self {
        Self {
            el,
            styles: self.styles,
        }
    }

    /// Short human-readable description, e.g. `video#player.hero`.
    pub fn describe(&self) -> String {
        let v = self.el.value();
        let mut s = v.name().to_string();
        if let Some(id) = v.id() {
            s.push('#');
            s.push_str(id);
        }
        for class in v.classes() {
            s.push('.');
            s.push_str(class);
        }
        s
    }
}

impl<'a> ElementLike for PageElement<'a> {
    fn tag(&self) -> &str {
        self.el.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.el.value().attr(name)
    }

    fn parent(&self) -> Option<Self> {
        self.el
            .parent()
            .and_then(ElementRef::wrap)
            .map(|p| self.wrap(p))
    }

    fn children(&self) -> Vec<Self> {
        self.el
            .children()
            .filter_map(ElementRef::wrap)
            .map(|c| self.wrap(c))
            .collect()
    }

    fn descendants_by_tag(&self, tag: &str) -> Vec<Self> {
        let own = self.el.id();
        self.el
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|d| d.id() != own && d.value().name().eq_ignore_ascii_case(tag))
            .map(|d| self.wrap(d))
            .collect()
    }

    fn background_image(&self) -> Option<String> {
        self.styles.background_image(&self.el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_href_overrides_document_url() {
        let page = Page::parse(
            r#"<head><base href="https://cdn.example.com/assets/"></head><body></body>"#,
            Some(Url::parse("https://www.example.com/page.html").unwrap()),
        );
        assert_eq!(
            page.absolutize("img/a.png").unwrap().as_str(),
            "https://cdn.example.com/assets/img/a.png"
        );
        assert_eq!(
            page.url().unwrap().as_str(),
            "https://www.example.com/page.html"
        );
    }

    #[test]
    fn inline_document_keeps_parent_origin_and_base() {
        let parent = Page::parse(
            r#"<head><base href="https://cdn.other.example/assets/"></head>"#,
            Some(Url::parse("https://www.example.com/page.html").unwrap()),
        );
        let inline = Page::parse_inline("<img src=a.png>", &parent);
        assert_eq!(inline.origin(), parent.origin());
        assert_eq!(
            inline.absolutize("a.png").unwrap().as_str(),
            "https://cdn.other.example/assets/a.png"
        );
    }

    #[test]
    fn absolutize_without_base_needs_absolute_reference() {
        let page = Page::parse("<p></p>", None);
        assert!(page.absolutize("a.png").is_none());
        assert_eq!(
            page.absolutize(" https://x.example/a.png ").unwrap().as_str(),
            "https://x.example/a.png"
        );
    }

    #[test]
    fn ordinal_roundtrip_and_body() {
        let page = Page::parse(r#"<div><span id="s"></span></div>"#, None);
        let span = page.select_first("#s").unwrap().unwrap();
        let ord = page.ordinal_of(&span).unwrap();
        assert_eq!(page.element_at(ord).unwrap().describe(), "span#s");
        assert_eq!(page.body().tag(), "body");
        assert_eq!(page.element_at(0).unwrap().tag(), "html");
    }

    #[test]
    fn descendants_exclude_self() {
        let page = Page::parse(r#"<div id="outer"><div id="inner"></div></div>"#, None);
        let outer = page.select_first("#outer").unwrap().unwrap();
        let divs = outer.descendants_by_tag("div");
        assert_eq!(divs.len(), 1);
        assert_eq!(divs[0].attr("id"), Some("inner"));
        assert_eq!(divs[0].parent().unwrap().attr("id"), Some("outer"));
    }

    #[test]
    fn invalid_selector_is_error() {
        let page = Page::parse("<p></p>", None);
        assert!(page.select_first("p[").is_err());
    }

    #[test]
    fn opaque_origin_for_unknown_url() {
        let page = Page::parse("<p></p>", None);
        assert!(!page.origin().is_tuple());
    }
}
