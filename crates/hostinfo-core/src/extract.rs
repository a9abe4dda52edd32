//! Media source extraction: find the most specific image/video/background URL
//! behind an element.
//!
//! Rules are tried in order and the first applicable one decides the result:
//!
//! 1. `<source>` elements below the element, then below its parent: first
//!    non-empty `src`, else the first candidate of `srcset`.
//! 2. The element itself is `<img>` or `<video>`: its `src`.
//! 3. First `<img>` descendant, else first `<video>` descendant: its `src`.
//! 4. Computed `background-image: url(...)`.
//! 5. Depth-first over the children, leftmost first.
//!
//! Values are returned as written in the document; callers resolve them
//! against the page base URL.

use crate::dom::ElementLike;

const MEDIA_TAGS: [&str; 2] = ["img", "video"];

/// Extract the media source URL for `element`, or `None` if nothing applies.
pub fn extract_source<E: ElementLike>(element: &E) -> Option<String> {
    let mut sources = element.descendants_by_tag("source");
    if let Some(parent) = element.parent() {
        sources.extend(parent.descendants_by_tag("source"));
    }
    if !sources.is_empty() {
        return sources.iter().find_map(source_candidate);
    }

    let tag = element.tag();
    if MEDIA_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
        return non_empty(element.attr("src"));
    }

    for media in MEDIA_TAGS {
        if let Some(first) = element.descendants_by_tag(media).first() {
            return non_empty(first.attr("src"));
        }
    }

    if let Some(url) = element
        .background_image()
        .as_deref()
        .and_then(parse_css_url)
    {
        return Some(url);
    }

    element
        .children()
        .iter()
        .find_map(|child| extract_source(child))
}

/// `src`, else the first `srcset` candidate, of a `<source>` element.
fn source_candidate<E: ElementLike>(source: &E) -> Option<String> {
    non_empty(source.attr("src")).or_else(|| source.attr("srcset").and_then(first_srcset_candidate))
}

/// First URL of a `srcset` value: `"a.jpg 480w, b.jpg 800w"` → `"a.jpg"`.
pub fn first_srcset_candidate(srcset: &str) -> Option<String> {
    let token = srcset.split_whitespace().next()?;
    let token = token.strip_suffix(',').unwrap_or(token);
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Value of the first CSS `url(...)` with quotes removed.
///
/// `url("bg.png")` → `bg.png`; with several layers
/// (`url(a.png), url(b.png)`) only the first counts. Returns `None` for
/// values without a `url(` (`none`, gradients).
pub fn parse_css_url(value: &str) -> Option<String> {
    let start = value.to_ascii_lowercase().find("url(")? + 4;
    let rest = value[start..].trim_start();
    let inner = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let quoted = &rest[1..];
            &quoted[..quoted.find(quote).unwrap_or(quoted.len())]
        }
        _ => &rest[..rest.find(')').unwrap_or(rest.len())],
    };
    let inner = inner.trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;

    fn extract(html: &str, selector: &str) -> Option<String> {
        let page = Page::parse(html, None);
        let el = page.select_first(selector).unwrap().expect("selector matches");
        extract_source(&el)
    }

    #[test]
    fn srcset_descriptor_is_stripped() {
        let html = r#"<video id="v"><source srcset="a.jpg 480w"></video>"#;
        assert_eq!(extract(html, "#v").as_deref(), Some("a.jpg"));
    }

    #[test]
    fn source_sibling_in_picture() {
        let html = r#"<picture><source srcset="wide.webp 1200w, narrow.webp 600w">
                      <img id="i" src="fallback.jpg"></picture>"#;
        assert_eq!(extract(html, "#i").as_deref(), Some("wide.webp"));
    }

    #[test]
    fn source_src_preferred_over_srcset() {
        let html = r#"<video id="v"><source src="clip.mp4" srcset="x.jpg 1x"></video>"#;
        assert_eq!(extract(html, "#v").as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn first_non_empty_source_wins() {
        let html = r#"<video id="v"><source src=""><source src="second.webm"></video>"#;
        assert_eq!(extract(html, "#v").as_deref(), Some("second.webm"));
    }

    #[test]
    fn empty_sources_do_not_fall_back() {
        let html = r#"<div><video id="v" src="v.mp4"><source src=""></video></div>"#;
        assert_eq!(extract(html, "#v"), None);
    }

    #[test]
    fn plain_img() {
        assert_eq!(extract(r#"<img id="i" src="x.png">"#, "#i").as_deref(), Some("x.png"));
    }

    #[test]
    fn img_without_src_is_none() {
        assert_eq!(extract(r#"<div><img id="i"></div>"#, "#i"), None);
    }

    #[test]
    fn container_with_video_descendant() {
        let html = r#"<div id="c"><span><video src="v.mp4"></video></span></div>"#;
        assert_eq!(extract(html, "#c").as_deref(), Some("v.mp4"));
    }

    #[test]
    fn img_descendant_before_video_descendant() {
        let html = r#"<div id="c"><video src="v.mp4"></video><img src="poster.png"></div>"#;
        assert_eq!(extract(html, "#c").as_deref(), Some("poster.png"));
    }

    #[test]
    fn background_image_url() {
        let html = r#"<div id="d" style='background-image: url("bg.png")'></div>"#;
        assert_eq!(extract(html, "#d").as_deref(), Some("bg.png"));
    }

    #[test]
    fn recursion_finds_background_in_child() {
        let html = r#"<section id="s"><p>text</p><div style="background-image:url(deep.gif)"></div></section>"#;
        assert_eq!(extract(html, "#s").as_deref(), Some("deep.gif"));
    }

    #[test]
    fn nothing_found() {
        let html = r#"<article id="a"><p>just <b>text</b></p></article>"#;
        assert_eq!(extract(html, "#a"), None);
    }

    #[test]
    fn gradient_background_is_not_a_url() {
        let html = r#"<div id="d" style="background-image: linear-gradient(red, blue)"></div>"#;
        assert_eq!(extract(html, "#d"), None);
    }

    #[test]
    fn parse_css_url_quotes() {
        assert_eq!(parse_css_url(r#"url("bg.png")"#).as_deref(), Some("bg.png"));
        assert_eq!(parse_css_url("url('bg.png')").as_deref(), Some("bg.png"));
        assert_eq!(parse_css_url("URL( bg.png )").as_deref(), Some("bg.png"));
        assert_eq!(parse_css_url("none"), None);
        assert_eq!(parse_css_url("url()"), None);
    }

    #[test]
    fn parse_css_url_takes_first_layer() {
        assert_eq!(parse_css_url("url(a.png), url(b.png)").as_deref(), Some("a.png"));
        assert_eq!(
            parse_css_url(r#"url("https://a.example/x.png"), url("https://b.example/y.png")"#).as_deref(),
            Some("https://a.example/x.png")
        );
        assert_eq!(parse_css_url(r#"url("a(1).png")"#).as_deref(), Some("a(1).png"));
        assert_eq!(
            parse_css_url("linear-gradient(red, blue), url(over.png)").as_deref(),
            Some("over.png")
        );
    }

    #[test]
    fn layered_background_uses_first_url() {
        let html = r#"<div id="d" style="background-image: url(a.png), url(b.png)"></div>"#;
        assert_eq!(extract(html, "#d").as_deref(), Some("a.png"));
    }

    #[test]
    fn srcset_first_candidate() {
        assert_eq!(first_srcset_candidate("  a.jpg 480w").as_deref(), Some("a.jpg"));
        assert_eq!(first_srcset_candidate("a.jpg, b.jpg 2x").as_deref(), Some("a.jpg"));
        assert_eq!(first_srcset_candidate("   "), None);
    }
}
