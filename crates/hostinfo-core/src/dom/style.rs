//! Minimal computed-style approximation for `background-image`.
//!
//! Collects rules from the page's `<style>` elements and the element's inline
//! `style` attribute. Matching rules apply in document order and inline
//! declarations win; selector specificity is not modelled.

use scraper::{ElementRef, Html, Selector};

use crate::extract::parse_css_url;

/// One `selector { declarations }` rule from a `<style>` block.
#[derive(Debug)]
struct StyleRule {
    selector: Selector,
    declarations: Vec<(String, String)>,
}

/// All author style rules of one document.
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Collect rules from every `<style>` element of `html`.
    pub fn from_document(html: &Html) -> Self {
        let mut rules = Vec::new();
        if let Ok(style_sel) = Selector::parse("style") {
            for style in html.select(&style_sel) {
                let css: String = style.text().collect();
                rules.extend(parse_rules(&css));
            }
        }
        tracing::trace!(rules = rules.len(), "collected style rules");
        Self { rules }
    }

    /// Computed `background-image` for `el`, or `None` when unset or `none`.
    pub fn background_image(&self, el: &ElementRef<'_>) -> Option<String> {
        let mut value: Option<String> = None;
        for rule in &self.rules {
            if rule.selector.matches(el) {
                if let Some(v) = background_from(&rule.declarations) {
                    value = Some(v);
                }
            }
        }
        if let Some(inline) = el.value().attr("style") {
            if let Some(v) = background_from(&parse_declarations(inline)) {
                value = Some(v);
            }
        }
        value.filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
    }
}

/// Last `background-image` (or `url(...)` inside a `background` shorthand) in a declaration block.
fn background_from(declarations: &[(String, String)]) -> Option<String> {
    let mut found = None;
    for (name, value) in declarations {
        if name == "background-image" {
            found = Some(value.clone());
        } else if name == "background" {
            if let Some(url) = parse_css_url(value) {
                found = Some(format!("url(\"{}\")", url));
            } else {
                // Shorthand without an image resets background-image.
                found = Some("none".to_string());
            }
        }
    }
    found
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn parse_rules(css: &str) -> Vec<StyleRule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();
    while let Some(open) = rest.find('{') {
        // Statement at-rules (`@import ...;`) end before the real prelude.
        let prelude = rest[..open].rsplit(';').next().unwrap_or("").trim();
        let body_start = open + 1;
        let mut depth = 1usize;
        let mut close = None;
        for (i, c) in rest[body_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(body_start + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else { break };
        if !prelude.starts_with('@') && !prelude.is_empty() {
            match Selector::parse(prelude) {
                Ok(selector) => rules.push(StyleRule {
                    selector,
                    declarations: parse_declarations(&rest[body_start..close]),
                }),
                Err(e) => tracing::trace!(prelude, "skipping unsupported selector: {:?}", e),
            }
        }
        rest = &rest[close + 1..];
    }
    rules
}

/// Split a declaration block into lowercase property names and trimmed values.
/// Semicolons inside parentheses or quotes (e.g. `url(data:...;base64,...)`) do not split.
pub(crate) fn parse_declarations(block: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in split_top_level(block, ';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let mut value = value.trim();
        if let Some(stripped) = value.strip_suffix("!important") {
            value = stripped.trim_end();
        }
        if !name.is_empty() {
            out.push((name, value.to_string()));
        }
    }
    out
}

fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth -= 1,
            (None, c) if c == sep && depth <= 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(html: &'a Html, sel: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(sel).unwrap()).next().unwrap()
    }

    #[test]
    fn inline_background_image() {
        let html = Html::parse_document(
            r#"<div id="d" style="background-image: url(&quot;bg.png&quot;)"></div>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(
            sheet.background_image(&first(&html, "#d")).as_deref(),
            Some(r#"url("bg.png")"#)
        );
    }

    #[test]
    fn stylesheet_rule_applies() {
        let html = Html::parse_document(
            r#"<style>/* hero */ .hero { color: red; background-image: url('hero.jpg') }</style>
               <div class="hero"></div><div class="other"></div>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(
            sheet.background_image(&first(&html, ".hero")).as_deref(),
            Some("url('hero.jpg')")
        );
        assert_eq!(sheet.background_image(&first(&html, ".other")), None);
    }

    #[test]
    fn inline_overrides_stylesheet() {
        let html = Html::parse_document(
            r#"<style>div { background-image: url(a.png) }</style>
               <div style="background-image: none"></div>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(sheet.background_image(&first(&html, "div")), None);
    }

    #[test]
    fn background_shorthand_url() {
        let html = Html::parse_document(
            r#"<p style="background: #000 url(img/tile.gif) repeat-x !important"></p>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(
            sheet.background_image(&first(&html, "p")).as_deref(),
            Some(r#"url("img/tile.gif")"#)
        );
    }

    #[test]
    fn background_shorthand_keeps_first_layer_only() {
        let html = Html::parse_document(
            r#"<p style="background: url('a(1).png') no-repeat, url(b.png) repeat"></p>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(
            sheet.background_image(&first(&html, "p")).as_deref(),
            Some(r#"url("a(1).png")"#)
        );
    }

    #[test]
    fn at_rules_are_skipped() {
        let html = Html::parse_document(
            r#"<style>@import url(x.css); @media print { div { background-image: url(p.png) } }
               span { background-image: url(s.png) }</style><div></div><span></span>"#,
        );
        let sheet = StyleSheet::from_document(&html);
        assert_eq!(sheet.background_image(&first(&html, "div")), None);
        assert_eq!(
            sheet.background_image(&first(&html, "span")).as_deref(),
            Some("url(s.png)")
        );
    }

    #[test]
    fn data_url_semicolons_do_not_split() {
        let decls = parse_declarations("background-image: url(data:image/png;base64,AAAA); color: red");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].1, "url(data:image/png;base64,AAAA)");
    }
}
