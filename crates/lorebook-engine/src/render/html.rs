//! HTML emission for view nodes.
//!
//! Output is display-only markup for a host page. Link chips carry
//! `data-target-id`/`data-category` attributes so the host can wire its
//! element-click callback; nothing here dispatches navigation itself.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text};

use super::ViewNode;

/// Renders view nodes to an HTML fragment. All interpolated text is
/// escaped.
pub fn to_html(nodes: &[ViewNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ViewNode::Text(text) => {
                out.push_str(&encode_text(text).replace('\n', "<br>"));
            }
            ViewNode::LinkChip(link) => {
                let missing = if link.exists { "" } else { " chip-missing" };
                let _ = write!(
                    out,
                    "<a class=\"element-chip {}{}\" data-target-id=\"{}\" data-category=\"{}\">{} {}</a>",
                    link.category.css_class(),
                    missing,
                    attr(&link.target_id),
                    attr(link.category.as_str()),
                    link.category.icon(),
                    encode_text(&link.display_name),
                );
            }
            ViewNode::Image {
                url,
                alt,
                caption,
                width,
                height,
                resizable,
                fallback_url,
            } => {
                let class = if *resizable {
                    "inline-image resizable"
                } else {
                    "inline-image"
                };
                let _ = write!(
                    out,
                    "<figure class=\"{class}\"><img src=\"{}\" alt=\"{}\" data-fallback=\"{}\"",
                    attr(url),
                    attr(alt),
                    attr(fallback_url),
                );
                if let Some(w) = width {
                    let _ = write!(out, " width=\"{w}\"");
                }
                if let Some(h) = height {
                    let _ = write!(out, " height=\"{h}\"");
                }
                out.push_str(">");
                if *resizable {
                    out.push_str("<span class=\"resize-handle\"></span>");
                }
                if let Some(c) = caption {
                    let _ = write!(out, "<figcaption>{}</figcaption>", encode_text(c));
                }
                out.push_str("</figure>");
            }
            ViewNode::Table {
                title,
                headers,
                rows,
            } => {
                out.push_str("<table class=\"inline-table\">");
                if let Some(t) = title {
                    let _ = write!(out, "<caption>{}</caption>", encode_text(t));
                }
                out.push_str("<thead><tr>");
                for header in headers {
                    let _ = write!(out, "<th>{}</th>", encode_text(header));
                }
                out.push_str("</tr></thead><tbody>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        let _ = write!(out, "<td>{}</td>", encode_text(cell));
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</tbody></table>");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use crate::render::{render, RenderOptions};

    fn html_of(text: &str) -> String {
        to_html(&render(&parse(text), &RenderOptions::default()))
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(html_of("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(html_of("one\ntwo"), "one<br>two");
    }

    #[test]
    fn chip_carries_navigation_data() {
        let html = html_of("@{Bob|characters|123}");
        assert!(html.contains("data-target-id=\"123\""));
        assert!(html.contains("data-category=\"characters\""));
        assert!(html.contains("chip-characters"));
        assert!(html.contains("Bob"));
    }

    #[test]
    fn image_with_dimensions_and_caption() {
        let html = html_of(r#"![map](http://x/m.png width=200 height=100 "Old map")"#);
        assert!(html.contains("src=\"http://x/m.png\""));
        assert!(html.contains("width=\"200\""));
        assert!(html.contains("height=\"100\""));
        assert!(html.contains("<figcaption>Old map</figcaption>"));
        assert!(html.contains("data-fallback="));
        assert!(!html.contains("resize-handle"));
    }

    #[test]
    fn editable_image_gets_handle() {
        let nodes = render(
            &parse("![m](http://x/m.png)"),
            &RenderOptions {
                editable: true,
                ..Default::default()
            },
        );
        let html = to_html(&nodes);
        assert!(html.contains("resizable"));
        assert!(html.contains("resize-handle"));
    }

    #[test]
    fn table_with_title_and_padded_rows() {
        let html = html_of("**T**\n\n| A | B |\n| --- | --- |\n| 1 |");
        assert!(html.contains("<caption>T</caption>"));
        assert!(html.contains("<th>A</th><th>B</th>"));
        assert!(html.contains("<td>1</td><td></td>"));
    }

    #[test]
    fn malicious_markup_stays_inert() {
        let html = html_of("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
