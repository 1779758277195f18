//! The read path: segments in, display tree out.
//!
//! Rendering never writes to storage and never mutates the source text;
//! interactive edits go back through [`crate::mutate`] against the raw
//! field text.

pub mod html;
pub mod resize;

use crate::models::Segment;
use crate::resolve::{resolve_link, ElementIndex, ResolvedLink};

/// Default asset shown when an image fails to load. The stored markup is
/// unaffected by load failures.
pub const PLACEHOLDER_IMAGE: &str = "/assets/image-placeholder.png";

/// Options controlling a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// When true, image nodes expose a resize handle.
    pub editable: bool,
    /// Fallback URL carried on image nodes for load failures.
    pub placeholder_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            editable: false,
            placeholder_url: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// One node of the displayable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// A literal text node.
    Text(String),
    /// An atomic clickable chip for a cross-reference. Clicks dispatch the
    /// host's element-click callback with `(target_id, category)`; no local
    /// state changes.
    LinkChip(ResolvedLink),
    /// An image view; `resizable` is true only in editable mode.
    Image {
        url: String,
        alt: String,
        caption: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        resizable: bool,
        fallback_url: String,
    },
    /// A styled table; rows are padded to header width so ragged source
    /// rows render with empty cells instead of failing.
    Table {
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Renders segments into a display tree using each link token's cached
/// fields. Pure given the same segments and options.
pub fn render(segments: &[Segment], options: &RenderOptions) -> Vec<ViewNode> {
    render_with(segments, options, ResolvedLink::from_cached)
}

/// Renders segments, resolving link chips through the element directory.
/// Dangling targets render from cached token fields, marked not-existing.
pub fn render_resolved(
    segments: &[Segment],
    index: &dyn ElementIndex,
    options: &RenderOptions,
) -> Vec<ViewNode> {
    render_with(segments, options, |token| resolve_link(token, index))
}

fn render_with(
    segments: &[Segment],
    options: &RenderOptions,
    resolve: impl Fn(&crate::models::LinkToken) -> ResolvedLink,
) -> Vec<ViewNode> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { content } => ViewNode::Text(content.clone()),
            Segment::Link(token) => ViewNode::LinkChip(resolve(token)),
            Segment::Image {
                url,
                alt,
                caption,
                width,
                height,
            } => ViewNode::Image {
                url: url.clone(),
                alt: alt.clone(),
                caption: caption.clone(),
                width: *width,
                height: *height,
                resizable: options.editable,
                fallback_url: options.placeholder_url.clone(),
            },
            Segment::Table {
                title,
                headers,
                rows,
            } => ViewNode::Table {
                title: title.clone(),
                headers: headers.clone(),
                rows: rows
                    .iter()
                    .map(|row| pad_row(row, headers.len()))
                    .collect(),
            },
        })
        .collect()
}

fn pad_row(row: &[String], width: usize) -> Vec<String> {
    let mut padded = row.to_vec();
    padded.truncate(width);
    while padded.len() < width {
        padded.push(String::new());
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, LinkToken};
    use crate::parsing::parse;

    #[test]
    fn text_renders_verbatim() {
        let nodes = render(&parse("just words"), &RenderOptions::default());
        assert_eq!(nodes, vec![ViewNode::Text("just words".to_string())]);
    }

    #[test]
    fn chip_from_cached_fields_without_index() {
        let nodes = render(&parse("@{Bob|characters|123}"), &RenderOptions::default());
        match &nodes[0] {
            ViewNode::LinkChip(link) => {
                assert_eq!(link.display_name, "Bob");
                assert_eq!(link.category, Category::Characters);
                assert!(link.exists);
            }
            other => panic!("expected chip, got {other:?}"),
        }
    }

    #[test]
    fn images_resizable_only_when_editable() {
        let segments = parse("![m](http://x/m.png width=200 height=100)");
        let read_only = render(&segments, &RenderOptions::default());
        let editable = render(
            &segments,
            &RenderOptions {
                editable: true,
                ..Default::default()
            },
        );
        assert!(matches!(read_only[0], ViewNode::Image { resizable: false, .. }));
        assert!(matches!(editable[0], ViewNode::Image { resizable: true, .. }));
    }

    #[test]
    fn ragged_rows_padded_to_header_width() {
        let segments = parse("| A | B | C |\n| --- | --- | --- |\n| 1 |\n| 1 | 2 | 3 | 4 |");
        let nodes = render(&segments, &RenderOptions::default());
        match &nodes[0] {
            ViewNode::Table { rows, .. } => {
                assert_eq!(rows[0], vec!["1", "", ""]);
                assert_eq!(rows[1], vec!["1", "2", "3"]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn rendering_does_not_consume_segments() {
        // Pure read path: same input renders identically twice.
        let segments = vec![Segment::Link(LinkToken {
            display_name: "X".to_string(),
            category: Category::Items,
            target_id: "1".to_string(),
        })];
        let options = RenderOptions::default();
        assert_eq!(render(&segments, &options), render(&segments, &options));
    }
}
