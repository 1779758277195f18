use serde::{Deserialize, Serialize};

use crate::models::element::Category;

/// An inline, atomic reference to another world element.
///
/// The display name and category are cached copies of whatever the target
/// looked like when the token was written. The target may have been renamed
/// or deleted since; rendering falls back to these cached fields so a token
/// never breaks the field it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkToken {
    pub display_name: String,
    pub category: Category,
    pub target_id: String,
}

/// One typed unit of parsed field content.
///
/// Segments are transient: they are reconstructed from the field's raw text
/// on every parse and are never stored. Order within a parsed field is
/// significant and must round-trip (see [`crate::parsing::serialize`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text between special constructs.
    Text { content: String },
    /// Inline image with optional explicit pixel dimensions.
    ///
    /// When present, `width` and `height` are positive. Aspect ratio is not
    /// stored; it is derived at render time unless both are explicit.
    Image {
        url: String,
        alt: String,
        caption: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Inline data table. Rows may be shorter than `headers`; missing cells
    /// render empty.
    Table {
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A cross-reference token, never split across render boundaries.
    Link(LinkToken),
}

impl Segment {
    /// Convenience constructor for a text run.
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    /// Returns true for `Text` segments with no content.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Segment::Text { content } if content.is_empty())
    }
}
