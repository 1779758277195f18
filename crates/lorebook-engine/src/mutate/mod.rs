//! The write path: structural edit intents applied to raw field text.
//!
//! The mutator never operates on a segment tree. It rewrites the plain
//! text, which stays the single source of truth; the next parse picks the
//! change up. Everything outside the targeted span is copied through
//! byte-for-byte.

use crate::models::Category;
use crate::parsing::scan_images;

/// Default dimensions for freshly inserted images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 400;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 300;

/// Result of a text splice: the new text plus the caret position after the
/// inserted markup, so the caller can restore its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub text: String,
    pub caret: usize,
}

/// Rewrites the image at `occurrence_index` (zero-based, source order) with
/// new dimensions, preserving its alt text, URL and caption.
///
/// An out-of-range index returns the text unchanged. That silent no-op is
/// deliberate: the index may be stale because the field was edited between
/// the drag starting and releasing, and dropping the resize beats
/// corrupting unrelated text.
pub fn update_image_dimensions(
    text: &str,
    occurrence_index: usize,
    width: u32,
    height: u32,
) -> String {
    let matches = scan_images(text);
    let Some(m) = matches.get(occurrence_index) else {
        return text.to_string();
    };

    let mut rewritten = String::with_capacity(text.len() + 16);
    rewritten.push_str(&text[..m.span.start]);
    rewritten.push_str(&image_form(
        &m.url,
        &m.alt,
        width.max(1),
        height.max(1),
        m.caption.as_deref(),
    ));
    rewritten.push_str(&text[m.span.end..]);
    rewritten
}

/// Splices `markup` into `text` at a caret byte offset.
///
/// Offsets past the end are clamped; offsets inside a UTF-8 sequence are
/// snapped down to the previous character boundary rather than panicking.
pub fn insert_at(text: &str, offset: usize, markup: &str) -> Splice {
    let mut at = offset.min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }

    let mut spliced = String::with_capacity(text.len() + markup.len());
    spliced.push_str(&text[..at]);
    spliced.push_str(markup);
    spliced.push_str(&text[at..]);

    Splice {
        text: spliced,
        caret: at + markup.len(),
    }
}

// Characters that would terminate or split the surrounding form. Builder
// inputs come straight from entry fields, so a name like "Bo|b" must still
// produce markup that parses back as a single segment.
const LINK_BANNED: &[char] = &['|', '}', '\n'];
const CELL_BANNED: &[char] = &['|', '\n'];

fn scrub(value: &str, banned: &[char]) -> String {
    value.chars().filter(|c| !banned.contains(c)).collect()
}

/// Canonical link token form for insertion.
///
/// Delimiter characters (`|`, `}`, newline) are stripped from the fields;
/// they have no representation inside a token.
pub fn link_markup(display_name: &str, category: &Category, target_id: &str) -> String {
    format!(
        "@{{{}|{}|{}}}",
        scrub(display_name, LINK_BANNED),
        scrub(&category.to_string(), LINK_BANNED),
        scrub(target_id, LINK_BANNED),
    )
}

/// Canonical image form with default dimensions, for insertion after an
/// upload resolves.
pub fn image_markup(url: &str, alt: &str) -> String {
    image_form(url, alt, DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT, None)
}

/// Canonical table form: title, header, separator and rows joined with
/// newlines. Pipes and newlines inside cells are stripped; they have no
/// escaped representation in the row syntax.
pub fn table_markup(title: Option<&str>, headers: &[&str], rows: &[Vec<&str>]) -> String {
    let mut out = String::new();
    if let Some(t) = title {
        out.push_str(&format!("**{}**\n\n", scrub(t, &['\n'])));
    }
    out.push_str(&row_form(headers));
    out.push('\n');
    let separator = vec!["---"; headers.len()];
    out.push_str(&row_form(&separator));
    for row in rows {
        out.push('\n');
        out.push_str(&row_form(row));
    }
    out
}

fn image_form(url: &str, alt: &str, width: u32, height: u32, caption: Option<&str>) -> String {
    let mut form = format!(
        "![{}]({} width={width} height={height}",
        scrub(alt, &[']', '\n']),
        scrub(url, &[' ', ')', '"', '\n']),
    );
    if let Some(c) = caption {
        form.push_str(&format!(" \"{}\"", scrub(c, &['"', '\n'])));
    }
    form.push(')');
    form
}

fn row_form(cells: &[&str]) -> String {
    let mut row = String::from("|");
    for cell in cells {
        row.push_str(&format!(" {} |", scrub(cell, CELL_BANNED)));
    }
    row
}
