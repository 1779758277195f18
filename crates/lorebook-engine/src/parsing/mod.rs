//! The markup parser: raw field text in, typed segment sequence out.
//!
//! Three inline forms are recognized, in precedence order:
//!
//! 1. images `![alt](url width=W height=H "caption")` — single line, so
//!    they are carved out first;
//! 2. tables (optional `**Title**` + blank line, header row, dash
//!    separator, data rows) — matched on the line remainder;
//! 3. link tokens `@{Name|Category|Id}` inside surviving text runs.
//!
//! Anything malformed is left as literal text; the parser never fails.

pub mod cursor;
pub mod image;
pub mod kinds;
mod link;
mod table;

pub use image::{scan_images, ImageMatch};

use crate::models::Segment;
use link::LinkPiece;
use table::TablePiece;

/// Parses raw field text into an ordered segment sequence.
///
/// Pure: equal text always yields a structurally equal sequence. The empty
/// string yields an empty sequence; text with no recognizable markup yields
/// exactly one `Text` segment.
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in scan_images(text) {
        if m.span.start > last {
            push_text_chunk(&mut segments, &text[last..m.span.start]);
        }
        segments.push(Segment::Image {
            url: m.url,
            alt: m.alt,
            caption: m.caption,
            width: m.width,
            height: m.height,
        });
        last = m.span.end;
    }
    if last < text.len() {
        push_text_chunk(&mut segments, &text[last..]);
    }

    segments
}

/// Splits a non-image chunk on table blocks, then on link tokens.
fn push_text_chunk(out: &mut Vec<Segment>, chunk: &str) {
    for piece in table::split_tables(chunk) {
        match piece {
            TablePiece::Table {
                title,
                headers,
                rows,
            } => out.push(Segment::Table {
                title,
                headers,
                rows,
            }),
            TablePiece::Text(t) => {
                for link_piece in link::split_links(t) {
                    match link_piece {
                        LinkPiece::Link(token) => out.push(Segment::Link(token)),
                        LinkPiece::Text(content) => {
                            let segment = Segment::Text { content };
                            if !segment.is_empty_text() {
                                out.push(segment);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Serializes segments back to markup text in canonical form.
///
/// Text runs are emitted verbatim; the other forms use canonical spacing,
/// so `parse(serialize(parse(t)))` equals `parse(t)` for any input.
///
/// Byte identity holds for text already in canonical form. Well-formed but
/// non-canonical spellings come back normalized; in particular category
/// names are matched case-insensitively and always emitted lowercase, so
/// `@{Bob|Characters|123}` serializes as `@{Bob|characters|123}`.
pub fn serialize(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { content } => out.push_str(content),
            Segment::Image {
                url,
                alt,
                caption,
                width,
                height,
            } => {
                out.push_str("![");
                out.push_str(alt);
                out.push_str("](");
                out.push_str(url);
                if let Some(w) = width {
                    out.push_str(&format!(" width={w}"));
                }
                if let Some(h) = height {
                    out.push_str(&format!(" height={h}"));
                }
                if let Some(c) = caption {
                    out.push_str(&format!(" \"{c}\""));
                }
                out.push(')');
            }
            Segment::Table {
                title,
                headers,
                rows,
            } => {
                if let Some(t) = title {
                    out.push_str(&format!("**{t}**\n\n"));
                }
                out.push_str(&pipe_row(headers));
                out.push('\n');
                out.push_str(&pipe_row(&vec!["---".to_string(); headers.len()]));
                for row in rows {
                    out.push('\n');
                    out.push_str(&pipe_row(row));
                }
            }
            Segment::Link(token) => {
                out.push_str(&format!(
                    "@{{{}|{}|{}}}",
                    token.display_name, token.category, token.target_id
                ));
            }
        }
    }
    out
}

fn pipe_row(cells: &[String]) -> String {
    let mut row = String::from("|");
    for cell in cells {
        row.push_str(&format!(" {cell} |"));
    }
    row
}
