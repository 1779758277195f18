use crate::models::{Category, LinkToken};

use super::{cursor::Cursor, kinds::LinkMark};

/// Result of splitting a text run on link tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LinkPiece {
    Text(String),
    Link(LinkToken),
}

/// Splits a text run into alternating text and link-token pieces,
/// preserving surrounding whitespace exactly.
pub(crate) fn split_links(text: &str) -> Vec<LinkPiece> {
    let mut cur = Cursor::new(text);
    let mut out = Vec::new();
    let mut text_start = 0;

    while !cur.eof() {
        let before = cur.pos();
        if let Some(token) = try_parse_link(&mut cur) {
            if before > text_start {
                out.push(LinkPiece::Text(text[text_start..before].to_string()));
            }
            out.push(LinkPiece::Link(token));
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    if cur.pos() > text_start {
        out.push(LinkPiece::Text(text[text_start..].to_string()));
    }
    out
}

/// Attempts to parse `@{Name|Category|Id}` at the current position.
///
/// Exactly two separators and a closing brace are required, all on one
/// line. On failure the cursor is restored and the candidate stays literal
/// text.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<LinkToken> {
    if !cur.starts_with(LinkMark::OPEN) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(LinkMark::OPEN.len());

    let stop = |b: u8| b == LinkMark::SEP || b == LinkMark::CLOSE || b == b'\n';

    let name = cur.take_until(stop).to_string();
    if cur.peek() != Some(LinkMark::SEP) {
        *cur = saved;
        return None;
    }
    cur.bump(); // |

    let category = cur.take_until(stop).to_string();
    if cur.peek() != Some(LinkMark::SEP) {
        *cur = saved;
        return None;
    }
    cur.bump(); // |

    let id = cur.take_until(stop).to_string();
    if cur.peek() != Some(LinkMark::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // }

    Some(LinkToken {
        display_name: name,
        category: Category::parse(&category),
        target_id: id,
    })
}
