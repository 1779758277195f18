use std::ops::Range;

use super::{cursor::Cursor, kinds::ImageMark};

/// A well-formed image occurrence located in source text.
///
/// Carries the byte span of the whole `![..](..)` form so the mutator can
/// rewrite exactly this occurrence and copy everything else through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch {
    pub span: Range<usize>,
    pub alt: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub caption: Option<String>,
}

/// Scans `text` for image occurrences in source order.
///
/// Shared by the parser and the mutator so both agree on occurrence
/// indexing and spans. Malformed candidates are skipped, not consumed.
pub fn scan_images(text: &str) -> Vec<ImageMatch> {
    let mut cur = Cursor::new(text);
    let mut out = Vec::new();
    while !cur.eof() {
        if let Some(m) = try_parse_image(&mut cur) {
            out.push(m);
            continue;
        }
        cur.bump();
    }
    out
}

/// Attempts to parse an image starting at the current position.
///
/// Images are single-line: a newline anywhere inside the form disqualifies
/// it. Returns `None` with the cursor restored on any malformation, so the
/// candidate stays literal text.
pub(crate) fn try_parse_image(cur: &mut Cursor<'_>) -> Option<ImageMatch> {
    if !cur.starts_with(ImageMark::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(ImageMark::OPEN.len());

    let alt = cur
        .take_until(|b| b == ImageMark::ALT_CLOSE || b == b'\n')
        .to_string();
    if cur.peek() != Some(ImageMark::ALT_CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // ]

    if cur.peek() != Some(ImageMark::URL_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump(); // (

    let inner = cur
        .take_until(|b| b == ImageMark::CLOSE || b == b'\n')
        .to_string();
    if cur.peek() != Some(ImageMark::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // )
    let end = cur.pos();

    let Some(attrs) = parse_image_attrs(&inner) else {
        *cur = saved;
        return None;
    };

    Some(ImageMatch {
        span: start..end,
        alt,
        url: attrs.url,
        width: attrs.width,
        height: attrs.height,
        caption: attrs.caption,
    })
}

struct ImageAttrs {
    url: String,
    width: Option<u32>,
    height: Option<u32>,
    caption: Option<String>,
}

/// Parses the parenthesized part of an image: URL first, then optional
/// `width=`/`height=`/quoted caption in any order, space-delimited.
///
/// Any unrecognized token, unclosed caption quote, or non-positive
/// dimension rejects the whole candidate.
fn parse_image_attrs(inner: &str) -> Option<ImageAttrs> {
    let mut rest = inner.trim_start();

    let url_end = rest
        .find(char::is_whitespace)
        .unwrap_or(rest.len());
    let url = &rest[..url_end];
    if url.is_empty()
        || url.starts_with(ImageMark::WIDTH_KEY)
        || url.starts_with(ImageMark::HEIGHT_KEY)
        || url.starts_with(ImageMark::QUOTE as char)
    {
        return None;
    }
    rest = rest[url_end..].trim_start();

    let mut width = None;
    let mut height = None;
    let mut caption = None;

    while !rest.is_empty() {
        if let Some(after_quote) = rest.strip_prefix(ImageMark::QUOTE as char) {
            let close = after_quote.find(ImageMark::QUOTE as char)?;
            caption = Some(after_quote[..close].to_string());
            rest = after_quote[close + 1..].trim_start();
            continue;
        }

        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..token_end];
        if let Some(value) = token.strip_prefix(ImageMark::WIDTH_KEY) {
            width = Some(parse_dimension(value)?);
        } else if let Some(value) = token.strip_prefix(ImageMark::HEIGHT_KEY) {
            height = Some(parse_dimension(value)?);
        } else {
            return None;
        }
        rest = rest[token_end..].trim_start();
    }

    Some(ImageAttrs {
        url: url.to_string(),
        width,
        height,
        caption,
    })
}

/// Dimensions must be positive integers; anything else disqualifies the
/// candidate rather than being silently dropped.
fn parse_dimension(value: &str) -> Option<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}
