//! Link resolution against an externally owned world-element directory.

use serde::{Deserialize, Serialize};

use crate::models::{Category, ElementRef, LinkToken};

/// Display cap for detected cross references.
pub const CROSS_REFERENCE_LIMIT: usize = 6;

/// The world-element directory, owned by the surrounding application and
/// passed in explicitly so the parser and renderer stay testable in
/// isolation.
pub trait ElementIndex {
    fn lookup_by_id(&self, id: &str) -> Option<ElementRef>;
    fn list_all(&self) -> Vec<ElementRef>;
}

/// A link token resolved for rendering.
///
/// Resolution always succeeds: when the directory has no element for the
/// token's id, the token's cached display name and category are used
/// (stale but present) and `exists` is false so the chip can be styled as
/// dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub display_name: String,
    pub category: Category,
    pub target_id: String,
    pub exists: bool,
}

impl ResolvedLink {
    /// Builds a resolved link straight from the token's cached fields,
    /// assumed current.
    pub fn from_cached(token: &LinkToken) -> Self {
        Self {
            display_name: token.display_name.clone(),
            category: token.category.clone(),
            target_id: token.target_id.clone(),
            exists: true,
        }
    }
}

/// Resolves a link token through the element directory.
pub fn resolve_link(token: &LinkToken, index: &dyn ElementIndex) -> ResolvedLink {
    match index.lookup_by_id(&token.target_id) {
        Some(element) => ResolvedLink {
            display_name: element.name,
            category: element.category,
            target_id: token.target_id.clone(),
            exists: true,
        },
        None => ResolvedLink {
            display_name: token.display_name.clone(),
            category: token.category.clone(),
            target_id: token.target_id.clone(),
            exists: false,
        },
    }
}

/// Scans an entry's full concatenated text for mentions of other elements'
/// names, independent of explicit link tokens.
///
/// Best-effort heuristic: case-insensitive *substring* matching with no
/// word-boundary check, so short or overlapping names will over-match.
/// That behavior is intentional and load-bearing for callers' expectations;
/// tighten it and detected-reference lists change. Results are capped at
/// [`CROSS_REFERENCE_LIMIT`]. O(elements × text length).
pub fn detect_cross_references(
    text: &str,
    current_id: Option<&str>,
    index: &dyn ElementIndex,
) -> Vec<ElementRef> {
    let haystack = text.to_lowercase();
    let mut found = Vec::new();

    for element in index.list_all() {
        if found.len() >= CROSS_REFERENCE_LIMIT {
            break;
        }
        if element.name.is_empty() {
            continue;
        }
        if current_id.is_some_and(|id| id == element.id) {
            continue;
        }
        if haystack.contains(&element.name.to_lowercase()) {
            found.push(element);
        }
    }

    found
}
