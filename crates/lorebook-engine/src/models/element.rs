use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of world element a reference points at.
///
/// Unknown category strings are preserved verbatim in `Other` so that markup
/// written against a newer vocabulary still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Characters,
    Locations,
    Items,
    Events,
    Concepts,
    Creatures,
    Other(String),
}

impl Category {
    /// Parses a category string as written in link markup (case-insensitive
    /// for the known set).
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "characters" => Category::Characters,
            "locations" => Category::Locations,
            "items" => Category::Items,
            "events" => Category::Events,
            "concepts" => Category::Concepts,
            "creatures" => Category::Creatures,
            _ => Category::Other(s.to_string()),
        }
    }

    /// The canonical string form used when serializing markup.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Characters => "characters",
            Category::Locations => "locations",
            Category::Items => "items",
            Category::Events => "events",
            Category::Concepts => "concepts",
            Category::Creatures => "creatures",
            Category::Other(s) => s,
        }
    }

    /// Glyph used on link chips.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Characters => "👤",
            Category::Locations => "📍",
            Category::Items => "🗡",
            Category::Events => "📅",
            Category::Concepts => "💡",
            Category::Creatures => "🐉",
            Category::Other(_) => "🔗",
        }
    }

    /// CSS class suffix for category-specific chip styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Characters => "chip-characters",
            Category::Locations => "chip-locations",
            Category::Items => "chip-items",
            Category::Events => "chip-events",
            Category::Concepts => "chip-concepts",
            Category::Creatures => "chip-creatures",
            Category::Other(_) => "chip-other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// A directory entry for one world element, as returned by an
/// [`ElementIndex`](crate::resolve::ElementIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: String,
    pub name: String,
    pub category: Category,
}
