use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::element::{Category, ElementRef};

/// Attribute keys whose values are independently parsed markup fields.
///
/// Any other attribute key is opaque text as far as the markup subsystem is
/// concerned.
pub const MARKUP_ATTRIBUTES: &[&str] = &[
    "definition",
    "origin",
    "etymology",
    "related_terms",
    "examples",
];

/// An image attached to an entry through the gallery modal, standing apart
/// from any text field. Distinct from inline image segments that live inside
/// markup text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A standalone data table attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DataTable {
    #[serde(default)]
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A single labelled statistic attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatBlock {
    pub label: String,
    pub value: String,
}

/// The owning record for one encyclopedia entry.
///
/// The `description` field and the recognized attribute keys in
/// [`MARKUP_ATTRIBUTES`] each hold a plain-text markup string; that text is
/// the single source of truth for rich content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    #[serde(default)]
    pub tables: Vec<DataTable>,
    #[serde(default)]
    pub stats: Vec<StatBlock>,
}

impl Entry {
    /// Creates an empty entry with a fresh id.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            description: String::new(),
            attributes: BTreeMap::new(),
            images: Vec::new(),
            tables: Vec::new(),
            stats: Vec::new(),
        }
    }

    /// Returns the recognized markup attributes present on this entry, in
    /// canonical display order.
    pub fn markup_attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        MARKUP_ATTRIBUTES.iter().filter_map(|&key| {
            self.attributes
                .get(key)
                .map(|value| (key, value.as_str()))
        })
    }

    /// Concatenates the description and all markup attribute values, used by
    /// the cross-reference detector which scans the entry's full text.
    pub fn full_text(&self) -> String {
        let mut text = self.description.clone();
        for (_, value) in self.markup_attributes() {
            text.push('\n');
            text.push_str(value);
        }
        text
    }

    /// The directory reference other entries resolve this entry through.
    pub fn element_ref(&self) -> ElementRef {
        ElementRef {
            id: self.id.to_string(),
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_empty() {
        let entry = Entry::new("Aldric", Category::Characters);
        assert_eq!(entry.name, "Aldric");
        assert!(entry.description.is_empty());
        assert!(entry.attributes.is_empty());
        assert!(entry.markup_attributes().next().is_none());
    }

    #[test]
    fn markup_attributes_in_canonical_order() {
        let mut entry = Entry::new("Sword", Category::Items);
        entry
            .attributes
            .insert("examples".to_string(), "e".to_string());
        entry
            .attributes
            .insert("definition".to_string(), "d".to_string());
        entry
            .attributes
            .insert("custom_note".to_string(), "ignored".to_string());

        let keys: Vec<_> = entry.markup_attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["definition", "examples"]);
    }

    #[test]
    fn full_text_concatenates_fields() {
        let mut entry = Entry::new("Rune", Category::Concepts);
        entry.description = "A carved sigil".to_string();
        entry
            .attributes
            .insert("origin".to_string(), "Old tongue".to_string());

        assert_eq!(entry.full_text(), "A carved sigil\nOld tongue");
    }

    #[test]
    fn element_ref_uses_entry_identity() {
        let entry = Entry::new("Drak", Category::Creatures);
        let element = entry.element_ref();
        assert_eq!(element.id, entry.id.to_string());
        assert_eq!(element.name, "Drak");
        assert_eq!(element.category, Category::Creatures);
    }

    #[test]
    fn entry_toml_roundtrip() {
        let mut entry = Entry::new("Hollowmere", Category::Locations);
        entry.description = "A drowned village".to_string();
        entry.stats.push(StatBlock {
            label: "Population".to_string(),
            value: "0".to_string(),
        });

        let text = toml::to_string(&entry).unwrap();
        let back: Entry = toml::from_str(&text).unwrap();
        assert_eq!(entry, back);
    }
}
