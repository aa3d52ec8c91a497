//! Boundary normalization for loosely-shaped recipe input.
//!
//! Client payloads historically sent ingredients and tags either as arrays
//! or as single comma-separated strings. Everything is coerced into a
//! canonical ordered list of trimmed strings exactly once, at ingestion;
//! the rest of the engine never re-parses.

use serde::{Deserialize, Serialize};

/// A field that arrives either as one string or as a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Text(String),
    List(Vec<String>),
}

/// Canonical case-insensitive key for an ingredient: trimmed and lowercased.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Coerce an ingredients field into a trimmed, non-empty list.
///
/// List items may themselves contain commas ("salt, pepper" as one array
/// element), so every element is split again. Original casing is kept;
/// lowercasing happens only at comparison time via [`normalize_key`].
pub fn normalize_ingredients(input: StringOrList) -> Vec<String> {
    let items = match input {
        StringOrList::Text(text) => vec![text],
        StringOrList::List(list) => list,
    };

    items
        .iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerce a tags field into a trimmed, non-empty list.
///
/// Unlike ingredients, a single string becomes a single tag; tags may
/// legitimately contain commas in display names, so no re-splitting.
pub fn normalize_tags(input: StringOrList) -> Vec<String> {
    match input {
        StringOrList::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        StringOrList::List(list) => list
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
