use serde::Deserialize;

/// A wiki page.
///
/// The title is unique ignoring case. Content is stored as validated (trimmed of
/// surrounding whitespace) and only turned into HTML when displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub content: String,
}

/// Body of the sidebar search form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub q: String,
}

/// Body of the new entry form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEntryInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Body of the edit form. The title comes from the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntryInput {
    #[serde(default)]
    pub content: String,
}
