//! Case-insensitive title lookup and search.
//!
//! Titles are compared after Unicode lowercasing. There is no index; every
//! call scans the full title list, which is fine for a wiki of this size.

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// The stored title that matches `query` ignoring case, if any.
pub fn resolve_title<'a, S: AsRef<str>>(titles: &'a [S], query: &str) -> Option<&'a str> {
    let query = fold(query);
    titles
        .iter()
        .map(AsRef::as_ref)
        .find(|title| fold(title) == query)
}

/// True when some stored title equals `query` ignoring case.
pub fn title_exists<S: AsRef<str>>(titles: &[S], query: &str) -> bool {
    resolve_title(titles, query).is_some()
}

/// Every title containing `query` ignoring case, in the order given.
pub fn search_titles<S: AsRef<str>>(titles: &[S], query: &str) -> Vec<String> {
    let query = fold(query);
    titles
        .iter()
        .map(AsRef::as_ref)
        .filter(|title| fold(title).contains(&query))
        .map(str::to_string)
        .collect()
}
