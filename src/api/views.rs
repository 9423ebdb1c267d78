//! Page templates. Each struct renders one file under `templates/`, all of
//! which extend `layout.html`.
//!
//! Every page carries `random`, the title behind the sidebar's random entry
//! link. It is `None` while the encyclopedia is empty and the link is hidden.

use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub random: Option<String>,
    pub entries: Vec<String>,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPage {
    pub random: Option<String>,
    pub query: String,
    pub query_errors: Vec<String>,
}

/// Search results, or the "no results" variant when `matches` is empty.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub random: Option<String>,
    pub query: String,
    pub matches: Vec<String>,
}

#[derive(Template)]
#[template(path = "entry.html")]
pub struct EntryPage {
    pub random: Option<String>,
    /// The title as requested, which may differ in case from the stored one.
    pub title: String,
    /// Already rendered from Markdown; inserted without escaping.
    pub content_html: String,
}

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewEntryPage {
    pub random: Option<String>,
    pub title: String,
    pub content: String,
    pub title_errors: Vec<String>,
    pub content_errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditEntryPage {
    pub random: Option<String>,
    pub entry: String,
    pub content: String,
    pub content_errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub random: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hides_random_link_when_empty() {
        let html = IndexPage {
            random: None,
            entries: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("Random Page"));
    }

    #[test]
    fn layout_links_random_entry_by_encoded_title() {
        let html = IndexPage {
            random: Some("C Sharp".to_string()),
            entries: vec!["C Sharp".to_string()],
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"href="/C%20Sharp""#));
    }

    #[test]
    fn entry_page_inserts_rendered_html_unescaped() {
        let html = EntryPage {
            random: None,
            title: "Python".to_string(),
            content_html: "<h1>Python</h1>".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("<h1>Python</h1>"));
    }

    #[test]
    fn error_page_escapes_the_message() {
        let html = ErrorPage {
            random: None,
            message: "<script>alert(1)</script>".to_string(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
