use pulldown_cmark::{html, Options, Parser};

/// Render entry Markdown to HTML.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_paragraphs() {
        assert_eq!(
            to_html("# Python\nA language."),
            "<h1>Python</h1>\n<p>A language.</p>\n"
        );
    }

    #[test]
    fn renders_links_and_emphasis() {
        let html = to_html("See **[Git](/Git)**.");
        assert!(html.contains(r#"<strong><a href="/Git">Git</a></strong>"#));
    }

    #[test]
    fn renders_tables() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
