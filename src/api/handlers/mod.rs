use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::StoreError;
use crate::forms::Validate;
use crate::markup;
use crate::models::*;
use crate::search;
use crate::store::EntryStore;

use super::views::*;

type HandlerResult = Result<Response, (StatusCode, String)>;

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// ============================================================
// Responses
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn render(page: impl Template) -> HandlerResult {
    page.render()
        .map(|html| Html(html).into_response())
        .map_err(internal_error)
}

pub fn entry_url(title: &str) -> String {
    format!("/{}", utf8_percent_encode(title, PATH_SEGMENT))
}

pub fn error_url(message: &str) -> String {
    format!("/error/{}", utf8_percent_encode(message, PATH_SEGMENT))
}

/// Domain errors are shown on the error page, never as a status code.
fn error_redirect(error: &StoreError) -> Response {
    tracing::warn!("Redirecting to error page: {}", error);
    Redirect::to(&error_url(&error.to_string())).into_response()
}

fn random_link(store: &EntryStore) -> Result<Option<String>, (StatusCode, String)> {
    match store.random_title() {
        Ok(title) => Ok(Some(title)),
        Err(StoreError::EmptyStore) => Ok(None),
        Err(e) => Err(internal_error(e)),
    }
}

fn list_titles(store: &EntryStore) -> Result<Vec<String>, (StatusCode, String)> {
    store.list_entries().map_err(internal_error)
}

// ============================================================
// Index
// ============================================================

pub async fn index(State(store): State<EntryStore>) -> HandlerResult {
    let entries = list_titles(&store)?;
    render(IndexPage {
        random: random_link(&store)?,
        entries,
    })
}

// ============================================================
// Search
// ============================================================

pub async fn search_form(State(store): State<EntryStore>) -> HandlerResult {
    render(SearchPage {
        random: random_link(&store)?,
        query: String::new(),
        query_errors: Vec::new(),
    })
}

/// An exact match (ignoring case) jumps straight to the entry, keeping the
/// casing the user typed. Anything else lists the partial matches.
pub async fn search(
    State(store): State<EntryStore>,
    Form(input): Form<SearchInput>,
) -> HandlerResult {
    let query = match input.validate() {
        Ok(query) => query,
        Err(errors) => {
            return render(SearchPage {
                random: random_link(&store)?,
                query: input.q,
                query_errors: errors.for_field("q").to_vec(),
            });
        }
    };

    let titles = list_titles(&store)?;
    if search::title_exists(&titles, &query) {
        return Ok(Redirect::to(&entry_url(&query)).into_response());
    }

    let matches = search::search_titles(&titles, &query);
    tracing::debug!("Search '{}' matched {} entries", query, matches.len());
    render(ResultsPage {
        random: random_link(&store)?,
        query,
        matches,
    })
}

// ============================================================
// Entries
// ============================================================

pub async fn show_entry(
    State(store): State<EntryStore>,
    Path(title): Path<String>,
) -> HandlerResult {
    let titles = list_titles(&store)?;
    let Some(stored) = search::resolve_title(&titles, &title) else {
        return Ok(error_redirect(&StoreError::NotFound(title)));
    };

    let content = match store.get_entry(stored) {
        Ok(content) => content,
        Err(e @ StoreError::NotFound(_)) => return Ok(error_redirect(&e)),
        Err(e) => return Err(internal_error(e)),
    };

    render(EntryPage {
        random: random_link(&store)?,
        content_html: markup::to_html(&content),
        title,
    })
}

pub async fn new_entry_form(State(store): State<EntryStore>) -> HandlerResult {
    render(NewEntryPage {
        random: random_link(&store)?,
        title: String::new(),
        content: String::new(),
        title_errors: Vec::new(),
        content_errors: Vec::new(),
    })
}

pub async fn create_entry(
    State(store): State<EntryStore>,
    Form(input): Form<CreateEntryInput>,
) -> HandlerResult {
    let entry = match input.validate() {
        Ok(entry) => entry,
        Err(errors) => {
            return render(NewEntryPage {
                random: random_link(&store)?,
                title_errors: errors.for_field("title").to_vec(),
                content_errors: errors.for_field("content").to_vec(),
                title: input.title,
                content: input.content,
            });
        }
    };

    match store.create_entry(&entry.title, &entry.content) {
        Ok(()) => Ok(Redirect::to(&entry_url(&entry.title)).into_response()),
        Err(e @ (StoreError::AlreadyExists(_) | StoreError::InvalidTitle(_))) => {
            Ok(error_redirect(&e))
        }
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn edit_entry_form(
    State(store): State<EntryStore>,
    Path(entry): Path<String>,
) -> HandlerResult {
    let titles = list_titles(&store)?;
    let Some(stored) = search::resolve_title(&titles, &entry) else {
        return Ok(error_redirect(&StoreError::NotFound(entry)));
    };

    let content = match store.get_entry(stored) {
        Ok(content) => content,
        Err(e @ StoreError::NotFound(_)) => return Ok(error_redirect(&e)),
        Err(e) => return Err(internal_error(e)),
    };

    render(EditEntryPage {
        random: random_link(&store)?,
        entry,
        content,
        content_errors: Vec::new(),
    })
}

/// Saves under the stored title when one matches ignoring case, so an edit
/// through a differently cased URL never creates a second entry.
pub async fn update_entry(
    State(store): State<EntryStore>,
    Path(entry): Path<String>,
    Form(input): Form<UpdateEntryInput>,
) -> HandlerResult {
    let content = match input.validate() {
        Ok(content) => content,
        Err(errors) => {
            return render(EditEntryPage {
                random: random_link(&store)?,
                entry,
                content: input.content,
                content_errors: errors.for_field("content").to_vec(),
            });
        }
    };

    match store.update_entry(&entry, &content) {
        Ok(_) => Ok(Redirect::to(&entry_url(&entry)).into_response()),
        Err(e @ StoreError::InvalidTitle(_)) => Ok(error_redirect(&e)),
        Err(e) => Err(internal_error(e)),
    }
}

// ============================================================
// Errors
// ============================================================

pub async fn show_error(
    State(store): State<EntryStore>,
    Path(error_message): Path<String>,
) -> HandlerResult {
    render(ErrorPage {
        random: random_link(&store)?,
        message: error_message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_url_encodes_reserved_characters() {
        assert_eq!(entry_url("Python"), "/Python");
        assert_eq!(entry_url("C Sharp"), "/C%20Sharp");
        assert_eq!(entry_url("a/b?c#d"), "/a%2Fb%3Fc%23d");
    }

    #[test]
    fn error_url_encodes_the_message() {
        assert_eq!(
            error_url("Requested entry 'Rust' not exists"),
            "/error/Requested%20entry%20%27Rust%27%20not%20exists"
        );
    }
}
