//! Validation of submitted forms.
//!
//! Each form body implements [`Validate`], which yields either the cleaned value
//! the handler needs or the errors to show next to each field. Values are
//! trimmed before they are checked, and the trimmed value is what gets used.

use std::collections::BTreeMap;

use crate::models::{CreateEntryInput, Entry, SearchInput, UpdateEntryInput};
use crate::store::title;

pub const REQUIRED: &str = "This field is required.";

/// Field name to the messages reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

pub trait Validate {
    type Output;

    fn validate(&self) -> Result<Self::Output, FormErrors>;
}

fn required<'a>(errors: &mut FormErrors, field: &'static str, value: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value
}

impl Validate for SearchInput {
    type Output = String;

    fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let query = required(&mut errors, "q", &self.q);
        errors.into_result(|| query.to_string())
    }
}

impl Validate for CreateEntryInput {
    type Output = Entry;

    fn validate(&self) -> Result<Entry, FormErrors> {
        let mut errors = FormErrors::new();
        let title = required(&mut errors, "title", &self.title);
        if !title.is_empty() {
            if let Err(problem) = title::check(title) {
                errors.add("title", problem.message());
            }
        }
        let content = required(&mut errors, "content", &self.content);

        errors.into_result(|| Entry {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl Validate for UpdateEntryInput {
    type Output = String;

    fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let content = required(&mut errors, "content", &self.content);
        errors.into_result(|| content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_is_trimmed() {
        let input = SearchInput {
            q: "  python ".to_string(),
        };
        assert_eq!(input.validate(), Ok("python".to_string()));
    }

    #[test]
    fn blank_search_query_is_required() {
        let errors = SearchInput { q: "   ".to_string() }.validate().unwrap_err();
        assert_eq!(errors.for_field("q"), [REQUIRED.to_string()]);
    }

    #[test]
    fn new_entry_reports_every_missing_field() {
        let errors = CreateEntryInput::default().validate().unwrap_err();
        assert_eq!(errors.for_field("title"), [REQUIRED.to_string()]);
        assert_eq!(errors.for_field("content"), [REQUIRED.to_string()]);
    }

    #[test]
    fn new_entry_rejects_titles_that_are_not_file_names() {
        let input = CreateEntryInput {
            title: "../secrets".to_string(),
            content: "x".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.for_field("title").len(), 1);
        assert!(errors.for_field("content").is_empty());
    }

    #[test]
    fn valid_new_entry_becomes_an_entry() {
        let input = CreateEntryInput {
            title: " Rust ".to_string(),
            content: "# Rust\nA language.\n".to_string(),
        };
        assert_eq!(
            input.validate(),
            Ok(Entry {
                title: "Rust".to_string(),
                content: "# Rust\nA language.".to_string(),
            })
        );
    }

    #[test]
    fn edit_requires_content() {
        let errors = UpdateEntryInput::default().validate().unwrap_err();
        assert_eq!(errors.for_field("content"), [REQUIRED.to_string()]);
        assert!(errors.for_field("title").is_empty());
    }
}
