//! Rules for titles that double as file names inside the entries directory.

/// Longest title accepted, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Longest title accepted, in UTF-8 bytes. File names are capped at 255 bytes
/// including the extension.
pub const MAX_TITLE_BYTES: usize = 255 - super::ENTRY_EXT.len();

/// Why a title cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleProblem {
    Empty,
    TooLong,
    TooManyBytes,
    PathSeparator,
    LeadingDot,
    ControlCharacter,
}

impl TitleProblem {
    pub fn message(self) -> String {
        match self {
            Self::Empty => "Title cannot be empty.".to_string(),
            Self::TooLong => format!("Title must be at most {MAX_TITLE_CHARS} characters."),
            Self::TooManyBytes => {
                format!("Title must be at most {MAX_TITLE_BYTES} bytes when encoded as UTF-8.")
            }
            Self::PathSeparator => "Title cannot contain '/' or '\\'.".to_string(),
            Self::LeadingDot => "Title cannot start with '.'.".to_string(),
            Self::ControlCharacter => "Title cannot contain control characters.".to_string(),
        }
    }
}

/// Check that `title` maps to exactly one file name in the entries directory.
pub fn check(title: &str) -> Result<(), TitleProblem> {
    if title.is_empty() {
        return Err(TitleProblem::Empty);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(TitleProblem::TooLong);
    }
    if title.len() > MAX_TITLE_BYTES {
        return Err(TitleProblem::TooManyBytes);
    }
    if title.contains(['/', '\\']) {
        return Err(TitleProblem::PathSeparator);
    }
    if title.starts_with('.') {
        return Err(TitleProblem::LeadingDot);
    }
    if title.chars().any(char::is_control) {
        return Err(TitleProblem::ControlCharacter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_titles() {
        assert_eq!(check("Python"), Ok(()));
        assert_eq!(check("C++ (language)"), Ok(()));
        assert_eq!(check("Café"), Ok(()));
    }

    #[test]
    fn rejects_titles_that_escape_the_directory() {
        assert_eq!(check("../etc/passwd"), Err(TitleProblem::PathSeparator));
        assert_eq!(check("a\\b"), Err(TitleProblem::PathSeparator));
        assert_eq!(check(".hidden"), Err(TitleProblem::LeadingDot));
    }

    #[test]
    fn rejects_empty_long_and_control_titles() {
        assert_eq!(check(""), Err(TitleProblem::Empty));
        assert_eq!(check(&"x".repeat(MAX_TITLE_CHARS + 1)), Err(TitleProblem::TooLong));
        assert_eq!(check("line\nbreak"), Err(TitleProblem::ControlCharacter));
    }

    #[test]
    fn limits_multibyte_titles_by_encoded_length() {
        let cjk = "字".repeat(100);
        assert!(cjk.chars().count() <= MAX_TITLE_CHARS);
        assert_eq!(check(&cjk), Err(TitleProblem::TooManyBytes));

        let fits = "字".repeat(MAX_TITLE_BYTES / 3);
        assert_eq!(check(&fits), Ok(()));
    }
}
