//! User-defined find/replace, either literal or `{{regex}}`

use regex::{NoExpand, Regex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegexCompileError {
    #[error("find value '{find}' uses the {{{{regex}}}} syntax without a pattern")]
    Empty { find: String },

    #[error("invalid regular expression '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What a `--find` value matches against
#[derive(Debug, Clone)]
pub enum UserPattern {
    Literal(String),
    Regex(Regex),
}

impl UserPattern {
    /// Classify a find value
    ///
    /// `{{pattern}}` compiles `pattern` as a regular expression; anything else
    /// is matched literally.
    pub fn from_find(find: &str) -> Result<Self, RegexCompileError> {
        let Some(pattern) = find
            .strip_prefix("{{")
            .and_then(|rest| rest.strip_suffix("}}"))
        else {
            return Ok(UserPattern::Literal(find.to_string()));
        };

        if pattern.is_empty() {
            return Err(RegexCompileError::Empty {
                find: find.to_string(),
            });
        }

        Regex::new(pattern)
            .map(UserPattern::Regex)
            .map_err(|source| RegexCompileError::Invalid {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Replace every match in `text` with `replacement`, taken literally
    pub fn apply(&self, text: &str, replacement: &str) -> String {
        match self {
            // an empty needle would match between every character
            UserPattern::Literal(find) if find.is_empty() => text.to_string(),
            UserPattern::Literal(find) => text.replace(find.as_str(), replacement),
            UserPattern::Regex(re) => re.replace_all(text, NoExpand(replacement)).into_owned(),
        }
    }
}

pub fn render_user(text: &str, find: &str, replacement: &str) -> Result<String, RegexCompileError> {
    Ok(UserPattern::from_find(find)?.apply(text, replacement))
}
