//! Parse-only check of builtin template syntax

use thiserror::Error;

use crate::error::ParseError;
use crate::parser::parse;
use crate::source::{AcquisitionError, SourceResolver, TemplateSource};

#[derive(Debug, Error)]
pub enum LintError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("{}", crate::format_parse_errors(.errors))]
    Syntax {
        errors: Vec<ParseError>,
        /// ariadne reports for every error, ready to print
        report: String,
    },
}

/// Check that a template body parses
///
/// Identifiers outside the bound set are not reported; they only fail when
/// the template is rendered.
pub fn lint_text(text: &str, filename: &str) -> Result<(), LintError> {
    parse(text).map(|_| ()).map_err(|errors| {
        let report = errors
            .iter()
            .map(|e| e.format(text, filename))
            .collect::<String>();
        LintError::Syntax { errors, report }
    })
}

/// Acquire a template and check that it parses
pub fn lint_source(resolver: &SourceResolver, source: &TemplateSource) -> Result<(), LintError> {
    let acquired = resolver.resolve(source)?;
    lint_text(&acquired.text, &source.to_string())
}
