//! ink - substitute one replacement value into many text templates
//!
//! This library provides the template renderers, source acquisition, output
//! sink and the parallel orchestrator behind the `ink` command.
//!
//! # Example
//!
//! ```rust
//! use ink_template::render_builtin;
//!
//! let rendered = render_builtin("version={{ .One }} ({{ ink }})", "1.2.3").unwrap();
//! assert_eq!(rendered, "version=1.2.3 (1.2.3)");
//! ```

pub mod config;
pub mod error;
pub mod lint;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod renderer;
pub mod source;
pub mod validate;

pub use config::{Config, RemoteSettings};
pub use error::ParseError;
pub use orchestrator::{BatchReport, ConsoleReporter, JobOutcome, Orchestrator, RenderRequest, Reporter};
pub use output::{derive_output_path, OutputPathError, OutputTarget, WriteError};
pub use parser::{parse, Template};
pub use renderer::{render_builtin, render_user, BuiltinError, Dialect, RegexCompileError, RenderError};
pub use source::{AcquiredTemplate, AcquisitionError, SourceResolver, TemplateSource};

use thiserror::Error;

/// Errors that end a single render job
#[derive(Debug, Error)]
pub enum JobError {
    /// The template body could not be read or fetched
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// Malformed builtin tag syntax
    #[error("template '{source_id}' could not be parsed: {}", format_parse_errors(.errors))]
    Parse {
        source_id: String,
        errors: Vec<ParseError>,
    },

    /// A builtin tag named something outside the bound set
    #[error("while executing template '{source_id}' encountered error: {error}")]
    Render {
        source_id: String,
        #[source]
        error: RenderError,
    },

    #[error(transparent)]
    RegexCompile(#[from] RegexCompileError),

    #[error(transparent)]
    OutputPath(#[from] OutputPathError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("render job panicked")]
    Panicked,

    #[error("unable to start render job: {0}")]
    Spawn(#[source] std::io::Error),
}

impl JobError {
    pub(crate) fn from_builtin(source: &TemplateSource, err: BuiltinError) -> Self {
        match err {
            BuiltinError::Parse(errors) => JobError::Parse {
                source_id: source.to_string(),
                errors,
            },
            BuiltinError::Render(error) => JobError::Render {
                source_id: source.to_string(),
                error,
            },
        }
    }
}

pub(crate) fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_source() {
        let source = TemplateSource::classify("a/t.txt.in");
        let err = JobError::from_builtin(
            &source,
            BuiltinError::Parse(vec![ParseError::Unclosed { span: 0..4 }]),
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"template 'a/t.txt.in' could not be parsed: Parse error at 0..4: unclosed tag, expected '}}'"
        );
    }

    #[test]
    fn test_render_error_names_source() {
        let source = TemplateSource::classify("t.txt.in");
        let err = JobError::from_builtin(
            &source,
            BuiltinError::Render(RenderError::UnboundFunction {
                name: "shout".to_string(),
                span: 0..9,
            }),
        );
        assert!(matches!(err, JobError::Render { .. }));
        assert!(err.to_string().contains("t.txt.in"));
        assert!(err.to_string().contains("shout"));
    }

    #[test]
    fn test_format_parse_errors_joins() {
        let errors = vec![
            ParseError::Unclosed { span: 0..1 },
            ParseError::Unclosed { span: 2..3 },
        ];
        assert_eq!(
            format_parse_errors(&errors),
            "Parse error at 0..1: unclosed tag, expected '}}'; Parse error at 2..3: unclosed tag, expected '}}'"
        );
    }
}
