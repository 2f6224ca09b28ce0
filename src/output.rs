//! Output sink: standard output or a file path derived from the source

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::source::TemplateSource;

/// Number of trailing characters dropped from a template name (`.in`)
const TEMPLATE_SUFFIX_LEN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutputPathError {
    #[error("cannot derive an output name from '{source_id}': no file name")]
    NoFileName { source_id: String },

    #[error("cannot derive an output name from '{name}': it must be longer than the '.in' suffix")]
    TooShort { name: String },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("unable to write rendered template to '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write rendered template to standard output: {0}")]
    Stream(#[source] io::Error),
}

/// Where a rendered template goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stream,
    File(PathBuf),
}

impl OutputTarget {
    pub fn for_source(source: &TemplateSource, emit_to_stream: bool) -> Result<Self, OutputPathError> {
        if emit_to_stream {
            Ok(OutputTarget::Stream)
        } else {
            derive_output_path(source).map(OutputTarget::File)
        }
    }

    /// Write the complete rendered text
    pub fn write(&self, rendered: &str) -> Result<(), WriteError> {
        match self {
            OutputTarget::Stream => write_stream(rendered),
            OutputTarget::File(path) => write_file(path, rendered),
        }
    }
}

/// Derive the output path for a template
///
/// Local templates are written beside the template, remote templates into the
/// working directory under the URL's final path segment. In both cases the
/// last three characters (the `.in` suffix) are dropped.
pub fn derive_output_path(source: &TemplateSource) -> Result<PathBuf, OutputPathError> {
    let name = source
        .file_name()
        .ok_or_else(|| OutputPathError::NoFileName {
            source_id: source.to_string(),
        })?;
    let stem = strip_suffix_chars(&name)?;

    Ok(match source {
        TemplateSource::Local(path) => path.with_file_name(stem),
        TemplateSource::Remote(_) => PathBuf::from(stem),
    })
}

fn strip_suffix_chars(name: &str) -> Result<&str, OutputPathError> {
    match name.char_indices().rev().nth(TEMPLATE_SUFFIX_LEN - 1) {
        Some((cut, _)) if cut > 0 => Ok(&name[..cut]),
        _ => Err(OutputPathError::TooShort {
            name: name.to_string(),
        }),
    }
}

fn write_stream(rendered: &str) -> Result<(), WriteError> {
    // one lock per document keeps concurrent jobs from interleaving
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(WriteError::Stream)
}

fn write_file(path: &Path, rendered: &str) -> Result<(), WriteError> {
    debug!(path = %path.display(), bytes = rendered.len(), "writing rendered template");
    let to_write_error = |source| WriteError::File {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(to_write_error)?;
    file.write_all(rendered.as_bytes()).map_err(to_write_error)?;
    file.sync_all().map_err(to_write_error)
}
