//! Command-line argument checks that run before any rendering

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use crate::source::TemplateSource;

/// Suffix every template name must carry
pub const TEMPLATE_EXTENSION: &str = ".in";

/// True if the source's final path segment ends in `.in`
///
/// The output path is built by dropping this suffix, so a remote template
/// is judged by its URL path and not by a trailing query string.
pub fn has_template_extension(source: &TemplateSource) -> bool {
    source
        .file_name()
        .is_some_and(|name| name.ends_with(TEMPLATE_EXTENSION))
}

/// Confirm a local template path exists
pub fn ensure_local_exists(path: &Path) -> io::Result<()> {
    std::fs::metadata(path).map(|_| ()).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("unable to locate template '{}': {}", path.display(), err),
        )
    })
}

/// Read a replacement value piped on standard input
///
/// Returns `None` when stdin is a terminal or the piped input is empty.
pub fn piped_stdin() -> io::Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok((!buffer.is_empty()).then_some(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_local() {
        assert!(has_template_extension(&TemplateSource::classify("a/b/t.txt.in")));
        assert!(!has_template_extension(&TemplateSource::classify("a/b/t.txt")));
    }

    #[test]
    fn test_extension_remote_ignores_query() {
        assert!(has_template_extension(&TemplateSource::classify(
            "http://h/p/template.txt.in?q=1"
        )));
        assert!(!has_template_extension(&TemplateSource::classify(
            "http://h/p/template.txt?x=.in"
        )));
    }

    #[test]
    fn test_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_local_exists(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = ensure_local_exists(Path::new("completelybogus.txt.in")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("completelybogus.txt.in"));
    }
}
