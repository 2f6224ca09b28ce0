//! Template sources: local files and remote URLs

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::RemoteSettings;

/// Accept header sent with every remote template request
pub const ACCEPT_TEXT: &str = "text/*";

/// Where a template body comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateSource {
    Local(PathBuf),
    Remote(String),
}

impl TemplateSource {
    /// Classify a command-line argument by its URL scheme prefix
    pub fn classify(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            TemplateSource::Remote(arg.to_string())
        } else {
            TemplateSource::Local(PathBuf::from(arg))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, TemplateSource::Remote(_))
    }

    /// The final path segment of the source
    ///
    /// For URLs the query string and fragment are not part of the segment.
    /// Returns `None` for an unparseable URL or a path without a file name.
    pub fn file_name(&self) -> Option<String> {
        match self {
            TemplateSource::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            TemplateSource::Remote(url) => {
                let url = Url::parse(url).ok()?;
                url.path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .map(str::to_string)
            }
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Local(path) => write!(f, "{}", path.display()),
            TemplateSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Raw template text, owned by the render that requested it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredTemplate {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("unable to read local template file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to perform GET request for remote template file '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned a non-200 response status: {status}")]
    Status { url: String, status: StatusCode },

    #[error("unable to read response body for remote template file '{url}': {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Acquires template text from local files and remote URLs
///
/// The HTTP client is built once and shared by every job of a batch.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    client: Client,
}

impl SourceResolver {
    pub fn new(settings: &RemoteSettings) -> Result<Self, AcquisitionError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()
            .map_err(AcquisitionError::Client)?;
        Ok(Self { client })
    }

    /// Read or fetch the whole template body. There are no retries.
    pub fn resolve(&self, source: &TemplateSource) -> Result<AcquiredTemplate, AcquisitionError> {
        let text = match source {
            TemplateSource::Local(path) => read_local(path)?,
            TemplateSource::Remote(url) => self.fetch_remote(url)?,
        };
        Ok(AcquiredTemplate { text })
    }

    fn fetch_remote(&self, url: &str) -> Result<String, AcquisitionError> {
        debug!(url, "fetching remote template");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_TEXT)
            .send()
            .map_err(|source| AcquisitionError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AcquisitionError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().map_err(|source| AcquisitionError::Body {
            url: url.to_string(),
            source,
        })
    }
}

fn read_local(path: &Path) -> Result<String, AcquisitionError> {
    debug!(path = %path.display(), "reading local template");
    std::fs::read_to_string(path).map_err(|source| AcquisitionError::Read {
        path: path.to_path_buf(),
        source,
    })
}
