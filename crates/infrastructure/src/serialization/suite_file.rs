//! Suite definition files.
//!
//! A file holds either a single suite or `suites: [...]`. The format is
//! picked from the extension: `.json`, `.yaml` or `.yml`.
//!
//! ```yaml
//! name: Users API
//! cases:
//!   - name: list users
//!     action:
//!       request:
//!         method: GET
//!         url: "{{API_BASE_URL}}/users"
//!     assertions:
//!       - type: status
//!         expected: 200
//!       - type: length
//!         operator: greater_than
//!         length: 4
//! ```

use std::path::{Path, PathBuf};

use apiprobe_domain::TestSuite;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::json::{SerializationError, from_json_bytes};

/// On-disk suite formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SuiteFormat {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Errors raised while loading suite files.
#[derive(Debug, Error)]
pub enum SuiteLoadError {
    /// The file could not be read.
    #[error("failed to read suite file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported suite file extension: {0}")]
    UnsupportedExtension(PathBuf),

    /// The content does not describe suites.
    #[error("invalid suite file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SerializationError,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuiteDocument {
    Many { suites: Vec<TestSuite> },
    One(TestSuite),
}

impl From<SuiteDocument> for Vec<TestSuite> {
    fn from(doc: SuiteDocument) -> Self {
        match doc {
            SuiteDocument::Many { suites } => suites,
            SuiteDocument::One(suite) => vec![suite],
        }
    }
}

/// Parses suites from raw file content.
///
/// # Errors
///
/// Returns [`SerializationError`] if the content is not a suite document.
pub fn parse_suites(content: &[u8], format: SuiteFormat) -> Result<Vec<TestSuite>, SerializationError> {
    let doc: SuiteDocument = match format {
        SuiteFormat::Json => from_json_bytes(content)?,
        SuiteFormat::Yaml => serde_yaml::from_slice(content)?,
    };
    Ok(doc.into())
}

/// Reads and parses a suite file.
///
/// Structural validation happens when the suites are registered.
///
/// # Errors
///
/// Returns [`SuiteLoadError`] if the file cannot be read, has an unknown
/// extension, or does not parse.
pub async fn load_suite_file(path: &Path) -> Result<Vec<TestSuite>, SuiteLoadError> {
    let format = SuiteFormat::from_path(path)
        .ok_or_else(|| SuiteLoadError::UnsupportedExtension(path.to_path_buf()))?;

    let content = tokio::fs::read(path)
        .await
        .map_err(|source| SuiteLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let suites = parse_suites(&content, format).map_err(|source| SuiteLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), suites = suites.len(), "suite file loaded");
    Ok(suites)
}
