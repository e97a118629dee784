use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up a validator or reading records from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema file `{path}`: {source}")]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file `{path}`: {source}")]
    ParseSchema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid schema: {message}")]
    CompileSchema { message: String },

    #[error("failed to read record file `{path}`: {source}")]
    ReadRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse record file `{path}`: {source}")]
    ParseRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read record directory `{path}`: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
}

/// Errors raised by a single fetch. Every variant is reported as a failed check.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to `{url}` timed out")]
    Timeout { url: String },

    #[error("request to `{url}` failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read body of `{url}`: {message}")]
    Body { url: String, message: String },
}
