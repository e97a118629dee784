use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub model: String,
    pub path: String,
    pub url: String,
    pub downloads: Vec<Download>,
    pub release: i64,
    pub endofsale: Option<i64>,
    pub endofsupport: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Download {
    #[serde(default)]
    pub all: Option<String>,
}

/// Lifecycle timestamps of a product, in epoch seconds.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Lifecycle {
    pub release: i64,
    #[serde(default)]
    pub endofsale: Option<i64>,
    #[serde(default)]
    pub endofsupport: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Schema,
    Path,
    ProductUrl,
    DownloadLink,
    Dates,
    Model,
}

impl Check {
    pub const ALL: [Check; 6] = [
        Check::Schema,
        Check::Path,
        Check::ProductUrl,
        Check::DownloadLink,
        Check::Dates,
        Check::Model,
    ];

    pub fn reason(&self) -> &'static str {
        match self {
            Check::Schema => "Schema is not correct",
            Check::Path => "Failed to validate UNIX path",
            Check::ProductUrl => "Could not connect to the product page",
            Check::DownloadLink => "Download link is not alive",
            Check::Dates => "There is an issue with the dates",
            Check::Model => "Product model is incorrect",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Check::Schema => "schema",
            Check::Path => "path",
            Check::ProductUrl => "product-url",
            Check::DownloadLink => "download-link",
            Check::Dates => "dates",
            Check::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub check: Check,
    pub detail: String,
}

impl Failure {
    pub fn reason(&self) -> &'static str {
        self.check.reason()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.check.reason(), self.detail)
    }
}
