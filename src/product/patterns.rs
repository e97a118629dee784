use regex::Regex;
use scraper::Selector;

use crate::error::LoadError;

const PATH_PATTERN: &str = r"^/?([^/\x00]+/?)+$";
const URL_PREFIX_PATTERN: &str = r"^((?i:https?|ftp|file)?[Cc]?://)?(www\.)?";
const HEADING_SELECTOR: &str = "h1";

/// Structural patterns compiled once per validator.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub path: Regex,
    pub url_prefix: Regex,
    pub heading: Selector,
}

impl Patterns {
    pub fn compile() -> Result<Self, LoadError> {
        Ok(Patterns {
            path: regex(PATH_PATTERN)?,
            url_prefix: regex(URL_PREFIX_PATTERN)?,
            heading: Selector::parse(HEADING_SELECTOR).map_err(|error| LoadError::Pattern {
                pattern: HEADING_SELECTOR.to_string(),
                message: error.to_string(),
            })?,
        })
    }

    pub fn is_unix_path(&self, path: &str) -> bool {
        self.path.is_match(path)
    }

    /// Drops the scheme and `www.` prefix, leaving the path-like remainder.
    pub fn strip_url_prefix<'u>(&self, url: &'u str) -> &'u str {
        match self.url_prefix.find(url) {
            Some(prefix) => &url[prefix.end()..],
            None => url,
        }
    }
}

fn regex(pattern: &str) -> Result<Regex, LoadError> {
    Regex::new(pattern).map_err(|error| LoadError::Pattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_www() {
        let patterns = Patterns::compile().expect("patterns compile");

        assert_eq!(
            patterns.strip_url_prefix("https://www.example.com/file.bin"),
            "example.com/file.bin"
        );
        assert_eq!(
            patterns.strip_url_prefix("HTTP://example.com/a"),
            "example.com/a"
        );
        assert_eq!(patterns.strip_url_prefix("ftp://mirror/x"), "mirror/x");
        assert_eq!(patterns.strip_url_prefix("file:///srv/x"), "/srv/x");
        assert_eq!(patterns.strip_url_prefix("www.example.com"), "example.com");
        assert_eq!(patterns.strip_url_prefix("example.com/a"), "example.com/a");
        assert_eq!(patterns.strip_url_prefix("https://"), "");
    }

    #[test]
    fn recognizes_unix_paths() {
        let patterns = Patterns::compile().expect("patterns compile");

        assert!(patterns.is_unix_path("/a/b/c"));
        assert!(patterns.is_unix_path("a/b"));
        assert!(patterns.is_unix_path("a"));
        assert!(patterns.is_unix_path("/a/b/"));
        assert!(!patterns.is_unix_path(""));
        assert!(!patterns.is_unix_path("/"));
        assert!(!patterns.is_unix_path("a//"));
        assert!(!patterns.is_unix_path("a/\0/b"));
    }
}
