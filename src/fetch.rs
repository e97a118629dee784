use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{FetchError, LoadError};

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves the status and body behind a URL.
///
/// Network checks only ever go through this trait, so tests can swap in a
/// canned implementation instead of reaching the network.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch(url)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("prodlint/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::BuildClient { source })?;

        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        tracing::debug!(url, "fetching");

        let response = self.client.get(url).send().map_err(|error| {
            if error.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    message: error.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|error| {
            if error.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: error.to_string(),
                }
            }
        })?;

        tracing::debug!(url, status, bytes = body.len(), "fetched");
        Ok(Page { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_200_is_ok() {
        let page = |status| Page {
            status,
            body: String::new(),
        };

        assert!(page(200).is_ok());
        assert!(!page(204).is_ok());
        assert!(page(204).is_success());
        assert!(!page(301).is_success());
        assert!(!page(404).is_success());
    }

    #[test]
    fn refused_connection_is_a_request_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).expect("client builds");

        let result = fetcher.fetch("http://127.0.0.1:9/");

        assert!(matches!(
            result,
            Err(FetchError::Request { .. }) | Err(FetchError::Timeout { .. })
        ));
    }
}
