use crate::fetch::Fetcher;
use crate::product::types::Check;
use crate::product::validation::Validator;

pub struct ProductUrlValidator<'a, F> {
    pub fetcher: &'a F,
}

impl<'a, F: Fetcher> Validator for ProductUrlValidator<'a, F> {
    fn check(&self) -> Check {
        Check::ProductUrl
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        let url = record
            .get("url")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| "url is missing or not a string".to_string())?;

        is_alive(self.fetcher, url)
    }
}

/// A URL is alive when a GET on it answers with status 200.
pub fn is_alive<F: Fetcher>(fetcher: &F, url: &str) -> Result<(), String> {
    match fetcher.fetch(url) {
        Ok(page) if page.is_ok() => Ok(()),
        Ok(page) => Err(format!("`{}` answered with status {}", url, page.status)),
        Err(error) => Err(error.to_string()),
    }
}
