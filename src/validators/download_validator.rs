use crate::fetch::Fetcher;
use crate::product::patterns::Patterns;
use crate::product::types::Check;
use crate::product::validation::Validator;
use crate::validators::url_validator::is_alive;

pub struct DownloadLinkValidator<'a, F> {
    pub patterns: &'a Patterns,
    pub fetcher: &'a F,
}

impl<'a, F: Fetcher> Validator for DownloadLinkValidator<'a, F> {
    fn check(&self) -> Check {
        Check::DownloadLink
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        let downloads = record
            .get("downloads")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| "downloads is missing or not a list".to_string())?;

        // Only the first entry declaring `all` is considered.
        let link = downloads
            .iter()
            .find_map(|download| download.get("all"))
            .ok_or_else(|| "no download declares an `all` link".to_string())?;

        let link = link
            .as_str()
            .ok_or_else(|| format!("download link {} is not a string", link))?;

        let remainder = self.patterns.strip_url_prefix(link);
        if remainder.is_empty() {
            return Err(format!("`{}` is not a download URL", link));
        }

        is_alive(self.fetcher, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StubFetcher;

    const LINK: &str = "https://example.com/file.bin";

    fn downloads(input: &str) -> serde_json::Value {
        serde_yaml::from_str(input).expect("Unable to parse yaml")
    }

    fn validate(fetcher: &StubFetcher, record: &serde_json::Value) -> Result<(), String> {
        let patterns = Patterns::compile().expect("patterns compile");
        let validator = DownloadLinkValidator {
            patterns: &patterns,
            fetcher,
        };
        validator.validate(record)
    }

    #[test]
    fn validate_live_link_after_skipped_entries() {
        let fetcher = StubFetcher::new().page(LINK, 200, "");
        let record = downloads(
            r#"
            downloads:
              - other: x
              - all: https://example.com/file.bin
        "#,
        );

        assert!(validate(&fetcher, &record).is_ok());
        assert_eq!(*fetcher.requests.borrow(), vec![LINK.to_string()]);
    }

    #[test]
    fn validate_dead_link() {
        let fetcher = StubFetcher::new().page(LINK, 404, "");
        let record = downloads(
            r#"
            downloads:
              - other: x
              - all: https://example.com/file.bin
        "#,
        );

        assert!(validate(&fetcher, &record).is_err());
    }

    #[test]
    fn validate_timed_out_link() {
        let fetcher = StubFetcher::new().timeout(LINK);
        let record = downloads(
            r#"
            downloads:
              - other: x
              - all: https://example.com/file.bin
        "#,
        );

        assert_eq!(
            validate(&fetcher, &record),
            Err("request to `https://example.com/file.bin` timed out".to_string())
        );
    }

    #[test]
    fn validate_without_any_link() {
        let fetcher = StubFetcher::new();
        let record = downloads(
            r#"
            downloads:
              - other: x
        "#,
        );

        assert_eq!(
            validate(&fetcher, &record),
            Err("no download declares an `all` link".to_string())
        );
        assert_eq!(fetcher.request_count(), 0);
    }

    #[test]
    fn validate_only_first_link() {
        let fetcher = StubFetcher::new()
            .page("https://example.com/old.bin", 404, "")
            .page(LINK, 200, "");
        let record = downloads(
            r#"
            downloads:
              - all: https://example.com/old.bin
              - all: https://example.com/file.bin
        "#,
        );

        assert!(validate(&fetcher, &record).is_err());
        assert_eq!(fetcher.request_count(), 1);
    }

    #[test]
    fn validate_live_link_with_double_slashes() {
        let redirect = "https://example.com/download?next=https://mirror.example/file.bin";
        let doubled = "https://example.com/a//file.bin";
        let fetcher = StubFetcher::new()
            .page(redirect, 200, "")
            .page(doubled, 200, "");

        let record = downloads(
            r#"
            downloads:
              - all: "https://example.com/download?next=https://mirror.example/file.bin"
        "#,
        );
        assert!(validate(&fetcher, &record).is_ok());

        let record = downloads(
            r#"
            downloads:
              - all: "https://example.com/a//file.bin"
        "#,
        );
        assert!(validate(&fetcher, &record).is_ok());
        assert_eq!(fetcher.request_count(), 2);
    }

    #[test]
    fn validate_malformed_link() {
        let fetcher = StubFetcher::new();
        let record = downloads(
            r#"
            downloads:
              - all: "https://"
        "#,
        );

        assert_eq!(
            validate(&fetcher, &record),
            Err("`https://` is not a download URL".to_string())
        );
        assert_eq!(fetcher.request_count(), 0);
    }
}
