//! Directory ingestion: load every record file, skip models that were already
//! accepted, validate the rest and keep the records that pass.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::product::types::{Check, Failure, ProductRecord};
use crate::product::validation::{ProductValidator, ValidationReport};

#[derive(Debug)]
pub enum Outcome {
    Accepted,
    Rejected(ValidationReport),
    Duplicate { model: String },
    Unreadable(LoadError),
}

#[derive(Debug)]
pub struct FileOutcome {
    pub file_name: String,
    pub outcome: Outcome,
}

/// Accepted records keyed by model.
#[derive(Debug, Default)]
pub struct Catalog {
    records: BTreeMap<String, ProductRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, model: &str) -> bool {
        self.records.contains_key(model)
    }

    /// Returns false and keeps the existing record when the model is known.
    pub fn insert(&mut self, record: ProductRecord) -> bool {
        if self.contains(&record.model) {
            return false;
        }
        self.records.insert(record.model.clone(), record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn ingest<F: Fetcher>(
        &mut self,
        file_name: &str,
        record: &Value,
        validator: &ProductValidator<F>,
    ) -> Outcome {
        let model = record.get("model").and_then(Value::as_str);

        if let Some(model) = model.filter(|model| self.contains(model)) {
            tracing::info!(file = file_name, model, "skipping known model");
            return Outcome::Duplicate {
                model: model.to_string(),
            };
        }

        let report = validator.validate(record);
        if !report.is_success() {
            tracing::info!(
                file = file_name,
                failures = report.failures().len(),
                "record rejected"
            );
            return Outcome::Rejected(report);
        }

        match ProductRecord::deserialize(record) {
            Ok(product) => {
                tracing::info!(file = file_name, model = %product.model, "record accepted");
                self.insert(product);
                Outcome::Accepted
            }
            Err(error) => {
                let mut report = ValidationReport::default();
                report.push(Failure {
                    check: Check::Schema,
                    detail: format!("record is not a product: {}", error),
                });
                Outcome::Rejected(report)
            }
        }
    }
}

pub fn load_record(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::ReadRecord {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::ParseRecord {
        path: path.to_path_buf(),
        source,
    })
}

/// The `.json` files of `dir`, sorted by name.
pub fn record_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_directory_error = |source| LoadError::ReadDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_directory_error)? {
        let path = entry.map_err(read_directory_error)?.path();
        let is_json = path.extension().map_or(false, |extension| extension == "json");

        if path.is_file() && is_json {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "ignoring non-record entry");
        }
    }

    files.sort();
    Ok(files)
}

pub fn run<F: Fetcher>(
    dir: &Path,
    validator: &ProductValidator<F>,
    catalog: &mut Catalog,
) -> Result<Vec<FileOutcome>, LoadError> {
    let files = record_files(dir)?;
    tracing::info!(dir = %dir.display(), files = files.len(), "processing records");

    let outcomes = files
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let outcome = match load_record(path) {
                Ok(record) => catalog.ingest(&file_name, &record, validator),
                Err(error) => {
                    tracing::warn!(file = %file_name, %error, "unreadable record");
                    Outcome::Unreadable(error)
                }
            };

            FileOutcome { file_name, outcome }
        })
        .collect();

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FIRST_PRODUCT_RELEASE;
    use crate::fetch::testing::StubFetcher;
    use crate::product::validation::product_schema;
    use std::fs;

    const PAGE: &str = "<html><body><h1>Catalyst 9300 Series Switches</h1></body></html>";

    fn record(model: &str, release: i64) -> Value {
        serde_json::json!({
            "model": model,
            "path": "/switches/catalyst/9300",
            "url": "https://vendor.example/c9300",
            "downloads": [{ "all": "https://vendor.example/c9300/firmware.bin" }],
            "release": release,
            "endofsale": 610000000,
            "endofsupport": 620000000
        })
    }

    fn fetcher() -> StubFetcher {
        StubFetcher::new()
            .page("https://vendor.example/c9300", 200, PAGE)
            .page("https://vendor.example/c9300/firmware.bin", 200, "")
    }

    #[test]
    fn ingest_skips_known_model_without_validating() {
        let fetcher = fetcher();
        let validator = ProductValidator::new(&product_schema(), &fetcher, FIRST_PRODUCT_RELEASE)
            .expect("validator builds");
        let mut catalog = Catalog::new();

        let first = catalog.ingest("a.json", &record("9300", 600000000), &validator);
        let requests = fetcher.request_count();
        let second = catalog.ingest("b.json", &record("9300", 600000001), &validator);

        assert!(matches!(first, Outcome::Accepted));
        assert!(matches!(second, Outcome::Duplicate { ref model } if model == "9300"));
        assert_eq!(fetcher.request_count(), requests);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.records.get("9300").map(|product| product.release),
            Some(600000000)
        );
    }

    #[test]
    fn ingest_keeps_rejected_models_out() {
        let validator = ProductValidator::new(&product_schema(), fetcher(), FIRST_PRODUCT_RELEASE)
            .expect("validator builds");
        let mut catalog = Catalog::new();

        let rejected = catalog.ingest("a.json", &record("9300", 100), &validator);
        let accepted = catalog.ingest("b.json", &record("9300", 600000000), &validator);

        match rejected {
            Outcome::Rejected(report) => {
                assert_eq!(report.reasons(), vec!["There is an issue with the dates"])
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(accepted, Outcome::Accepted));
        assert_eq!(catalog.models().collect::<Vec<_>>(), vec!["9300"]);
    }

    #[test]
    fn run_processes_directory_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.json"), record("9300", 600000000).to_string()).unwrap();
        fs::write(dir.path().join("c.json"), record("9300", 600000000).to_string()).unwrap();
        fs::write(dir.path().join("a.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let validator = ProductValidator::new(&product_schema(), fetcher(), FIRST_PRODUCT_RELEASE)
            .expect("validator builds");
        let mut catalog = Catalog::new();

        let outcomes = run(dir.path(), &validator, &mut catalog).expect("directory is readable");

        let names: Vec<_> = outcomes.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
        assert!(matches!(
            outcomes[0].outcome,
            Outcome::Unreadable(LoadError::ParseRecord { .. })
        ));
        assert!(matches!(outcomes[1].outcome, Outcome::Accepted));
        assert!(matches!(outcomes[2].outcome, Outcome::Duplicate { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn run_missing_directory() {
        let validator = ProductValidator::new(&product_schema(), fetcher(), FIRST_PRODUCT_RELEASE)
            .expect("validator builds");

        let result = run(Path::new("does/not/exist"), &validator, &mut Catalog::new());

        assert!(matches!(result, Err(LoadError::ReadDirectory { .. })));
    }

    #[test]
    fn insert_rejects_known_model() {
        let mut catalog = Catalog::new();
        let product: ProductRecord =
            serde_json::from_value(record("9300", 600000000)).expect("a product");

        assert!(catalog.insert(product.clone()));
        assert!(!catalog.insert(product));
        assert!(catalog.contains("9300"));
        assert!(!catalog.is_empty());
    }
}
