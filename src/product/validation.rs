use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::LoadError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::product::patterns::Patterns;
use crate::product::types::{Check, Failure};
use crate::validators::date_validator::DateValidator;
use crate::validators::download_validator::DownloadLinkValidator;
use crate::validators::model_validator::ModelValidator;
use crate::validators::path_validator::PathValidator;
use crate::validators::schema_validator::SchemaValidator;
use crate::validators::url_validator::ProductUrlValidator;

/// A single check over a product record. Implementations never panic on
/// malformed input: anything they cannot make sense of is a failure.
pub trait Validator {
    fn check(&self) -> Check;

    fn validate(&self, record: &Value) -> Result<(), String>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    failures: Vec<Failure>,
}

impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn reasons(&self) -> Vec<&'static str> {
        self.failures.iter().map(Failure::reason).collect()
    }

    pub fn failed(&self, check: Check) -> bool {
        self.failures.iter().any(|failure| failure.check == check)
    }

    pub(crate) fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }
}

#[cfg(test)]
pub(crate) fn product_schema() -> Value {
    serde_json::from_str(include_str!("../../expected schema.json"))
        .expect("A valid embedded schema")
}

pub fn read_schema(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::ReadSchema {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::ParseSchema {
        path: path.to_path_buf(),
        source,
    })
}

pub fn compile_schema(schema: &Value) -> Result<JSONSchema, LoadError> {
    JSONSchema::options()
        .compile(schema)
        .map_err(|error| LoadError::CompileSchema {
            message: error.to_string(),
        })
}

/// Runs every product check against a record.
///
/// Built once and shared by reference across all records of a run; nothing
/// in it changes after construction.
pub struct ProductValidator<F> {
    schema: JSONSchema,
    patterns: Patterns,
    fetcher: F,
    release_floor: i64,
}

impl ProductValidator<HttpFetcher> {
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, LoadError> {
        let schema = read_schema(&config.schema_path)?;
        let fetcher = HttpFetcher::new(config.timeout)?;

        tracing::debug!(
            schema = %config.schema_path.display(),
            timeout_ms = config.timeout.as_millis() as u64,
            "validator configured"
        );

        ProductValidator::new(&schema, fetcher, config.release_floor)
    }
}

impl<F: Fetcher> ProductValidator<F> {
    pub fn new(schema: &Value, fetcher: F, release_floor: i64) -> Result<Self, LoadError> {
        Ok(ProductValidator {
            schema: compile_schema(schema)?,
            patterns: Patterns::compile()?,
            fetcher,
            release_floor,
        })
    }

    /// Every check runs even when an earlier one failed; failures keep the
    /// order of [`Check::ALL`].
    pub fn validate(&self, record: &Value) -> ValidationReport {
        let schema = SchemaValidator {
            schema: &self.schema,
        };
        let path = PathValidator {
            patterns: &self.patterns,
        };
        let product_url = ProductUrlValidator {
            fetcher: &self.fetcher,
        };
        let download_link = DownloadLinkValidator {
            patterns: &self.patterns,
            fetcher: &self.fetcher,
        };
        let dates = DateValidator {
            release_floor: self.release_floor,
        };
        let model = ModelValidator {
            patterns: &self.patterns,
            fetcher: &self.fetcher,
        };

        let validators: [&dyn Validator; 6] =
            [&schema, &path, &product_url, &download_link, &dates, &model];

        let mut report = ValidationReport::default();
        for validator in validators {
            if let Err(detail) = validator.validate(record) {
                tracing::debug!(check = validator.check().name(), %detail, "check failed");
                report.push(Failure {
                    check: validator.check(),
                    detail,
                });
            }
        }

        report
    }
}
