pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod product;
pub mod validators;

use serde_json::Value;

use error::LoadError;
use fetch::HttpFetcher;
use product::validation::{ProductValidator, ValidationReport};

/// Validates one record with a validator built from `config`.
pub fn validate(
    record: &Value,
    config: &config::ValidatorConfig,
) -> Result<ValidationReport, LoadError> {
    let validator: ProductValidator<HttpFetcher> = ProductValidator::from_config(config)?;

    Ok(validator.validate(record))
}
