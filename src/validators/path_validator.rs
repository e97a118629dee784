use crate::product::patterns::Patterns;
use crate::product::types::Check;
use crate::product::validation::Validator;

pub struct PathValidator<'a> {
    pub patterns: &'a Patterns,
}

impl<'a> Validator for PathValidator<'a> {
    fn check(&self) -> Check {
        Check::Path
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        let path = record
            .get("path")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| "path is missing or not a string".to_string())?;

        match self.patterns.is_unix_path(path) {
            true => Ok(()),
            false => Err(format!("{:?} is not a UNIX path", path)),
        }
    }
}
