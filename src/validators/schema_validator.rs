use crate::product::types::Check;
use crate::product::validation::Validator;
use jsonschema::JSONSchema;
use serde_json;

pub struct SchemaValidator<'a> {
    pub schema: &'a JSONSchema,
}

impl<'a> Validator for SchemaValidator<'a> {
    fn check(&self) -> Check {
        Check::Schema
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        validate_schema(record, self.schema)
    }
}

fn validate_schema(record: &serde_json::Value, schema: &JSONSchema) -> Result<(), String> {
    match schema.validate(record) {
        Ok(_) => Ok(()),
        Err(errors) => {
            let messages: Vec<String> = errors
                .map(|error| match error.instance_path.to_string() {
                    path if path.is_empty() => error.to_string(),
                    path => format!("{}: {}", path, error),
                })
                .collect();
            Err(messages.join("; "))
        }
    }
}
