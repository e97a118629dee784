pub mod date_validator;
pub mod download_validator;
pub mod model_validator;
pub mod path_validator;
pub mod schema_validator;
pub mod url_validator;
