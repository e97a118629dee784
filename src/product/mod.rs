pub mod display;
pub mod patterns;
pub mod types;
pub mod validation;
