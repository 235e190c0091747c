//! Utility helpers shared by the library and the CLI

pub mod json;

pub use json::{error_response, success_response, JsonError};
