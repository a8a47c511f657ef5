//! Shared utilities: code policy, URL validation, store error helpers.

pub mod code_generator;
pub mod db_error;
pub mod target_url;
