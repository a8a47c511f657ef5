//! Wire types for the REST API.

pub mod health;
pub mod links;
