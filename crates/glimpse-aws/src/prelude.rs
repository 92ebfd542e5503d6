//! Prelude for the glimpse-aws crate
//!
//! This module re-exports the most commonly used types from the crate
//! to provide a convenient single import for users.

pub use crate::client::{AwsClient, AwsConfig, AwsCredentials, AwsService, Operation};
pub use crate::error::{Error, Result};
