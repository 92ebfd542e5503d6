//! AWS client module
//!
//! This module provides the signed JSON client used by the provider crates,
//! together with its configuration and credentials.

mod aws_client;
mod aws_config;
mod credentials;

pub use aws_client::{AwsClient, AwsService, Operation};
pub use aws_config::{AwsBuilder, AwsBuilderError, AwsConfig};
pub use credentials::AwsCredentials;
