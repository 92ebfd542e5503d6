#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for AWS client operations.
///
/// Use this target for logging client initialization, configuration, and client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "glimpse_aws::client";

/// Tracing target for request signing.
pub const TRACING_TARGET_SIGNING: &str = "glimpse_aws::signing";

mod client;
pub mod error;
#[doc(hidden)]
pub mod prelude;
pub mod signing;

pub use crate::client::{
    AwsBuilder, AwsBuilderError, AwsClient, AwsConfig, AwsCredentials, AwsService, Operation,
};
pub use crate::error::{Error, Result};
