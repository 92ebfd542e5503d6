#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;
#[cfg(test)]
mod scenarios;

pub use mock::{MockDetector, MockResponse, mock_processor};
