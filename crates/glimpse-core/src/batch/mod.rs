//! Batch processing over a folder of images.
//!
//! The runner walks the images one after another, isolating failures so a
//! single unreadable file or provider error never aborts the run. Results are
//! accumulated in a [`BatchReport`] and written out once at the end.

mod config;
mod report;
mod runner;

pub use config::BatchConfig;
pub use report::{BatchOutcome, BatchRecord, BatchReport, ImageReport};
pub use runner::BatchRunner;
