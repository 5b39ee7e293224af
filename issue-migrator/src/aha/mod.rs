//! Aha! roadmap source.

mod client;
mod error;
mod models;

pub use client::AhaClient;
pub use error::AhaError;
pub use models::{AhaDescription, AhaEpic, AhaFeature, AhaRelease, EpicReference, FeatureReference};
