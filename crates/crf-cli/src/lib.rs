//! CLI library components for the CRF extractor.

pub mod extract;
pub mod logging;
