//! Dashboard to ConfigMap conversion module
//!
//! This module contains the envelope builder, the writer, configuration, and
//! the directory-mode walker.

pub mod batch;
pub mod config;
pub mod engine;
pub mod writer;

pub use config::{ConversionConfig, Mode, RunConfig, DEFAULT_NAMESPACE};

pub use engine::{ConfigMap, ConversionEngine, ManifestData};

pub use crate::error::ConversionResult;
