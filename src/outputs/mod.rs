//! Output generation for the assembled datasets.
//!
//! # Submodules
//!
//! - [`json`]: Writes and reads the JSON-lines dataset files

pub mod json;
