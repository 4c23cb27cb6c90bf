//! Build-time row-scan code generator.
//!
//! This crate scans Rust source files for named-field structs and renders
//! row-scanning functions for them from a template.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     rowscan_build::generate_scans()
//!         .scan_path("src/models.rs")
//!         .output_file("src/models/scans.rs")
//!         .package_name("db")
//!         .run()
//!         .expect("Failed to generate row scanners");
//!
//!     println!("cargo:rerun-if-changed=src/models.rs");
//! }
//! ```
//!
//! The generated file is a child module of the scanned one, so its
//! `use super::*;` reaches the structs. In `src/models.rs`:
//!
//! ```ignore
//! mod scans;
//! pub use scans::db;
//!
//! #[derive(Default)]
//! pub struct Post {
//!     pub Id: i64,
//!     pub Title: String,
//! }
//! ```
//!
//! The lower-level pieces can be used directly:
//!
//! ```ignore
//! use std::collections::HashSet;
//! use rowscan_build::{Generator, extract, verify_source};
//!
//! let structs = extract("src/models.rs".as_ref(), &HashSet::new())?;
//! let mut out = Vec::new();
//! Generator::builtin()?.generate(&mut out, "db", false, &structs)?;
//! verify_source(std::str::from_utf8(&out)?)?;
//! ```

mod builder;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod model;
pub mod scanner;
pub mod templates;

pub use builder::{GenerateReport, ScanGenerator, default_package_name};
pub use discovery::collect_source_files;
pub use error::{GenerateError, ScanError};
pub use generator::{Generator, verify_source};
pub use model::{FieldInfo, FieldType, ID_FIELD, StructInfo};
pub use scanner::{extract, extract_source};
pub use templates::{SCANS, SCANS_TEST, TemplateRegistry};

/// Create a new generator with default settings.
pub fn generate_scans() -> ScanGenerator {
    ScanGenerator::new()
}
