//! Figpath document support
//!
//! Applies the path converter to JSON design documents (node trees whose
//! `vectorPaths` / `fillGeometry` arrays hold `{ "data": "<path>" }` records)
//! and lints documents for settings that break on import.
//!
//! # Example
//!
//! ```rust
//! use figpath_document::DocumentConverter;
//! use serde_json::json;
//!
//! let mut doc = json!({
//!     "type": "VECTOR",
//!     "vectorPaths": [{ "windingRule": "NONZERO", "data": "m 0 0 h 4 v 4 z" }]
//! });
//! let report = DocumentConverter::default().convert(&mut doc).unwrap();
//!
//! assert_eq!(report.changes[0].pointer, "/vectorPaths/0");
//! assert_eq!(doc["vectorPaths"][0]["data"], "M 0 0 L 4 0 L 4 4 Z");
//! ```

pub mod convert;
pub mod error;
pub mod lint;
pub mod options;
pub mod walk;

pub use convert::{ConversionReport, DocumentConverter, PathChange, SkippedPath};
pub use error::DocumentError;
pub use lint::{LintIssue, LintOptions, LintReport, Linter, Severity};
pub use options::{DocumentOptions, ErrorPolicy};
pub use walk::{collect_sites, PathSite};
