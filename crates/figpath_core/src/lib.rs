//! Figpath core
//!
//! Converts SVG path data written in the general path mini-language into the
//! restricted dialect accepted by design-tool import formats: absolute move,
//! line, cubic Bézier and close commands only.
//!
//! - **Parser**: tokenizes path data and splits it into one [`PathCommand`]
//!   per parameter group (implicit command repetition included)
//! - **Converter**: resolves relative coordinates, rewrites `H`/`V` as lines,
//!   degree-elevates quadratics, reflects smooth-curve control points and
//!   approximates elliptical arcs with cubics
//! - **Formatter**: writes the result back as plain-decimal path data
//!
//! # Example
//!
//! ```rust
//! use figpath_core::convert_path;
//!
//! let converted = convert_path("m 10 10 h 5 v 5 z").unwrap();
//! assert_eq!(converted, "M 10 10 L 15 10 L 15 15 Z");
//!
//! // Arcs become cubic Bézier segments of at most 90° each
//! let circle = convert_path("M 12 2 A 10 10 0 1 1 12 22").unwrap();
//! assert!(circle.starts_with("M 12 2 C "));
//! assert!(circle.ends_with(" 12 22"));
//! ```

pub mod arc;
pub mod command;
pub mod converter;
pub mod error;
pub mod format;
pub mod parser;
pub mod point;

pub use arc::{ArcApproximation, CenterArc, CubicSegment, EndpointArc};
pub use command::{CommandKind, OutputCommand, PathCommand};
pub use converter::{convert_commands, convert_path, ConverterState, LastSegment, PathConverter};
pub use error::{MalformedPathError, MalformedReason, Result};
pub use format::{format_command, format_commands, format_number, FormatOptions};
pub use parser::parse_path;
pub use point::Point;
