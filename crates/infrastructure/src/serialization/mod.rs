//! Suite file loading and deterministic JSON output.
//!
//! JSON written by apiprobe uses:
//! - 2-space indentation
//! - Trailing newline
//! - Struct fields in declaration order, sorted keys where the source type
//!   uses `BTreeMap`

mod json;
mod suite_file;

pub use json::{SerializationError, from_json_bytes, to_json_stable};
pub use suite_file::{SuiteFormat, SuiteLoadError, load_suite_file, parse_suites};
