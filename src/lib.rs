#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/testcase-reader/main/assets/testcase-reader.svg",
    issue_tracker_base_url = "https://github.com/storyscript/testcase-reader/issues/"
)]

//! Reader for composite compiler test case files.
//!
//! A test case is a single text file holding one or more source units, an
//! optional block of settings and the expected output:
//!
//! ```text
//! ==== Source: a.sol ====
//! contract A {}
//! ==== Source: b.sol ====
//! import "a.sol";
//! contract B is A {}
//! // ====
//! // SMTTargets: overflow,underflow
//! // ----
//! // Warning 6328: (60-74): CHC: Assertion violation happens here.
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Line classification and the source/settings state machine
//! - [`external`] - `ExternalSource` sections read from neighbouring files
//! - [`imports`] - Import extraction seam used by external sources
//! - [`settings`] - Raw settings and consumption-tracked typed access
//! - [`expectations`] - The trailing expectations block
//! - [`reader`] - [`TestCaseReader`], tying the pieces together
//! - [`config`] - Reader configuration from TOML
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use testcase_reader::{ReaderConfig, TestCaseReader};
//!
//! let text = "contract C {}\n// ====\n// optimize: true\n// ----\n// ok\n";
//! let mut reader = TestCaseReader::from_text(text, ReaderConfig::default()).unwrap();
//!
//! assert_eq!(reader.source().unwrap(), "contract C {}\n");
//! assert!(reader.bool_setting("optimize", false).unwrap());
//! reader.ensure_all_settings_read().unwrap();
//! assert_eq!(reader.simple_expectations().unwrap(), "ok\n");
//! ```
//!
//! Setting values with their own grammar (verification targets, grouped
//! contract names) are parsed by the `verification-targets` crate.

pub mod config;
pub mod document;
pub mod errors;
pub mod expectations;
pub mod external;
pub mod imports;
pub mod parser;
pub mod reader;
pub mod settings;

pub use config::ReaderConfig;
pub use document::{ParsedDocument, SourceMap};
pub use errors::{ReaderError, ReaderResult};
pub use expectations::parse_expectations;
pub use external::ExternalSourceResolver;
pub use imports::{ImportExtractor, NoImports, QuotedImports};
pub use parser::{classify_line, parse_document, DocumentParser, LineKind, ParserState};
pub use reader::TestCaseReader;
pub use settings::{Settings, SettingsStore};

pub use verification_targets::{
    GroupedNameSet, SettingValueError, TargetSet, VerificationTarget,
};

#[cfg(test)]
mod tests;
