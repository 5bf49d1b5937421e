//! Parser for the source and settings sections of a test case document.
//!
//! A document is a sequence of source sections, an optional settings block
//! and an optional expectations block:
//!
//! ```text
//! ==== Source: a.sol ====
//! contract A {}
//! ==== ExternalSource: lib=_external/lib.sol ====
//! ==== Source: b.sol ====
//! import "a.sol";
//! contract B is A {}
//! // ====
//! // optimize: true
//! // ----
//! // expected output
//! ```
//!
//! Parsing stops at the `// ----` line; the rest of the stream is left for
//! [`parse_expectations`](crate::parse_expectations).

use crate::document::{ParsedDocument, SourceMap};
use crate::errors::{ReaderError, ReaderResult};
use crate::external::ExternalSourceResolver;
use crate::imports::{ImportExtractor, QuotedImports};
use crate::settings::Settings;
use std::collections::BTreeMap;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXPECTATIONS_DELIMITER: &str = "// ----";
const SETTINGS_DELIMITER: &str = "// ====";
const SOURCE_START: &str = "==== Source:";
const EXTERNAL_SOURCE_START: &str = "==== ExternalSource:";
const SECTION_END: &str = "====";
const COMMENT: &str = "// ";

/// Which part of the document is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    InSources,
    InSettings,
    Done,
}

/// Classification of a single document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `// ----`: start of expectations, end of the document proper.
    ExpectationsDelimiter,
    /// `// ====`: start of the settings block.
    SettingsDelimiter,
    /// `==== Source: name ====`, carrying the trimmed name.
    NamedSource(&'a str),
    /// `==== ExternalSource: payload ====`, carrying the trimmed payload.
    ExternalSource(&'a str),
    /// Anything else.
    Other(&'a str),
}

/// Classify a line by prefix/suffix match, delimiters first.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with(EXPECTATIONS_DELIMITER) {
        LineKind::ExpectationsDelimiter
    } else if line.starts_with(SETTINGS_DELIMITER) {
        LineKind::SettingsDelimiter
    } else if let Some(name) = section_payload(line, SOURCE_START) {
        LineKind::NamedSource(name)
    } else if let Some(payload) = section_payload(line, EXTERNAL_SOURCE_START) {
        LineKind::ExternalSource(payload)
    } else {
        LineKind::Other(line)
    }
}

fn section_payload<'a>(line: &'a str, start: &str) -> Option<&'a str> {
    line.strip_prefix(start)
        .and_then(|rest| rest.strip_suffix(SECTION_END))
        .map(str::trim)
}

/// Parse a document with the default import extractor.
///
/// `origin` is the document's own path. It is only needed to locate external
/// sources; documents without external sources can pass `None`.
pub fn parse_document<R: BufRead>(reader: &mut R, origin: Option<&Path>) -> ReaderResult<ParsedDocument> {
    let parser = match origin {
        Some(path) => DocumentParser::new(&QuotedImports).with_origin(path),
        None => DocumentParser::new(&QuotedImports),
    };
    parser.parse(reader)
}

/// Configurable document parser.
pub struct DocumentParser<'a> {
    origin: Option<&'a Path>,
    imports: &'a dyn ImportExtractor,
    follow_imports: bool,
}

impl<'a> DocumentParser<'a> {
    /// Parser without an origin; `imports` lists imports of external sources.
    pub fn new(imports: &'a dyn ImportExtractor) -> Self {
        Self {
            origin: None,
            imports,
            follow_imports: true,
        }
    }

    /// Path of the document, used to resolve external sources.
    pub fn with_origin(mut self, origin: &'a Path) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Whether external sources pull in their direct imports.
    pub fn follow_imports(mut self, follow: bool) -> Self {
        self.follow_imports = follow;
        self
    }

    /// Consume lines up to and including the expectations delimiter.
    ///
    /// On error nothing is returned; the reader may have been partially
    /// consumed.
    pub fn parse<R: BufRead>(&self, reader: &mut R) -> ReaderResult<ParsedDocument> {
        let mut sources: BTreeMap<String, String> = BTreeMap::new();
        let mut settings = Settings::default();
        let mut current_name = String::new();
        let mut current_source = String::new();
        let mut line_number = 1;
        let mut state = ParserState::InSources;

        let mut lines = reader.by_ref().lines();
        while state != ParserState::Done {
            let line = match lines.next() {
                Some(line) => line.map_err(|e| ReaderError::io(self.origin_display(), e))?,
                None => break,
            };
            let line_no = line_number;
            line_number += 1;

            match (state, classify_line(&line)) {
                (_, LineKind::ExpectationsDelimiter) => state = ParserState::Done,
                (_, LineKind::SettingsDelimiter) => {
                    debug!(line = line_no, "entering settings block");
                    state = ParserState::InSettings;
                }
                (ParserState::InSources, LineKind::NamedSource(name)) => {
                    if !(current_name.is_empty() && current_source.is_empty()) {
                        sources.insert(
                            std::mem::take(&mut current_name),
                            std::mem::take(&mut current_source),
                        );
                    }
                    current_source.clear();
                    current_name = name.to_string();
                    if sources.contains_key(&current_name) {
                        return Err(ReaderError::parse(
                            line_no,
                            format!("multiple definitions of test source \"{}\"", current_name),
                        ));
                    }
                    debug!(name = %current_name, line = line_no, "source section");
                }
                (ParserState::InSources, LineKind::ExternalSource(payload)) => {
                    let base_dir = self.document_dir()?;
                    let resolved = ExternalSourceResolver::new(&base_dir, self.imports)
                        .follow_imports(self.follow_imports)
                        .resolve(payload, line_no)?;
                    sources.extend(resolved);
                }
                (ParserState::InSources, LineKind::Other(text)) => {
                    current_source.push_str(text);
                    current_source.push('\n');
                }
                // InSettings; the loop exits before Done gets here.
                _ => parse_setting_line(&line, line_no, &mut settings)?,
            }
        }

        // The last section is the main one.
        sources.insert(current_name.clone(), current_source);
        debug!(?state, sources = sources.len(), settings = settings.len(), "document parsed");

        Ok(ParsedDocument {
            sources: SourceMap {
                sources,
                main_source_name: current_name,
            },
            settings,
            line_number,
        })
    }

    fn document_dir(&self) -> ReaderResult<PathBuf> {
        let origin = self.origin.ok_or_else(|| {
            ReaderError::io("<memory>", "external sources require a file-backed document")
        })?;
        let canonical = fs::canonicalize(origin).map_err(|e| ReaderError::io(origin, e))?;
        Ok(canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default())
    }

    fn origin_display(&self) -> &Path {
        self.origin.unwrap_or_else(|| Path::new("<memory>"))
    }
}

/// Parse `// key: value` into `settings`.
fn parse_setting_line(line: &str, line_no: usize, settings: &mut Settings) -> ReaderResult<()> {
    let body = line.strip_prefix(COMMENT).ok_or_else(|| {
        ReaderError::parse(
            line_no,
            "expected \"//\" or \"// ----\" to terminate settings and source",
        )
    })?;
    let (key, value) = body
        .split_once(':')
        .ok_or_else(|| ReaderError::parse(line_no, "expected \":\" inside setting"))?;
    settings.insert(key.trim(), value.trim());
    Ok(())
}
