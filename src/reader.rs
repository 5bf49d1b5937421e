//! Test case reader: one document, read front to back.
//!
//! Sources and settings are parsed when the reader is created. Settings are
//! then read through typed accessors, and the expectations block is read on
//! demand from the rest of the stream.

use crate::config::ReaderConfig;
use crate::document::{ParsedDocument, SourceMap};
use crate::errors::{ReaderError, ReaderResult};
use crate::expectations::parse_expectations;
use crate::imports::{ImportExtractor, QuotedImports};
use crate::parser::DocumentParser;
use crate::settings::{Settings, SettingsStore};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use verification_targets::{GroupedNameSet, TargetSet};

/// A parsed test case document plus the unread remainder of its stream.
pub struct TestCaseReader<R> {
    stream: R,
    file_name: Option<PathBuf>,
    sources: SourceMap,
    line_number: usize,
    settings: SettingsStore,
    config: ReaderConfig,
}

impl TestCaseReader<BufReader<File>> {
    /// Open and parse a test case file.
    pub fn open(path: impl AsRef<Path>, config: ReaderConfig) -> ReaderResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ReaderError::io(path, format!("cannot open file: {}", e))
        })?;
        Self::from_reader(BufReader::new(file), Some(path.to_path_buf()), config, &QuotedImports)
    }
}

impl TestCaseReader<Cursor<String>> {
    /// Parse an in-memory test case. External sources are not available.
    pub fn from_text(text: impl Into<String>, config: ReaderConfig) -> ReaderResult<Self> {
        Self::from_reader(Cursor::new(text.into()), None, config, &QuotedImports)
    }
}

impl<R: BufRead> TestCaseReader<R> {
    /// Parse sources and settings from `stream`.
    ///
    /// `file_name` is the document's path, used to locate external sources.
    pub fn from_reader(
        mut stream: R,
        file_name: Option<PathBuf>,
        config: ReaderConfig,
        imports: &dyn ImportExtractor,
    ) -> ReaderResult<Self> {
        let mut parser = DocumentParser::new(imports).follow_imports(config.follow_imports);
        if let Some(path) = &file_name {
            parser = parser.with_origin(path);
        }
        let ParsedDocument {
            sources,
            settings,
            line_number,
        } = parser.parse(&mut stream)?;

        Ok(Self {
            stream,
            file_name,
            sources,
            line_number,
            settings: SettingsStore::new(settings),
            config,
        })
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The only source of a single-source test case.
    pub fn source(&self) -> ReaderResult<&str> {
        if self.sources.len() != 1 {
            return Err(ReaderError::format(format!(
                "expected single source definition, but got {} sources",
                self.sources.len()
            )));
        }
        self.sources
            .main_source()
            .ok_or_else(|| ReaderError::format("main source is missing"))
    }

    /// 1-based number of the first line after the sources and settings.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Raw settings, read or not.
    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn bool_setting(&mut self, name: &str, default: bool) -> ReaderResult<bool> {
        self.settings.get_bool(name, default)
    }

    pub fn size_setting(&mut self, name: &str, default: usize) -> ReaderResult<usize> {
        self.settings.get_size(name, default)
    }

    pub fn string_setting(&mut self, name: &str, default: &str) -> String {
        self.settings.get_string(name, default)
    }

    /// Read a setting as a list of verification targets. `default` is the
    /// raw value used when the setting is absent.
    pub fn target_setting(&mut self, name: &str, default: &str) -> ReaderResult<TargetSet> {
        let value = self.settings.get_string(name, default);
        Ok(TargetSet::from_setting(&value)?)
    }

    /// Read a setting as grouped `source:contract` names. A `default` value
    /// resolves to the configured default contracts.
    pub fn contracts_setting(&mut self, name: &str, default: &str) -> ReaderResult<GroupedNameSet> {
        let value = self.settings.get_string(name, default);
        let config = &self.config;
        Ok(GroupedNameSet::from_setting(&value, || config.contracts_default())?)
    }

    /// Fail if the test case declares settings nobody read.
    pub fn ensure_all_settings_read(&self) -> ReaderResult<()> {
        self.settings.ensure_all_read()
    }

    /// Read the expectations block. The stream is exhausted afterwards.
    pub fn simple_expectations(&mut self) -> ReaderResult<String> {
        parse_expectations(&mut self.stream, self.line_number)
    }
}
