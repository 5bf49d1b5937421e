//! Core types produced by parsing a test case document.

use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named source snippets of a test case, with one of them designated main.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    /// Source name to source text. The empty name holds an unnamed source.
    pub sources: BTreeMap<String, String>,
    /// Name of the last source section in document order
    pub main_source_name: String,
}

impl SourceMap {
    /// Text of the main source.
    pub fn main_source(&self) -> Option<&str> {
        self.get(&self.main_source_name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Everything read from a document up to the expectations delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub sources: SourceMap,
    pub settings: Settings,
    /// One past the number of lines consumed, i.e. the 1-based number of
    /// the first line not yet read.
    pub line_number: usize,
}
