//! Import extraction for external sources.
//!
//! Reading the import statements of a source unit belongs to the language
//! front-end. The reader only needs the ordered list of import paths, so it
//! takes any [`ImportExtractor`] and ships two small ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lists the import paths declared in a piece of source text, in order.
pub trait ImportExtractor {
    fn imports(&self, source: &str) -> Vec<String>;
}

/// Extractor that never reports an import.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImports;

impl ImportExtractor for NoImports {
    fn imports(&self, _source: &str) -> Vec<String> {
        Vec::new()
    }
}

// import "p";  import "p" as x;  import * as x from "p";  import {a, b as c} from "p";
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+(?:[^;"']*?\bfrom\s+)?["']([^"']+)["']"#)
        .expect("Invalid import regex")
});

/// Extractor for quoted-path import statements.
///
/// Recognizes the statement forms used by test sources and nothing more.
/// It does not skip comments or string literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedImports;

impl ImportExtractor for QuotedImports {
    fn imports(&self, source: &str) -> Vec<String> {
        IMPORT_RE
            .captures_iter(source)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl<F> ImportExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn imports(&self, source: &str) -> Vec<String> {
        self(source)
    }
}
