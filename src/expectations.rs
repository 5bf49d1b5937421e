//! Reader for the trailing expectations block.

use crate::errors::{ReaderError, ReaderResult};
use std::io::BufRead;

/// Collect comment-prefixed expectation lines until the end of the stream.
///
/// `// text` contributes `text`, a bare `//` contributes an empty line.
/// `first_line` is the 1-based document line of the first line in `reader`
/// and is only used for error positions.
pub fn parse_expectations<R: BufRead>(reader: &mut R, first_line: usize) -> ReaderResult<String> {
    let mut expected = String::new();

    for (offset, line) in reader.lines().enumerate() {
        let line_no = first_line + offset;
        let line = line.map_err(|e| ReaderError::io("<expectations>", e))?;

        if let Some(text) = line.strip_prefix("// ") {
            expected.push_str(text);
            expected.push('\n');
        } else if line == "//" {
            expected.push('\n');
        } else {
            return Err(ReaderError::parse(
                line_no,
                "test expectations must start with \"// \"",
            ));
        }
    }

    Ok(expected)
}
