//! Telemetry file header skipping.
//!
//! Daily TNK1A files carry one of two preamble conventions: a short
//! single-line form whose first token starts with `tSDS`, or a multi-line
//! YAML header terminated by an exact `# End of YAML header` line. This
//! module strips whichever form is present and returns the data lines.

use crate::constants::{SHORT_HEADER_MARKER, YAML_HEADER_TERMINATOR};
use crate::error::{Result, TankError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Open a telemetry file and return its data lines with the header removed.
pub fn read_data_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let lines = skip_header(BufReader::new(file), path)?;
    debug!("{}: {} data lines after header", path.display(), lines.len());
    Ok(lines)
}

/// Strip the variable-form header from a readable source.
///
/// If the first line starts with the `tSDS` marker, exactly that one line is
/// discarded and every following line is data. Otherwise lines are discarded
/// up to and including the exact YAML terminator line; reaching end of input
/// without finding it is a [`TankError::MalformedHeader`] (the alternative,
/// silently returning an empty file, would make a truncated header
/// indistinguishable from an empty day).
pub fn skip_header<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>> {
    let mut lines = reader.lines();

    let first = match lines.next() {
        Some(line) => line?,
        // An empty source has neither header nor data.
        None => {
            return Err(TankError::MalformedHeader {
                path: path.to_path_buf(),
            })
        }
    };

    if !first.trim_start().starts_with(SHORT_HEADER_MARKER) {
        let mut terminated = first.trim() == YAML_HEADER_TERMINATOR;
        while !terminated {
            match lines.next() {
                Some(line) => terminated = line?.trim() == YAML_HEADER_TERMINATOR,
                None => break,
            }
        }
        if !terminated {
            return Err(TankError::MalformedHeader {
                path: path.to_path_buf(),
            });
        }
    }

    lines.collect::<std::io::Result<Vec<String>>>().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn skip(text: &str) -> Result<Vec<String>> {
        skip_header(Cursor::new(text), Path::new("test.txt"))
    }

    #[test]
    fn test_short_header_form_discards_one_line() {
        let text = "tSDS-1A telemetry v04\n1.0 2.0\n3.0 4.0\n";
        let lines = skip(text).unwrap();
        assert_eq!(lines, vec!["1.0 2.0", "3.0 4.0"]);
    }

    #[test]
    fn test_yaml_header_form_discards_through_terminator() {
        let text = "header:\n  producer: JPL\n# End of YAML header\n1.0 2.0\n3.0 4.0\n";
        let lines = skip(text).unwrap();
        assert_eq!(lines, vec!["1.0 2.0", "3.0 4.0"]);
    }

    #[test]
    fn test_terminator_match_tolerates_surrounding_whitespace() {
        let text = "header:\n  # End of YAML header \ndata line\n";
        let lines = skip(text).unwrap();
        assert_eq!(lines, vec!["data line"]);
    }

    #[test]
    fn test_missing_terminator_is_malformed() {
        let text = "header:\n  producer: JPL\n1.0 2.0\n";
        let err = skip(text).unwrap_err();
        assert!(matches!(err, TankError::MalformedHeader { .. }));
    }

    #[test]
    fn test_empty_source_is_malformed() {
        let err = skip("").unwrap_err();
        assert!(matches!(err, TankError::MalformedHeader { .. }));
    }

    #[test]
    fn test_data_after_terminator_only() {
        let text = "# End of YAML header\nonly data\n";
        let lines = skip(text).unwrap();
        assert_eq!(lines, vec!["only data"]);
    }
}
