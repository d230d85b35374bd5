//! Edge-list text records: one `<from>, <to>, <distance>` triple per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::EdgeRecord;

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
///
/// `line_no` is 1-based and only used for error reporting. Negative distances
/// are accepted here; [`Graph::from_edges`](crate::Graph::from_edges) rejects them.
pub fn parse_edge_line(line: &str, line_no: usize) -> Result<Option<EdgeRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: String| Error::MalformedInput {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let [from, to, distance] = fields[..] else {
        return Err(malformed(format!("expected 3 fields, found {}", fields.len())));
    };

    if from.is_empty() || to.is_empty() {
        return Err(malformed("town label is empty".to_string()));
    }
    let distance: i64 = distance
        .parse()
        .map_err(|_| malformed(format!("distance '{}' is not an integer", distance)))?;

    Ok(Some(EdgeRecord::new(from, to, distance)))
}

/// Parse every line of `reader`, stopping at the first malformed one.
pub fn parse_edges<R: BufRead>(reader: R) -> Result<Vec<EdgeRecord>> {
    let mut edges = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(edge) = parse_edge_line(&line, i + 1)? {
            edges.push(edge);
        }
    }
    tracing::debug!(edges = edges.len(), "parsed edge records");
    Ok(edges)
}

/// Read and parse an edge-list file.
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<EdgeRecord>> {
    let file = File::open(path.as_ref())?;
    parse_edges(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_line() {
        let edge = parse_edge_line("A, B, 5", 1).unwrap().unwrap();
        assert_eq!(edge, EdgeRecord::new("A", "B", 5));
    }

    #[test]
    fn test_parse_line_whitespace() {
        let edge = parse_edge_line("  Alpha ,Beta,  12  ", 1).unwrap().unwrap();
        assert_eq!(edge, EdgeRecord::new("Alpha", "Beta", 12));
    }

    #[test]
    fn test_parse_blank_and_comment() {
        assert!(parse_edge_line("", 1).unwrap().is_none());
        assert!(parse_edge_line("   ", 2).unwrap().is_none());
        assert!(parse_edge_line("# towns", 3).unwrap().is_none());
    }

    #[test]
    fn test_parse_wrong_field_count() {
        match parse_edge_line("A, B", 7) {
            Err(Error::MalformedInput { line, reason }) => {
                assert_eq!(line, 7);
                assert!(reason.contains("found 2"));
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
        assert!(matches!(
            parse_edge_line("A, B, 5, 6", 1),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_parse_bad_distance() {
        assert!(matches!(
            parse_edge_line("A, B, five", 4),
            Err(Error::MalformedInput { line: 4, .. })
        ));
        assert!(matches!(
            parse_edge_line("A, B, 2.5", 4),
            Err(Error::MalformedInput { line: 4, .. })
        ));
    }

    #[test]
    fn test_parse_empty_label() {
        assert!(matches!(
            parse_edge_line(" , B, 5", 1),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_parse_negative_distance_passes_through() {
        let edge = parse_edge_line("A, B, -3", 1).unwrap().unwrap();
        assert_eq!(edge.distance, -3);
    }

    #[test]
    fn test_parse_edges_line_numbers() {
        let input = "A, B, 5\n\nB, C, 4\nC, D\n";
        match parse_edges(Cursor::new(input)) {
            Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_edges_skips_blank_lines() {
        let input = "# network\nA, B, 5\n\nB, C, 4\n";
        let edges = parse_edges(Cursor::new(input)).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1], EdgeRecord::new("B", "C", 4));
    }

    #[test]
    fn test_load_edges_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A, B, 5").unwrap();
        writeln!(file, "B, C, 4").unwrap();
        let edges = load_edges(file.path()).unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_load_edges_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_edges(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
