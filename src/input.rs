use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;

use tracing::{event, Level};

use crate::error::LightshowError;

/// Splits each non-blank line into whitespace-separated tokens.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>, LightshowError> {
    let mut lines: Vec<Vec<String>> = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(LightshowError::Io)?;
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if !tokens.is_empty() {
            lines.push(tokens);
        }
    }
    Ok(lines)
}

/// Reads instruction tokens from a file, or from stdin if `path` is "-".
pub fn read_input(path: &Path) -> Result<Vec<Vec<String>>, LightshowError> {
    if path == Path::new("-") {
        return read_tokens(io::stdin().lock());
    }
    match File::open(path) {
        Ok(f) => read_tokens(io::BufReader::new(f)),
        Err(e) => {
            event!(Level::ERROR, "cannot open {}: {}", path.display(), e);
            Err(LightshowError::Io(e))
        }
    }
}

#[test]
fn test_read_tokens_skips_blank_lines() {
    let text = "turn on 0,0 through 1,1\n\n   \n\ttoggle  2,2   through 3,3\n";
    let lines = read_tokens(text.as_bytes()).unwrap();
    assert_eq!(
        lines,
        vec![
            vec!["turn", "on", "0,0", "through", "1,1"],
            vec!["toggle", "2,2", "through", "3,3"],
        ]
    );
}

#[test]
fn test_read_tokens_keeps_split_coordinates_apart() {
    let lines = read_tokens("turn on 0,0 through 999, 999".as_bytes()).unwrap();
    assert_eq!(lines[0].len(), 6);
}

#[test]
fn test_missing_file() {
    match read_input(Path::new("/nonexistent/lightshow/input.txt")) {
        Err(LightshowError::Io(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_read_sample_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_input.txt");
    let lines = read_input(&path).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2][0], "turn");
}
