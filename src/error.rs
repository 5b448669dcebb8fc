use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LightshowError {
    #[error(
        "command {tokens:?} is invalid. Please check if the command strictly follows \
         '{expected}' format, with no space between each <int>,<int> coordinate pair."
    )]
    Format {
        tokens: Vec<String>,
        expected: &'static str,
    },

    #[error(
        "Parsing coordinates failed. Please check the coordinate design \
         (comma delimiter and valid literal pairs for int conversion)."
    )]
    Coordinate,

    #[error(
        "Input data is unavailable. Please check the file path is correct \
         and the content is written line-by-line in text format."
    )]
    Io(#[source] io::Error),

    #[error("unknown lighting system '{0}': expected 1 (binary) or 2 (additive)")]
    UnknownSystem(String),
}
