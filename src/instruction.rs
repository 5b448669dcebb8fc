use std::cmp::{max, min};
use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use nom::{
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{separated_pair, tuple},
    IResult,
};
use tracing::{event, Level};

use crate::error::LightshowError;

const TURN_GRAMMAR: &str = "turn <off/on> <int>,<int> through <int>,<int>";
const TOGGLE_GRAMMAR: &str = "toggle <int>,<int> through <int>,<int>";
const ANY_GRAMMAR: &str =
    "turn <off/on> <int>,<int> through <int>,<int>' or 'toggle <int>,<int> through <int>,<int>";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    TurnOn,
    TurnOff,
    Toggle,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::TurnOn => "turn on",
            OperationKind::TurnOff => "turn off",
            OperationKind::Toggle => "toggle",
        })
    }
}

/// One parsed command.  Both ranges are inclusive and normalised so
/// that `start() <= end()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: OperationKind,
    pub i_range: RangeInclusive<usize>,
    pub j_range: RangeInclusive<usize>,
}

impl Instruction {
    pub fn new(
        kind: OperationKind,
        i_range: RangeInclusive<usize>,
        j_range: RangeInclusive<usize>,
    ) -> Instruction {
        Instruction {
            kind,
            i_range: normalise(*i_range.start(), *i_range.end()),
            j_range: normalise(*j_range.start(), *j_range.end()),
        }
    }

    /// Number of cells the instruction touches.
    pub fn area(&self) -> usize {
        (self.i_range.end() - self.i_range.start() + 1)
            * (self.j_range.end() - self.j_range.start() + 1)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {},{} through {},{}",
            self.kind,
            self.i_range.start(),
            self.j_range.start(),
            self.i_range.end(),
            self.j_range.end()
        )
    }
}

fn normalise(a: usize, b: usize) -> RangeInclusive<usize> {
    min(a, b)..=max(a, b)
}

fn i64_parser(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(tuple((opt(one_of("+-")), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_corner(input: &str) -> IResult<&str, (i64, i64)> {
    all_consuming(separated_pair(i64_parser, char(','), i64_parser))(input)
}

fn format_error(tokens: &[String], expected: &'static str) -> LightshowError {
    LightshowError::Format {
        tokens: tokens.to_vec(),
        expected,
    }
}

fn looks_like_corner(token: &str) -> bool {
    token.contains(',')
}

fn in_grid(value: i64, grid_size: usize) -> Result<usize, LightshowError> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v < grid_size)
        .ok_or(LightshowError::Coordinate)
}

fn corner(token: &str, grid_size: usize) -> Result<(usize, usize), LightshowError> {
    match parse_corner(token) {
        Ok((_, (x, y))) => Ok((in_grid(x, grid_size)?, in_grid(y, grid_size)?)),
        Err(_) => Err(LightshowError::Coordinate),
    }
}

/// Checks the shape of a line and picks out the operation and the
/// two corner tokens.  Values inside the corners are not examined.
fn classify(tokens: &[String]) -> Result<(OperationKind, &str, &str), LightshowError> {
    match tokens.first().map(String::as_str) {
        Some("turn") => match tokens {
            [_, state, from, through, to]
                if through == "through" && looks_like_corner(from) && looks_like_corner(to) =>
            {
                match state.as_str() {
                    "on" => Ok((OperationKind::TurnOn, from.as_str(), to.as_str())),
                    "off" => Ok((OperationKind::TurnOff, from.as_str(), to.as_str())),
                    _ => Err(format_error(tokens, TURN_GRAMMAR)),
                }
            }
            _ => Err(format_error(tokens, TURN_GRAMMAR)),
        },
        Some("toggle") => match tokens {
            [_, from, through, to]
                if through == "through" && looks_like_corner(from) && looks_like_corner(to) =>
            {
                Ok((OperationKind::Toggle, from.as_str(), to.as_str()))
            }
            _ => Err(format_error(tokens, TOGGLE_GRAMMAR)),
        },
        _ => Err(format_error(tokens, ANY_GRAMMAR)),
    }
}

/// Parses a single whitespace-split line.  Structural problems are
/// reported in preference to bad coordinate values.
pub fn parse_instruction(
    tokens: &[String],
    grid_size: usize,
) -> Result<Instruction, LightshowError> {
    let (kind, from, to) = classify(tokens)?;
    let (x_start, y_start) = corner(from, grid_size)?;
    let (x_end, y_end) = corner(to, grid_size)?;
    Ok(Instruction::new(kind, x_start..=x_end, y_start..=y_end))
}

/// Parses every line, stopping at the first failure.  On failure no
/// instructions are returned at all.
pub fn parse_instructions(
    lines: &[Vec<String>],
    grid_size: usize,
) -> Result<Vec<Instruction>, LightshowError> {
    let result: Result<Vec<Instruction>, LightshowError> = lines
        .iter()
        .enumerate()
        .map(|(n, tokens)| {
            parse_instruction(tokens, grid_size).map_err(|e| {
                event!(Level::DEBUG, "instruction {} is invalid: {}", n + 1, e);
                e
            })
        })
        .collect();
    if let Ok(instructions) = result.as_ref() {
        event!(
            Level::DEBUG,
            "parsed {} instructions for a {}x{} grid",
            instructions.len(),
            grid_size,
            grid_size,
        );
    }
    result
}

#[cfg(test)]
fn tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
fn parse_line(line: &str) -> Result<Instruction, LightshowError> {
    parse_instruction(&tokens(line), 1000)
}

#[test]
fn test_parse_each_command() {
    assert_eq!(
        parse_line("turn on 0,0 through 999,999").unwrap(),
        Instruction::new(OperationKind::TurnOn, 0..=999, 0..=999)
    );
    assert_eq!(
        parse_line("turn off 499,499 through 500,500").unwrap(),
        Instruction::new(OperationKind::TurnOff, 499..=500, 499..=500)
    );
    assert_eq!(
        parse_line("toggle 0,0 through 999,0").unwrap(),
        Instruction::new(OperationKind::Toggle, 0..=999, 0..=0)
    );
}

#[test]
fn test_parse_normalises_corners() {
    let inst = parse_line("toggle 7,2 through 3,9").unwrap();
    assert_eq!(inst.i_range, 3..=7);
    assert_eq!(inst.j_range, 2..=9);
    assert_eq!(inst.area(), 5 * 8);
    assert_eq!(inst.to_string(), "toggle 3,2 through 7,9");
}

#[test]
fn test_explicit_plus_sign() {
    assert_eq!(
        parse_line("toggle +5,0 through 6,+0").unwrap(),
        Instruction::new(OperationKind::Toggle, 5..=6, 0..=0)
    );
    assert!(matches!(
        parse_line("toggle +-5,0 through 6,0"),
        Err(LightshowError::Coordinate)
    ));
}

#[test]
fn test_single_cell() {
    let inst = parse_line("turn on 5,5 through 5,5").unwrap();
    assert_eq!(inst.area(), 1);
}

#[test]
fn test_split_coordinate_is_format_error() {
    match parse_line("turn on 0,0 through 999, 999") {
        Err(LightshowError::Format { tokens, expected }) => {
            assert_eq!(tokens.len(), 6);
            assert_eq!(expected, TURN_GRAMMAR);
        }
        other => panic!("expected a format error, got {:?}", other),
    }
    let msg = parse_line("turn on 0,0 through 999, 999")
        .unwrap_err()
        .to_string();
    assert_eq!(
        msg,
        "command [\"turn\", \"on\", \"0,0\", \"through\", \"999,\", \"999\"] is invalid. \
         Please check if the command strictly follows \
         'turn <off/on> <int>,<int> through <int>,<int>' format, \
         with no space between each <int>,<int> coordinate pair."
    );
}

#[test]
fn test_trailing_empty_component_is_coordinate_error() {
    assert!(matches!(
        parse_line("turn on 0,0 through 999,"),
        Err(LightshowError::Coordinate)
    ));
}

#[test]
fn test_structural_errors() {
    for line in [
        "turn up 0,0 through 1,1",
        "turn on 0,0 to 1,1",
        "turn on 0,0 through 1;1",
        "turn on 00 through 1,1",
        "turn 0,0 through 1,1",
        "toggle 0,0 through",
        "toggle 0,0 1,1 through",
        "toggle 0 through 1,1",
        "Toggle 0,0 through 1,1",
        "switch 0,0 through 1,1",
    ] {
        assert!(
            matches!(parse_line(line), Err(LightshowError::Format { .. })),
            "{} should be a format error",
            line
        );
    }
}

#[test]
fn test_structure_checked_before_range() {
    // Both out of range and missing "through".
    assert!(matches!(
        parse_line("toggle 5000,0 via 5000,0"),
        Err(LightshowError::Format { .. })
    ));
}

#[test]
fn test_coordinate_errors() {
    for line in [
        "toggle 1000,0 through 1000,0",
        "toggle 0,0 through 0,1000",
        "toggle -1,0 through 0,0",
        "toggle 1,2,3 through 0,0",
        "toggle a,0 through 0,0",
        "toggle 0,0 through 0,1.5",
        "turn off 0,0 through 99999999999999999999,0",
    ] {
        assert!(
            matches!(parse_line(line), Err(LightshowError::Coordinate)),
            "{} should be a coordinate error",
            line
        );
    }
}

#[test]
fn test_coordinate_error_message_is_stable() {
    let a = parse_line("toggle 1000,0 through 1000,0").unwrap_err().to_string();
    let b = parse_line("toggle 0,x through 0,0").unwrap_err().to_string();
    assert_eq!(a, b);
    assert!(!a.contains("1000"));
}

#[test]
fn test_grid_size_bounds_coordinates() {
    assert!(parse_instruction(&tokens("toggle 9,9 through 9,9"), 10).is_ok());
    assert!(matches!(
        parse_instruction(&tokens("toggle 10,9 through 9,9"), 10),
        Err(LightshowError::Coordinate)
    ));
}

#[test]
fn test_parse_stops_at_first_bad_line() {
    let lines: Vec<Vec<String>> = [
        "turn on 0,0 through 1,1",
        "toggle 0,0 through 1000,0",
        "flip 0,0 through 1,1",
    ]
    .iter()
    .map(|line| tokens(line))
    .collect();
    // Line 2 fails first, so line 3's format error is never seen.
    assert!(matches!(
        parse_instructions(&lines, 1000),
        Err(LightshowError::Coordinate)
    ));
}

#[test]
fn test_parse_is_deterministic() {
    let lines: Vec<Vec<String>> = include_str!("../data/sample_input.txt")
        .lines()
        .map(tokens)
        .filter(|t| !t.is_empty())
        .collect();
    let expected = vec![
        Instruction::new(OperationKind::TurnOn, 0..=999, 0..=999),
        Instruction::new(OperationKind::Toggle, 0..=999, 0..=0),
        Instruction::new(OperationKind::TurnOff, 499..=500, 499..=500),
    ];
    assert_eq!(parse_instructions(&lines, 1000).unwrap(), expected);
    assert_eq!(parse_instructions(&lines, 1000).unwrap(), expected);
}
