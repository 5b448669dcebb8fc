use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use tracing::{event, span, Level};

use crate::error::LightshowError;
use crate::grid::{AdditiveGrid, BinaryGrid, LightGrid};
use crate::input::read_input;
use crate::instruction::{parse_instructions, Instruction};

pub const DEFAULT_GRID_SIZE: usize = 1000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Variant {
    /// System 1: lights are on or off.
    #[default]
    Binary,
    /// System 2: lights have a brightness.
    Additive,
}

impl Variant {
    pub fn system_number(&self) -> u8 {
        match self {
            Variant::Binary => 1,
            Variant::Additive => 2,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "System {}", self.system_number())
    }
}

impl FromStr for Variant {
    type Err = LightshowError;
    fn from_str(s: &str) -> Result<Variant, LightshowError> {
        match s {
            "1" | "binary" => Ok(Variant::Binary),
            "2" | "additive" => Ok(Variant::Additive),
            _ => Err(LightshowError::UnknownSystem(s.to_string())),
        }
    }
}

/// Applies the instructions strictly in order and returns the grid's total.
pub fn run_show<G: LightGrid>(grid: &mut G, instructions: &[Instruction]) -> u64 {
    for instruction in instructions {
        event!(
            Level::TRACE,
            "obeying '{}' ({} lights)",
            instruction,
            instruction.area()
        );
        grid.obey(instruction);
    }
    grid.total()
}

pub fn run(variant: Variant, grid_size: usize, instructions: &[Instruction]) -> u64 {
    let span = span!(Level::ERROR, "run", system = %variant, grid_size = grid_size);
    let _enter = span.enter();
    let total = match variant {
        Variant::Binary => run_show(&mut BinaryGrid::new(grid_size), instructions),
        Variant::Additive => run_show(&mut AdditiveGrid::new(grid_size), instructions),
    };
    event!(
        Level::DEBUG,
        "{} instructions applied, total is {}",
        instructions.len(),
        total
    );
    total
}

/// Reads, parses and runs a whole input file.  Nothing is applied to
/// the grid unless every line parses.
pub fn run_file(path: &Path, variant: Variant, grid_size: usize) -> Result<u64, LightshowError> {
    let lines = read_input(path)?;
    let instructions = parse_instructions(&lines, grid_size)?;
    Ok(run(variant, grid_size, &instructions))
}
