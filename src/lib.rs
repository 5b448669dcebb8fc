//! Simulates a square grid of lights driven by rectangular
//! "turn on", "turn off" and "toggle" instructions.
//!
//! Two lighting systems are supported.  In system 1 ([`BinaryGrid`])
//! each light is simply on or off and the result is the number of lit
//! lights.  In system 2 ([`AdditiveGrid`]) each light has a brightness
//! and the result is the total brightness.

mod error;
mod grid;
mod input;
mod instruction;
mod show;

pub use error::LightshowError;
pub use grid::{AdditiveGrid, BinaryGrid, LightGrid};
pub use input::{read_input, read_tokens};
pub use instruction::{parse_instruction, parse_instructions, Instruction, OperationKind};
pub use show::{run, run_file, run_show, Variant, DEFAULT_GRID_SIZE};
