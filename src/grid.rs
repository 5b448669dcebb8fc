use std::ops::RangeInclusive;

use ndarray::{s, Array2};

use crate::instruction::{Instruction, OperationKind};

/// Rewrites every cell of the inclusive rectangle `rows` x `cols`.
fn apply_rectangle<T, F>(
    cells: &mut Array2<T>,
    rows: &RangeInclusive<usize>,
    cols: &RangeInclusive<usize>,
    transform: F,
) where
    T: Clone,
    F: FnMut(T) -> T,
{
    cells
        .slice_mut(s![
            *rows.start()..*rows.end() + 1,
            *cols.start()..*cols.end() + 1
        ])
        .mapv_inplace(transform);
}

pub trait LightGrid {
    fn turn_on(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>);
    fn turn_off(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>);
    fn toggle(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>);

    /// Lights on, or total brightness, depending on the grid.
    fn total(&self) -> u64;

    fn obey(&mut self, instruction: &Instruction) {
        let (rows, cols) = (&instruction.i_range, &instruction.j_range);
        match instruction.kind {
            OperationKind::TurnOn => self.turn_on(rows, cols),
            OperationKind::TurnOff => self.turn_off(rows, cols),
            OperationKind::Toggle => self.toggle(rows, cols),
        }
    }
}

/// Lights which are simply on or off.
pub struct BinaryGrid {
    lights: Array2<bool>,
}

impl BinaryGrid {
    pub fn new(size: usize) -> BinaryGrid {
        BinaryGrid {
            lights: Array2::from_elem((size, size), false),
        }
    }
}

impl LightGrid for BinaryGrid {
    fn turn_on(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.lights, rows, cols, |_| true);
    }

    fn turn_off(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.lights, rows, cols, |_| false);
    }

    fn toggle(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.lights, rows, cols, |on| !on);
    }

    fn total(&self) -> u64 {
        self.lights.iter().filter(|on| **on).count() as u64
    }
}

/// Lights with a brightness of zero or more.  "Toggle" always adds 2,
/// whatever the current brightness.
pub struct AdditiveGrid {
    brightness: Array2<u32>,
}

impl AdditiveGrid {
    pub fn new(size: usize) -> AdditiveGrid {
        AdditiveGrid {
            brightness: Array2::zeros((size, size)),
        }
    }
}

impl LightGrid for AdditiveGrid {
    fn turn_on(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.brightness, rows, cols, |b| b + 1);
    }

    fn turn_off(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.brightness, rows, cols, |b| b.saturating_sub(1));
    }

    fn toggle(&mut self, rows: &RangeInclusive<usize>, cols: &RangeInclusive<usize>) {
        apply_rectangle(&mut self.brightness, rows, cols, |b| b + 2);
    }

    fn total(&self) -> u64 {
        self.brightness.iter().map(|b| u64::from(*b)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_value() {
        let mut grid = BinaryGrid::new(1000);
        assert_eq!(grid.total(), 0);
        grid.turn_on(&(1..=2), &(3..=5));
        assert_eq!(grid.total(), 3 * 2);
        grid.turn_off(&(1..=1), &(5..=6));
        assert_eq!(grid.total(), 3 * 2 - 1);
    }

    #[test]
    fn test_binary_toggle() {
        let mut grid = BinaryGrid::new(1000);
        grid.toggle(&(1..=6), &(2..=4));
        assert_eq!(grid.total(), 6 * 3);
        grid.toggle(&(0..=2), &(4..=5));
        assert_eq!(grid.total(), 6 * 3 - 2 + 4);
        assert!(grid.lights[(0, 4)] && !grid.lights[(1, 4)]);
    }

    #[test]
    fn test_on_then_off_clears_only_the_rectangle() {
        let mut grid = BinaryGrid::new(20);
        grid.turn_on(&(0..=19), &(0..=0));
        let before = grid.lights.clone();
        grid.turn_on(&(5..=9), &(0..=12));
        grid.turn_off(&(5..=9), &(0..=12));
        for ((r, c), on) in grid.lights.indexed_iter() {
            if (5..=9).contains(&r) && (0..=12).contains(&c) {
                assert!(!on, "({}, {}) should be off", r, c);
            } else {
                assert_eq!(*on, before[(r, c)]);
            }
        }
    }

    #[test]
    fn test_binary_turn_on_is_idempotent() {
        let mut once = BinaryGrid::new(10);
        once.turn_on(&(2..=4), &(3..=8));
        let mut twice = BinaryGrid::new(10);
        twice.turn_on(&(2..=4), &(3..=8));
        twice.turn_on(&(2..=4), &(3..=8));
        assert_eq!(once.lights, twice.lights);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut grid = BinaryGrid::new(10);
        grid.turn_on(&(0..=5), &(0..=5));
        let before = grid.lights.clone();
        grid.toggle(&(3..=9), &(2..=7));
        assert_ne!(grid.lights, before);
        grid.toggle(&(3..=9), &(2..=7));
        assert_eq!(grid.lights, before);
    }

    #[test]
    fn test_single_cell_at_the_edge() {
        let mut grid = BinaryGrid::new(10);
        grid.turn_on(&(9..=9), &(9..=9));
        assert_eq!(grid.total(), 1);
        assert!(grid.lights[(9, 9)]);

        let mut grid = AdditiveGrid::new(10);
        grid.toggle(&(9..=9), &(0..=0));
        assert_eq!(grid.total(), 2);
    }

    #[test]
    fn test_matrix_addition() {
        let mut grid = AdditiveGrid::new(1000);
        assert_eq!(grid.total(), 0);
        grid.turn_on(&(1..=2), &(3..=5));
        assert_eq!(grid.total(), 3 * 2);
        grid.turn_on(&(1..=2), &(3..=5));
        assert_eq!(grid.total(), 3 * 2 * 2);
        grid.toggle(&(0..=5), &(2..=7));
        assert_eq!(grid.total(), 3 * 2 * 2 + 6 * 6 * 2);
    }

    #[test]
    fn test_additive_turn_off() {
        let mut grid = AdditiveGrid::new(1000);
        grid.brightness.slice_mut(s![3..6, 1..3]).mapv_inplace(|_| 3);
        assert_eq!(grid.total(), 3 * 2 * 3);
        grid.turn_off(&(3..=4), &(1..=1));
        assert_eq!(grid.total(), 3 * 2 * 3 - 2);
        grid.turn_off(&(2..=4), &(0..=2));
        assert_eq!(grid.total(), 3 * 2 * 3 - 2 - 2 * 2);
        grid.turn_off(&(0..=3), &(0..=1));
        grid.turn_off(&(0..=3), &(0..=2));
        assert_eq!(grid.brightness[(3, 1)], 0);
        assert_eq!(grid.total(), 3 * 2 * 3 - 2 - 2 * 2 - 2);
    }

    #[test]
    fn test_brightness_floor_is_zero() {
        let mut grid = AdditiveGrid::new(8);
        grid.turn_on(&(0..=3), &(0..=3));
        for _ in 0..5 {
            grid.turn_off(&(0..=7), &(0..=7));
        }
        assert_eq!(grid.total(), 0);
        // A light that was held at zero comes back up by exactly one.
        grid.turn_on(&(0..=0), &(0..=0));
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn test_additive_order_matters() {
        let a = (0..=4, 0..=4);
        let b = (2..=6, 2..=6);

        let mut off_first = AdditiveGrid::new(10);
        off_first.turn_off(&a.0, &a.1);
        off_first.toggle(&b.0, &b.1);

        let mut toggle_first = AdditiveGrid::new(10);
        toggle_first.toggle(&b.0, &b.1);
        toggle_first.turn_off(&a.0, &a.1);

        assert_eq!(off_first.total(), 25 * 2);
        assert_eq!(toggle_first.total(), 25 * 2 - 9);
    }

    #[test]
    fn test_obey_dispatches_on_kind() {
        let mut grid = AdditiveGrid::new(10);
        grid.obey(&Instruction::new(OperationKind::TurnOn, 0..=1, 0..=1));
        grid.obey(&Instruction::new(OperationKind::Toggle, 0..=0, 0..=1));
        grid.obey(&Instruction::new(OperationKind::TurnOff, 1..=1, 1..=1));
        assert_eq!(grid.brightness[(0, 0)], 3);
        assert_eq!(grid.brightness[(0, 1)], 3);
        assert_eq!(grid.brightness[(1, 0)], 1);
        assert_eq!(grid.brightness[(1, 1)], 0);
    }
}
