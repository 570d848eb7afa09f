use rand::Rng;
use thiserror::Error;

use crate::{pos, Pos};

/// State of a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn alive() -> Self {
        Self { alive: true }
    }

    pub fn dead() -> Self {
        Self { alive: false }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell { alive: false }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{columns}")]
    InvalidDimensions { rows: i32, columns: i32 },
    #[error("position ({row}, {col}) is out of range of a {rows}x{columns} board")]
    IndexOutOfRange {
        row: i32,
        col: i32,
        rows: i32,
        columns: i32,
    },
}

/// A bounded rectangular grid of cells. Reads outside of it yield dead
/// cells, writes outside of it are an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    columns: i32,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Builds a board, filling every cell from the seeder.
    pub fn new(
        rows: i32,
        columns: i32,
        mut seeder: impl FnMut(Pos) -> Cell,
    ) -> Result<Self, BoardError> {
        if rows < 0 || columns < 0 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }

        let cells = (0..rows)
            .map(|row| (0..columns).map(|col| seeder(pos!(row, col))).collect())
            .collect();

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn dead(rows: i32, columns: i32) -> Result<Self, BoardError> {
        Self::new(rows, columns, |_| Cell::dead())
    }

    /// Seeds every cell at random, half alive half dead.
    pub fn random(rows: i32, columns: i32, rng: &mut impl Rng) -> Result<Self, BoardError> {
        Self::new(rows, columns, |_| {
            if rng.gen_bool(0.5) {
                Cell::alive()
            } else {
                Cell::dead()
            }
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.columns).contains(&pos.col)
    }

    pub fn get(&self, pos: Pos) -> Cell {
        if self.contains(pos) {
            self.cells[pos.row as usize][pos.col as usize].clone()
        } else {
            Cell::dead()
        }
    }

    pub fn is_cell_alive(&self, pos: Pos) -> bool {
        self.get(pos).is_alive()
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::IndexOutOfRange {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                columns: self.columns,
            });
        }

        self.cells[pos.row as usize][pos.col as usize] = cell;
        Ok(())
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, pos: Pos) -> Result<bool, BoardError> {
        let flipped = if self.is_cell_alive(pos) {
            Cell::dead()
        } else {
            Cell::alive()
        };
        let alive = flipped.is_alive();
        self.set(pos, flipped)?;
        Ok(alive)
    }

    /// Positions of the Moore neighborhood, the center excluded.
    pub fn neighbors(pos: Pos) -> impl Iterator<Item = Pos> {
        (-1..=1)
            .flat_map(move |row| (-1..=1).map(move |col| pos + pos!(row, col)))
            .filter(move |neighbor| *neighbor != pos)
    }

    pub fn alive_neighbor_count(&self, pos: Pos) -> usize {
        Self::neighbors(pos)
            .filter(|pos| self.is_cell_alive(*pos))
            .count()
    }

    /// Computes the following generation, reading only from `self`.
    pub fn next_generation(&self) -> Self {
        let cells = (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| {
                        let pos = pos!(row, col);
                        let count = self.alive_neighbor_count(pos);
                        match (self.is_cell_alive(pos), count) {
                            (true, 2) | (true, 3) => Cell::alive(), // survives
                            (false, 3) => Cell::alive(),            // becomes alive
                            _ => Cell::dead(),                      // dies or stays dead
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn arbitrary_board() -> impl Strategy<Value = Board> {
        (1..12i32, 1..12i32, any::<u64>()).prop_map(|(rows, columns, seed)| {
            let mut rng = StdRng::seed_from_u64(seed);
            Board::random(rows, columns, &mut rng).unwrap()
        })
    }

    proptest! {
        #[test]
        fn neighbor_counts_stay_in_range(
            board in arbitrary_board(),
            row in -20..20i32,
            col in -20..20i32,
        ) {
            prop_assert!(board.alive_neighbor_count(pos!(row, col)) <= 8);
        }

        #[test]
        fn toggling_twice_restores_the_board(mut board in arbitrary_board()) {
            let before = board.clone();
            let target = pos!(board.rows() / 2, board.columns() / 2);
            board.toggle(target).unwrap();
            board.toggle(target).unwrap();
            prop_assert_eq!(before, board);
        }

        #[test]
        fn generations_preserve_dimensions(board in arbitrary_board()) {
            let next = board.next_generation();
            prop_assert_eq!(next.rows(), board.rows());
            prop_assert_eq!(next.columns(), board.columns());
        }
    }
}
