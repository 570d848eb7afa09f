use std::{env::args, fs, process::exit};

use log::{debug, info, warn};
use rand::thread_rng;

pub use utils::Pos;
mod utils;

pub use board::{Board, BoardError, Cell};
pub mod board;

pub use sim::Sim;
mod sim;

pub use view::View;
mod view;

const DEFAULT_ROWS: i32 = 40;
const DEFAULT_COLUMNS: i32 = 40;

/// Parses a `ROWSxCOLUMNS` dimension argument.
fn parse_dimensions(arg: &str) -> Option<(i32, i32)> {
    let (rows, columns) = arg.split_once('x')?;
    Some((rows.trim().parse().ok()?, columns.trim().parse().ok()?))
}

/// Reads alive cell positions from a textual pattern, `#` marks an alive
/// cell, anything else a dead one.
fn parse_pattern(text: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for char in text.chars() {
        match char {
            '#' => {
                result.push(pos);
                pos.col += 1
            }
            '\n' => pos = pos!(pos.row + 1, 0),
            _ => pos.col += 1,
        }
    }
    result
}

/// Builds an all dead board and marks the passed cells alive, skipping
/// the ones falling outside of it.
fn seeded_board(rows: i32, columns: i32, actives: &[Pos]) -> Result<Board, BoardError> {
    let mut board = Board::dead(rows, columns)?;
    for &pos in actives {
        if let Err(error) = board.set(pos, Cell::alive()) {
            warn!("skipping pattern cell: {error}");
        }
    }
    Ok(board)
}

fn main() {
    simple_logger::init().unwrap();

    let mut arguments = args().skip(1);
    let (rows, columns) = match arguments.next() {
        Some(arg) => parse_dimensions(&arg).unwrap_or_else(|| {
            eprintln!("[error] expected dimensions like 40x40, got {arg:?}");
            exit(1);
        }),
        None => (DEFAULT_ROWS, DEFAULT_COLUMNS),
    };

    debug!("initializing {rows}x{columns} board");
    let board = match arguments.next() {
        Some(path) => {
            let content = fs::read_to_string(&path).unwrap_or_else(|error| {
                eprintln!("[error] could not read pattern {path:?}: {error}");
                exit(1);
            });
            seeded_board(rows, columns, &parse_pattern(&content))
        }
        None => Board::random(rows, columns, &mut thread_rng()),
    }
    .unwrap_or_else(|error| {
        eprintln!("[error] {error}");
        exit(1);
    });

    let mut sim = Sim::new(board);
    View::new().run(&mut sim);

    info!("stopped after {} generations", sim.generation());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_arguments_are_parsed() {
        assert_eq!(parse_dimensions("40x40"), Some((40, 40)));
        assert_eq!(parse_dimensions("5x12"), Some((5, 12)));
        assert_eq!(parse_dimensions("-5x12"), Some((-5, 12)));
        assert_eq!(parse_dimensions("40"), None);
        assert_eq!(parse_dimensions("axb"), None);
    }

    #[test]
    fn patterns_list_alive_cells_row_first() {
        let actives = parse_pattern("..#\n#.\n");
        assert_eq!(actives, vec![pos!(0, 2), pos!(1, 0)]);
        assert_eq!(parse_pattern(""), vec![]);
    }

    #[test]
    fn pattern_cells_outside_the_board_are_skipped() {
        let board = seeded_board(2, 2, &[pos!(0, 0), pos!(5, 5)]).unwrap();
        assert!(board.is_cell_alive(pos!(0, 0)));
        assert_eq!(board.rows(), 2);
    }
}
