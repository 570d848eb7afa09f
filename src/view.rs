use std::{
    io::{stdout, Stdout, Write},
    thread,
    time::{Duration, Instant},
};

use termion::{
    event::Key,
    input::{Keys, TermRead},
    raw::{IntoRawMode, RawTerminal},
    AsyncReader,
};

use crate::{pos, sim::DEFAULT_TICK_INTERVAL, Board, Pos, Sim};

pub use canvas::Canvas;
mod canvas;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);
const MAX_TICK_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Toggle,
    Pause,
    Accelerate,
    Decelerate,
}

/// Raw mode terminal front end. Doubles as the simulation driver, it
/// steps the simulation once per tick interval and redraws after every
/// change.
pub struct View {
    stdout: RawTerminal<Stdout>,
    keys: Keys<AsyncReader>,
    cursor: Pos,
    paused: bool,
    tick_interval: Duration,
}

impl View {
    pub fn new() -> Self {
        let stdout = stdout().into_raw_mode().unwrap();
        let keys = termion::async_stdin().keys();
        Self {
            stdout,
            keys,
            cursor: pos!(0, 0),
            paused: false,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn run(mut self, sim: &mut Sim) {
        print!("{}", termion::cursor::Hide);
        self.stdout.flush().unwrap();

        let mut last_tick = Instant::now();
        let mut dirty = true;

        loop {
            for command in self.poll_inputs() {
                match command {
                    InputCmd::Exit => {
                        print!("{}{}", termion::clear::All, termion::cursor::Show);
                        self.stdout.flush().unwrap();
                        return;
                    }
                    InputCmd::Move(direction) => {
                        let offset = match direction {
                            Dir::Up => pos!(-1, 0),
                            Dir::Down => pos!(1, 0),
                            Dir::Left => pos!(0, -1),
                            Dir::Right => pos!(0, 1),
                        };
                        self.cursor = clamp_to_board(self.cursor + offset, sim.board());
                    }
                    InputCmd::Toggle => {
                        if let Err(error) = sim.toggle(self.cursor) {
                            log::warn!("toggle failed: {error}");
                        }
                    }
                    InputCmd::Pause => self.paused = !self.paused,
                    InputCmd::Accelerate => {
                        self.tick_interval = (self.tick_interval / 2).max(MIN_TICK_INTERVAL)
                    }
                    InputCmd::Decelerate => {
                        self.tick_interval = (self.tick_interval * 2).min(MAX_TICK_INTERVAL)
                    }
                }
                dirty = true;
            }

            if !self.paused && last_tick.elapsed() >= self.tick_interval {
                sim.step();
                last_tick = Instant::now();
                dirty = true;
            }

            if dirty {
                self.display(sim);
                dirty = false;
            }

            thread::sleep(INPUT_POLL_INTERVAL);
        }
    }

    fn poll_inputs(&mut self) -> Vec<InputCmd> {
        let mut commands = vec![];
        while let Some(Ok(key)) = self.keys.next() {
            let command = match key {
                Key::Char('q') | Key::Esc => InputCmd::Exit,
                Key::Up => InputCmd::Move(Dir::Up),
                Key::Down => InputCmd::Move(Dir::Down),
                Key::Left => InputCmd::Move(Dir::Left),
                Key::Right => InputCmd::Move(Dir::Right),
                Key::Char(' ') => InputCmd::Toggle,
                Key::Char('p') => InputCmd::Pause,
                Key::Char('+') => InputCmd::Accelerate,
                Key::Char('-') => InputCmd::Decelerate,
                _ => continue,
            };

            commands.push(command);
        }
        commands
    }

    fn display(&self, sim: &Sim) {
        let board = sim.board();
        let mut canvas = Canvas::from_screen();

        canvas.layer(|pos| {
            if !board.contains(pos) {
                None
            } else if board.is_cell_alive(pos) {
                Some('#')
            } else {
                Some('.')
            }
        });
        canvas.layer(|pos| (pos == self.cursor).then_some('@'));

        let status = format!(
            "generation {} | {} | tick {}ms | arrows move, space toggles, p pauses, +/- speed, q quits",
            sim.generation(),
            if self.paused { "paused" } else { "running" },
            self.tick_interval.as_millis(),
        );
        canvas.text(pos!(canvas.height() as i32 - 1, 0), &status);

        canvas.display();
    }
}

fn clamp_to_board(pos: Pos, board: &Board) -> Pos {
    pos!(
        pos.row.clamp(0, (board.rows() - 1).max(0)),
        pos.col.clamp(0, (board.columns() - 1).max(0))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_clamped_to_the_board() {
        let board = Board::dead(4, 6).unwrap();
        assert_eq!(clamp_to_board(pos!(-3, 2), &board), pos!(0, 2));
        assert_eq!(clamp_to_board(pos!(9, 9), &board), pos!(3, 5));
        assert_eq!(clamp_to_board(pos!(2, 2), &board), pos!(2, 2));
    }

    #[test]
    fn cursor_clamping_handles_empty_boards() {
        let board = Board::dead(0, 0).unwrap();
        assert_eq!(clamp_to_board(pos!(3, -2), &board), pos!(0, 0));
    }
}
