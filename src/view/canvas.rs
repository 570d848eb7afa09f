use std::io::{stdout, Write};

use crate::{pos, Pos};

/// An off-screen character frame, composed layer by layer and flushed to
/// the terminal in a single write.
pub struct Canvas {
    lines: Vec<String>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn from_screen() -> Self {
        let (width, height) = termion::terminal_size().unwrap();
        Self::new(width as usize, height as usize)
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height).map(|_| " ".repeat(width)).collect();
        Self {
            height,
            lines,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Paints every position the closure returns a character for.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for row in 0..self.height {
            for col in 0..self.width {
                if let Some(char) = f(pos!(row as i32, col as i32)) {
                    self.put(row, col, char);
                }
            }
        }
    }

    /// Writes a line of text starting at the passed position, truncated
    /// at the edges.
    pub fn text(&mut self, start: Pos, text: &str) {
        if !(0..self.height as i32).contains(&start.row) {
            return;
        }
        for (offset, char) in text.chars().enumerate() {
            let col = start.col + offset as i32;
            if (0..self.width as i32).contains(&col) {
                self.put(start.row as usize, col as usize, char);
            }
        }
    }

    fn put(&mut self, row: usize, col: usize, char: char) {
        let line = &mut self.lines[row];
        line.replace_range(
            line.char_indices()
                .nth(col)
                .map(|(pos, ch)| (pos..pos + ch.len_utf8()))
                .unwrap(),
            &format!("{char}"),
        );
    }

    pub fn display(&self) {
        let mut frame = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            frame += &format!("{goto}{line}");
        }
        print!("{}{frame}", termion::clear::All);
        stdout().flush().unwrap();
    }
}

#[test]
fn test_canvas_layers() {
    let mut canvas = Canvas::new(4, 2);
    canvas.layer(|pos| (pos.row == pos.col).then_some('#'));
    canvas.text(pos!(1, 2), "abc");
    assert_eq!(canvas.lines, vec!["#   ".to_string(), " #ab".to_string()]);
}
