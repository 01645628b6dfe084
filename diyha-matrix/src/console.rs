//! Terminal stand-in for the LED backpack.

use diyha_matrix_core::{Color, DisplaySurface, GRID_SIZE, MatrixError};
use std::io::Write;

const SIZE: usize = GRID_SIZE as usize;

/// Renders the matrix as colored dots on a terminal.
///
/// Pixels are buffered and drawn on `flush`, one frame per tick.
pub struct ConsoleSurface<W: Write + Send> {
    out: W,
    cells: [[Color; SIZE]; SIZE],
    brightness: f32,
}

impl<W: Write + Send> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: [[Color::Off; SIZE]; SIZE],
            brightness: 1.0,
        }
    }

    fn glyph(&self, color: Color) -> &'static str {
        let dim = self.brightness < 0.5;
        match (color, dim) {
            (Color::Off, _) => "\x1b[90m·\x1b[0m",
            (Color::Green, false) => "\x1b[32m●\x1b[0m",
            (Color::Green, true) => "\x1b[2;32m●\x1b[0m",
            (Color::Red, false) => "\x1b[31m●\x1b[0m",
            (Color::Red, true) => "\x1b[2;31m●\x1b[0m",
            (Color::Yellow, false) => "\x1b[33m●\x1b[0m",
            (Color::Yellow, true) => "\x1b[2;33m●\x1b[0m",
        }
    }
}

fn io_fault(err: std::io::Error) -> MatrixError {
    MatrixError::HardwareFault(format!("console write failed: {err}"))
}

impl<W: Write + Send> DisplaySurface for ConsoleSurface<W> {
    fn fill(&mut self, color: Color) -> Result<(), MatrixError> {
        self.cells = [[color; SIZE]; SIZE];
        Ok(())
    }

    fn set(&mut self, x: u8, y: u8, color: Color) -> Result<(), MatrixError> {
        let cell = self
            .cells
            .get_mut(x as usize)
            .and_then(|column| column.get_mut(y as usize))
            .ok_or_else(|| MatrixError::HardwareFault(format!("pixel ({x}, {y}) out of range")))?;
        *cell = color;
        Ok(())
    }

    fn set_brightness(&mut self, level: f32) -> Result<(), MatrixError> {
        self.brightness = level.clamp(0.0, 1.0);
        Ok(())
    }

    fn reinitialize(&mut self) -> Result<(), MatrixError> {
        self.cells = [[Color::Off; SIZE]; SIZE];
        write!(self.out, "\x1b[2J").map_err(io_fault)
    }

    fn flush(&mut self) -> Result<(), MatrixError> {
        let mut frame = String::from("\x1b[H");
        for y in 0..SIZE {
            for x in 0..SIZE {
                frame.push_str(self.glyph(self.cells[x][y]));
                frame.push(' ');
            }
            frame.push('\n');
        }
        self.out.write_all(frame.as_bytes()).map_err(io_fault)?;
        self.out.flush().map_err(io_fault)
    }
}
