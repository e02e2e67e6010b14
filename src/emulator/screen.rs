//! The monochrome framebuffer, mutated only by clearing and sprite drawing.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// A row-major grid of `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Screen {

    /// A blank screen. Both dimensions are at least one pixel.
    pub fn new(width: usize, height: usize) -> Screen {
        let (width, height) = (width.max(1), height.max(1));
        Screen {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = false);
    }

    /// Get a pixel, `false` if outside of the screen.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// The pixels in row-major order.
    pub fn pixels(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Number of rows of an `n` row sprite that are visible when its top is at `y`.
    pub fn visible_rows(&self, y: u8, n: usize) -> usize {
        let top = y as usize % self.height;
        std::cmp::min(n, self.height - top)
    }

    /// XOR a sprite onto the screen and report whether any lit pixel was turned off.
    ///
    /// The start coordinates wrap around the screen, but the sprite body is
    /// clipped at the right and bottom edges.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x0 = x as usize % self.width;
        let y0 = y as usize % self.height;

        let mut collision = false;
        for (row_idx, row) in sprite.iter().enumerate() {
            let y = y0 + row_idx;
            if y >= self.height {
                break;
            }
            for bit in 0..8 {
                let x = x0 + bit;
                if x >= self.width {
                    break;
                }
                let sprite_bit = (row >> (7 - bit)) & 1 == 1;
                let pixel = &mut self.cells[y * self.width + x];
                if sprite_bit && *pixel {
                    collision = true;
                }
                *pixel ^= sprite_bit;
            }
        }
        collision
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
