//! The 128x64 1-bit frame buffer

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use std::convert::Infallible;

/// Display width in pixels.
pub const WIDTH: u32 = 128;
/// Display height in pixels.
pub const HEIGHT: u32 = 64;

const BUFFER_LEN: usize = (WIDTH * HEIGHT / 8) as usize;

/// One full image for the display: row-major, one bit per pixel, most
/// significant bit first.
///
/// The composer owns a single frame and mutates it in place every
/// iteration; the display sink only reads it. Drawing outside the visible
/// area is silently ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buffer: [u8; BUFFER_LEN],
}

impl Frame {
    pub fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Switch every pixel off.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let index = (y * WIDTH / 8 + x / 8) as usize;
        let mask = 0x80 >> (x % 8);
        if on {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let index = (y * WIDTH / 8 + x / 8) as usize;
        self.buffer[index] & (0x80 >> (x % 8)) != 0
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|byte| *byte == 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Every pixel in drawing order, for replay onto the device buffer.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..HEIGHT).flat_map(move |y| {
            (0..WIDTH).map(move |x| {
                let color = if self.get(x, y) {
                    BinaryColor::On
                } else {
                    BinaryColor::Off
                };
                Pixel(Point::new(x as i32, y as i32), color)
            })
        })
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}
