//! Display sink abstraction
//!
//! The scheduler only ever talks to the `DisplaySink` trait; the one real
//! implementation drives an SSD1306 over I2C.

mod oled;

pub use oled::Oled;

use crate::render::Frame;
use thiserror::Error;

/// Display I/O failed.
///
/// Policy: fatal. There is no retry logic — a display that cannot be
/// driven is treated the same as a crashed process.
#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("i2c bus error: {0}")]
    Bus(String),

    #[error("reset line error: {0}")]
    Reset(String),

    #[error("display initialization failed: {0}")]
    Init(String),

    #[error("display i/o failed: {0}")]
    Io(String),
}

/// Receives frames and power-state commands.
pub trait DisplaySink {
    /// Switch every pixel of the device off.
    fn clear(&mut self) -> Result<(), HardwareError>;

    /// Transfer a composed frame to the device.
    fn push(&mut self, frame: &Frame) -> Result<(), HardwareError>;

    /// Leave the panel dark: clear, then push an all-off frame.
    ///
    /// Used at startup, on every idle pass and at shutdown.
    fn blank(&mut self) -> Result<(), HardwareError> {
        self.clear()?;
        self.push(&Frame::new())
    }
}
