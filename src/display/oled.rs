//! SSD1306 OLED sink

use super::{DisplaySink, HardwareError};
use crate::render::Frame;
use embedded_graphics::prelude::*;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay, I2cdev};
use log::info;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::size::DisplaySize128x64;
use ssd1306::{I2CDisplayInterface, Ssd1306};

// The panel sits at the controller's default address on the primary bus,
// with its reset pin wired to GPIO 4.
const I2C_BUS: &str = "/dev/i2c-1";
const GPIO_CHIP: &str = "/dev/gpiochip0";
const RESET_LINE: u32 = 4;

type Device = Ssd1306<
    I2CInterface<I2cdev>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// The physical 128x64 panel.
pub struct Oled {
    device: Device,
}

impl Oled {
    /// Open the bus, pulse the reset line and initialize the controller.
    pub fn open() -> Result<Self, HardwareError> {
        let i2c = I2cdev::new(I2C_BUS)
            .map_err(|e| HardwareError::Bus(format!("{I2C_BUS}: {e}")))?;
        let interface = I2CDisplayInterface::new(i2c);
        let mut device = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        let mut chip = Chip::new(GPIO_CHIP)
            .map_err(|e| HardwareError::Reset(format!("{GPIO_CHIP}: {e}")))?;
        let handle = chip
            .get_line(RESET_LINE)
            .and_then(|line| line.request(LineRequestFlags::OUTPUT, 1, "oled-stats-reset"))
            .map_err(|e| HardwareError::Reset(format!("gpio line {RESET_LINE}: {e}")))?;
        let mut reset = CdevPin::new(handle)
            .map_err(|e| HardwareError::Reset(format!("gpio line {RESET_LINE}: {e}")))?;

        device
            .reset(&mut reset, &mut Delay)
            .map_err(|e| HardwareError::Init(format!("{e:?}")))?;
        device
            .init()
            .map_err(|e| HardwareError::Init(format!("{e:?}")))?;

        info!("display initialized on {I2C_BUS}");
        Ok(Self { device })
    }
}

impl DisplaySink for Oled {
    fn clear(&mut self) -> Result<(), HardwareError> {
        self.push(&Frame::new())
    }

    // A frame's pixel iterator covers every coordinate, so replaying it
    // overwrites the whole device buffer before the flush.
    fn push(&mut self, frame: &Frame) -> Result<(), HardwareError> {
        self.device
            .draw_iter(frame.pixels())
            .map_err(|e| HardwareError::Io(format!("{e:?}")))?;
        self.device
            .flush()
            .map_err(|e| HardwareError::Io(format!("{e:?}")))
    }
}
