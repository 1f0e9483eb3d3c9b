//! Board peripherals without a driver on this target
//!
//! The RP2040 has no radio and the panel driver lives outside this
//! repository, so the board plugs these stand-ins into the graph. The
//! display reports every frame over RTT; the characteristics stay idle
//! until a radio stack feeds them.

use cadence_hal::{BleError, Characteristic, DisplayBackend, DisplayError, Rgb565};
use defmt::debug;

/// Panel size of the reference board
pub const PANEL_SIZE: (u16, u16) = (128, 128);

/// Display that logs what would be drawn
pub struct LogDisplay {
    frames: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self { frames: 0 }
    }
}

impl DisplayBackend for LogDisplay {
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        debug!("display: clear {=u16:#x}", color.0);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if x.saturating_add(width) > PANEL_SIZE.0 || y.saturating_add(height) > PANEL_SIZE.1 {
            return Err(DisplayError::InvalidCoordinates);
        }
        debug!("display: rect {},{} {}x{} {=u16:#x}", x, y, width, height, color.0);
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        _color: Rgb565,
        scale: u8,
    ) -> Result<(), DisplayError> {
        if x >= PANEL_SIZE.0 || y >= PANEL_SIZE.1 {
            return Err(DisplayError::InvalidCoordinates);
        }
        debug!("display: text {},{} x{} \"{=str}\"", x, y, scale, text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.frames = self.frames.wrapping_add(1);
        debug!("display: frame {}", self.frames);
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        PANEL_SIZE
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Characteristic value with no central attached
pub struct IdleCharacteristic {
    value: heapless::Vec<u8, 20>,
}

impl IdleCharacteristic {
    pub fn new() -> Self {
        Self {
            value: heapless::Vec::new(),
        }
    }
}

impl Characteristic for IdleCharacteristic {
    fn take_written(&mut self) -> bool {
        false
    }

    fn read(&self, buffer: &mut [u8]) -> Result<usize, BleError> {
        let out = buffer
            .get_mut(..self.value.len())
            .ok_or(BleError::BufferTooSmall)?;
        out.copy_from_slice(&self.value);
        Ok(self.value.len())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), BleError> {
        self.value = heapless::Vec::from_slice(data).map_err(|_| BleError::InvalidLength)?;
        Ok(())
    }
}
