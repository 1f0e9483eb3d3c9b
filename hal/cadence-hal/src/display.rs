//! Display backend trait
//!
//! Defines the interface for the color panel. Drawing routines above this
//! layer are application code.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// 16-bit RGB565 color as sent to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Black
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    /// White
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    /// Red
    pub const RED: Rgb565 = Rgb565(0xF800);
    /// Green
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    /// Blue
    pub const BLUE: Rgb565 = Rgb565(0x001F);
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to the panel.
pub trait DisplayBackend {
    /// Fill the entire display with one color
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// - `scale`: integer magnification of the built-in font (1 = 6x8 px)
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        color: Rgb565,
        scale: u8,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions in pixels, `(width, height)`
    fn dimensions(&self) -> (u16, u16);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
