//! Output driver adapters

use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::Rgb;

/// Adapts any [`SmartLedsWrite`] driver (ws2812 over SPI, RMT, PIO, ...).
///
/// Global brightness is applied on the way out with
/// [`smart_leds::brightness`], so the engine's buffer always keeps full
/// resolution colors.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: SmartLedsWrite<Color = Rgb>> OutputDriver for SmartLedsOutput<W> {
    fn write(&mut self, colors: &[Rgb], brightness: u8) {
        let scaled = smart_leds::brightness(colors.iter().copied(), brightness);
        if self.writer.write(scaled).is_err() {
            report_write_error(colors.len());
        }
    }
}

/// Frames are fire-and-forget; a failed push is only logged.
fn report_write_error(pixels: usize) {
    #[cfg(feature = "esp32-log")]
    println!("[SmartLedsOutput.write] driver rejected a frame of {} pixels", pixels);
    #[cfg(not(feature = "esp32-log"))]
    let _ = pixels;
}
