//! Host-side collaborators of the memory map.
//!
//! The simulator talks to its host through two calls only: it asks for the
//! most recent input code and it reports pixel writes. `HostDevice` captures
//! that surface. Pacing, rendering and key capture stay on the host side.
//!
//! Provided implementations:
//!
//! - `NullDevice`: no input, pixels discarded
//! - `FrameBuffer`: keeps the colour grid in memory and reads input from an `InputLatch`
//!
//! `InputLatch` is a single-byte cell that can be shared with a thread
//! capturing keys while another thread drives `Simulator::step`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Input code reported before any key has been observed.
pub const NO_INPUT: u8 = 0x00;

/// Host display/input device consumed by `MemoryMap`.
pub trait HostDevice {
    /// Most recent externally observed input code. Must not block.
    fn last_input(&self) -> u8;

    /// A byte was written into the display range.
    ///
    /// `x` is the column, `y` the row and `color` the palette index, already
    /// reduced modulo the palette size.
    fn write_pixel(&mut self, x: u16, y: u16, color: u8);
}

/// Device with no input and no display.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDevice;

impl HostDevice for NullDevice {
    fn last_input(&self) -> u8 {
        NO_INPUT
    }

    fn write_pixel(&mut self, _x: u16, _y: u16, _color: u8) {}
}

/// Shared last-input cell.
///
/// Clones share the same byte, so a key-capture thread can `set` while the
/// emulation thread reads through `HostDevice::last_input`.
///
/// ```
/// use sim6502::InputLatch;
///
/// let latch = InputLatch::new();
/// let writer = latch.clone();
/// writer.set(0x77);
/// assert_eq!(latch.get(), 0x77);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    code: Arc<AtomicU8>,
}

impl InputLatch {
    /// Creates a latch holding `NO_INPUT`.
    pub fn new() -> Self {
        Self {
            code: Arc::new(AtomicU8::new(NO_INPUT)),
        }
    }

    /// Records a new input code, replacing the previous one.
    pub fn set(&self, code: u8) {
        self.code.store(code, Ordering::Release);
    }

    /// Returns the most recently recorded code.
    pub fn get(&self) -> u8 {
        self.code.load(Ordering::Acquire)
    }
}

/// In-memory display: a grid of palette indices plus an input latch.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
    input: InputLatch,
    writes: u64,
}

/// Characters used by `FrameBuffer::render`, one per palette index.
const RENDER_PALETTE: &[u8; 16] = b" #%&*+=-:o@OX$~.";

impl FrameBuffer {
    /// Creates a blank `width` x `height` frame reading input from `input`.
    pub fn new(width: u16, height: u16, input: InputLatch) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            input,
            writes: 0,
        }
    }

    /// Returns the colour index at (`x`, `y`), or `None` outside the frame.
    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Number of pixel writes received so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Returns a handle to the input latch.
    pub fn input(&self) -> InputLatch {
        self.input.clone()
    }

    /// Renders the frame as text, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.pixels.len() + self.height as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for &color in row {
                out.push(RENDER_PALETTE[(color & 0x0F) as usize] as char);
            }
            out.push('\n');
        }
        out
    }
}

impl HostDevice for FrameBuffer {
    fn last_input(&self) -> u8 {
        self.input.get()
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: u8) {
        self.writes += 1;
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_defaults_to_sentinel() {
        assert_eq!(InputLatch::new().get(), NO_INPUT);
        assert_eq!(NullDevice.last_input(), NO_INPUT);
    }

    #[test]
    fn test_latch_shared_across_threads() {
        let latch = InputLatch::new();
        let writer = latch.clone();
        std::thread::spawn(move || writer.set(0x64))
            .join()
            .unwrap();
        assert_eq!(latch.get(), 0x64);
    }

    #[test]
    fn test_frame_buffer_records_pixels() {
        let mut frame = FrameBuffer::new(4, 2, InputLatch::new());
        frame.write_pixel(3, 1, 5);

        assert_eq!(frame.pixel(3, 1), Some(5));
        assert_eq!(frame.pixel(0, 0), Some(0));
        assert_eq!(frame.pixel(4, 0), None);
        assert_eq!(frame.writes(), 1);
    }

    #[test]
    fn test_frame_buffer_render() {
        let mut frame = FrameBuffer::new(2, 2, InputLatch::new());
        frame.write_pixel(1, 0, 1);
        assert_eq!(frame.render(), " #\n  \n");
    }
}
