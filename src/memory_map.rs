//! Memory-mapped I/O for the fantasy-console layout.
//!
//! `MemoryMap` wraps an inner `MemoryBus` and intercepts three kinds of access
//! based on the address alone:
//!
//! - **Random** (`0x00FE` by default): every read returns a fresh byte
//! - **Input** (`0x00FF` by default): reads return the host's last input code
//! - **Display** (`0x0200-0x05FF` by default): writes are stored and also
//!   forwarded to the host as a pixel at (offset mod width, offset div width)
//!
//! Everything else passes through to the inner memory untouched.
//!
//! # Example
//!
//! ```rust
//! use sim6502::{FrameBuffer, InputLatch, MemoryBus, MemoryMap};
//!
//! let frame = FrameBuffer::new(32, 32, InputLatch::new());
//! let mut memory = MemoryMap::with_seed(frame, 7);
//!
//! memory.write(0x0221, 3); // row 1, column 1
//! assert_eq!(memory.device().pixel(1, 1), Some(3));
//! ```

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::host::HostDevice;
use crate::{FlatMemory, MemoryBus};

/// Addresses and geometry of the memory-mapped devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Reads return a random byte
    pub random: u16,

    /// Reads return the host's last input code
    pub input: u16,

    /// First address of the display range
    pub display_start: u16,

    /// Display columns
    pub display_width: u16,

    /// Display rows
    pub display_height: u16,

    /// Number of palette entries; written values are reduced modulo this
    pub palette_size: u8,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            random: 0x00FE,
            input: 0x00FF,
            display_start: 0x0200,
            display_width: 32,
            display_height: 32,
            palette_size: 16,
        }
    }
}

impl MemoryLayout {
    /// Number of bytes in the display range.
    pub fn display_len(&self) -> u32 {
        self.display_width as u32 * self.display_height as u32
    }

    /// Maps a display address to its (column, row), or `None` outside the range.
    pub fn pixel_at(&self, addr: u16) -> Option<(u16, u16)> {
        let offset = addr.checked_sub(self.display_start)? as u32;
        if offset >= self.display_len() || self.display_width == 0 {
            return None;
        }
        let width = self.display_width as u32;
        Some(((offset % width) as u16, (offset / width) as u16))
    }
}

/// Memory bus with I/O hooks in front of an inner memory.
pub struct MemoryMap<D: HostDevice, M: MemoryBus = FlatMemory> {
    memory: M,
    device: D,
    layout: MemoryLayout,
    rng: RefCell<StdRng>,
}

impl<D: HostDevice> MemoryMap<D> {
    /// Creates a map over flat RAM with the default layout and an OS-seeded
    /// random source.
    pub fn new(device: D) -> Self {
        Self::with_layout(
            FlatMemory::new(),
            device,
            MemoryLayout::default(),
            StdRng::from_entropy(),
        )
    }

    /// Like `new`, but the random source is seeded for reproducible runs.
    pub fn with_seed(device: D, seed: u64) -> Self {
        Self::with_layout(
            FlatMemory::new(),
            device,
            MemoryLayout::default(),
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<D: HostDevice, M: MemoryBus> MemoryMap<D, M> {
    /// Creates a map with every part supplied by the caller.
    pub fn with_layout(memory: M, device: D, layout: MemoryLayout, rng: StdRng) -> Self {
        Self {
            memory,
            device,
            layout,
            rng: RefCell::new(rng),
        }
    }

    /// Returns the memory layout.
    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// Returns the host device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Returns the host device mutably.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Returns the wrapped memory.
    pub fn inner(&self) -> &M {
        &self.memory
    }
}

impl<D: HostDevice, M: MemoryBus> MemoryBus for MemoryMap<D, M> {
    fn read(&self, addr: u16) -> u8 {
        if addr == self.layout.random {
            self.rng.borrow_mut().gen::<u8>()
        } else if addr == self.layout.input {
            self.device.last_input()
        } else {
            self.memory.read(addr)
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);

        if let Some((x, y)) = self.layout.pixel_at(addr) {
            let color = value % self.layout.palette_size.max(1);
            self.device.write_pixel(x, y, color);
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }
}
