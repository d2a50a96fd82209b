//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the simulator from
//! specific memory implementations:
//!
//! - Flat 64KB RAM (`FlatMemory`)
//! - Memory-mapped I/O (`MemoryMap`, see `memory_map`)
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Addresses are 16-bit and bytes are 8-bit, so nothing can go out of range
//!
//! It also hosts the little-endian word helpers (`int16` and `bytes`) used by
//! the addressing modes and the subroutine stack.

/// Memory bus trait for reading and writing bytes.
///
/// # Examples
///
/// ```
/// use sim6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Reads may have side effects (a random source, an input register), so
    /// implementations with such hooks keep that state behind interior
    /// mutability. This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a byte without triggering any device hook.
    ///
    /// Used for debugging and inspection. The default is a plain `read`, which
    /// is correct for memory without side effects.
    fn peek(&self, addr: u16) -> u8 {
        self.read(addr)
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{FlatMemory, MemoryBus};
    ///
    /// let mem = FlatMemory::new();
    /// assert_eq!(mem.read(0x0000), 0x00);
    /// assert_eq!(mem.read(0xFFFF), 0x00);
    /// ```
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

/// Combines a little-endian byte pair into a 16-bit word.
///
/// ```
/// assert_eq!(sim6502::memory::int16([0x37, 0x13]), 0x1337);
/// ```
pub fn int16(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Splits a 16-bit word into a little-endian byte pair (low byte first).
///
/// ```
/// assert_eq!(sim6502::memory::bytes(0x1337), [0x37, 0x13]);
/// ```
pub fn bytes(word: u16) -> [u8; 2] {
    word.to_le_bytes()
}
