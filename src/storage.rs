//! # Storage: memory, program counter and stack
//!
//! `Storage` owns the memory bus together with the two pieces of state that
//! walk through it: the program counter and the stack pointer. Every fetch,
//! jump, branch and stack operation goes through here, so the fetch stream
//! stays in step with operand consumption.
//!
//! ## Stack
//!
//! The stack is the fixed page 0x0100-0x01FF. `push` decrements SP and then
//! writes to `0x0100 + SP`; `pull` reads `0x0100 + SP` and then increments.
//! The pointer wraps silently in both directions, exactly like the hardware,
//! which has no overflow or underflow detection.

use crate::memory::{bytes, int16};
use crate::MemoryBus;

/// Base address of the 256-byte stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after construction.
pub const STACK_POINTER_RESET: u8 = 0xFF;

/// Default load address for program images.
pub const PROGRAM_ORIGIN: u16 = 0x0600;

/// Memory plus program counter and stack pointer.
///
/// # Examples
///
/// ```
/// use sim6502::{FlatMemory, Storage};
///
/// let mut storage = Storage::new(FlatMemory::new());
/// storage.load(&[0xA9, 0x05], 0x0600);
///
/// assert_eq!(storage.pc(), 0x0600);
/// assert_eq!(storage.next(), 0xA9);
/// assert_eq!(storage.next(), 0x05);
/// assert_eq!(storage.pc(), 0x0602);
/// ```
pub struct Storage<M: MemoryBus> {
    memory: M,

    /// Address of the next byte to fetch
    pc: u16,

    /// Offset into the stack page of the most recently pushed byte
    sp: u8,
}

impl<M: MemoryBus> Storage<M> {
    /// Wraps a memory bus. PC starts at `PROGRAM_ORIGIN`, SP at `STACK_POINTER_RESET`.
    pub fn new(memory: M) -> Self {
        Self {
            memory,
            pc: PROGRAM_ORIGIN,
            sp: STACK_POINTER_RESET,
        }
    }

    /// Reads the byte at `addr` through the bus.
    pub fn get(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes `value` masked to a byte at `addr` through the bus.
    pub fn set(&mut self, addr: u16, value: impl Into<u16>) {
        let byte = (value.into() & 0xFF) as u8;
        self.memory.write(addr, byte);
    }

    /// Reads the little-endian word stored at `addr` and `addr + 1`.
    pub fn get_word(&self, addr: u16) -> u16 {
        int16([self.get(addr), self.get(addr.wrapping_add(1))])
    }

    /// Copies `image` into memory starting at `origin`.
    ///
    /// The program counter is left alone. Bytes past 0xFFFF wrap to 0x0000.
    pub fn load(&mut self, image: &[u8], origin: u16) {
        let mut addr = origin;
        for &byte in image {
            self.memory.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Returns the byte at PC and advances PC by one.
    pub fn next(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Consumes two bytes at PC and combines them little-endian.
    pub fn next_word(&mut self) -> u16 {
        let low = self.next();
        let high = self.next();
        int16([low, high])
    }

    /// Sets PC unconditionally.
    pub fn jump(&mut self, addr: u16) {
        self.pc = addr;
    }

    /// Jumps to `addr` if `condition` holds; otherwise PC is untouched.
    pub fn branch(&mut self, condition: bool, addr: u16) {
        if condition {
            self.jump(addr);
        }
    }

    /// Decrements SP, then stores `value` at the new top of stack.
    pub fn push(&mut self, value: u8) {
        self.sp = self.sp.wrapping_sub(1);
        self.memory.write(STACK_BASE + self.sp as u16, value);
    }

    /// Reads the top of stack, then increments SP.
    pub fn pull(&mut self) -> u8 {
        let value = self.memory.read(STACK_BASE + self.sp as u16);
        self.sp = self.sp.wrapping_add(1);
        value
    }

    /// Pushes the current PC (high byte first) and jumps to `addr`.
    ///
    /// The saved PC is the address following the whole JSR instruction, since
    /// the operand has already been consumed when this runs.
    pub fn jsr(&mut self, addr: u16) {
        let [low, high] = bytes(self.pc);
        self.push(high);
        self.push(low);
        self.jump(addr);
    }

    /// Pulls a return address pushed by `jsr` and jumps to it.
    ///
    /// Nothing checks that a matching `jsr` happened; an unmatched `rts`
    /// returns to whatever the stack happens to hold.
    pub fn rts(&mut self) {
        let low = self.pull();
        let high = self.pull();
        self.jump(int16([low, high]));
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Sets the stack pointer (TXS).
    pub fn set_sp(&mut self, sp: u8) {
        self.sp = sp;
    }

    /// Reads a byte without triggering device hooks.
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.peek(addr)
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}
