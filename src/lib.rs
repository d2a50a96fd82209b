//! # 6502 Simulator Core
//!
//! A small 6502 simulator built to run fantasy-console programs: a 64KB
//! memory, three registers and the Carry/Zero/Negative flags, the standard
//! addressing modes, and a memory map that provides a random byte, a key
//! input register and a 32x32 pixel display.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{FrameBuffer, InputLatch, Simulator};
//!
//! let input = InputLatch::new();
//! let mut sim = Simulator::with_seed(FrameBuffer::new(32, 32, input.clone()), 1);
//!
//! sim.load_program(&[
//!     0xA9, 0x01, // LDA #$01
//!     0x8D, 0x00, 0x02, // STA $0200  (top-left pixel)
//!     0x00, // BRK
//! ]);
//! sim.run().unwrap();
//!
//! assert_eq!(sim.device().pixel(0, 0), Some(1));
//! ```
//!
//! ## Architecture
//!
//! - **Storage**: memory bus plus program counter and stack pointer
//! - **Cpu**: A, X, Y and the flags; every register write recomputes Z and N
//! - **Addressing**: consumes operand bytes and yields a `Reference`
//! - **MemoryMap**: I/O hooks in front of plain memory, talking to a `HostDevice`
//! - **InstructionSet**: immutable opcode table, shared through an `Arc`
//! - **Simulator**: the fetch-decode-execute loop
//!
//! ## Modules
//!
//! - `memory` - MemoryBus trait, flat RAM and word helpers
//! - `storage` - PC, SP, fetch, jumps and the stack
//! - `cpu` - Registers and status flags
//! - `addressing` - Addressing modes and the resolver
//! - `memory_map` - Memory-mapped random source, input and display
//! - `host` - Host device trait and stock implementations
//! - `opcodes` - Mnemonics and the opcode table
//! - `simulator` - Execution loop

pub mod addressing;
pub mod cpu;
pub mod host;
pub mod memory;
pub mod memory_map;
pub mod opcodes;
pub mod simulator;
pub mod storage;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

use thiserror::Error;

// Re-export public API
pub use addressing::{resolve, AddressingMode, Reference};
pub use cpu::{Cpu, Flag, Register};
pub use host::{FrameBuffer, HostDevice, InputLatch, NullDevice, NO_INPUT};
pub use memory::{FlatMemory, MemoryBus};
pub use memory_map::{MemoryLayout, MemoryMap};
pub use opcodes::{Instruction, InstructionSet, InstructionSetError, Mnemonic, STANDARD_OPCODES};
pub use simulator::Simulator;
pub use storage::{Storage, PROGRAM_ORIGIN, STACK_BASE};

/// Errors that can occur during execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The fetched byte is not in the instruction set.
    ///
    /// `pc` is the address the opcode was fetched from.
    #[error("unknown opcode 0x{opcode:02X} at 0x{pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// An instruction that writes or jumps received an operand with no address.
    ///
    /// `InstructionSet` validation rules this out for every table it builds.
    /// `pc` is the address the opcode was fetched from.
    #[error("{mnemonic} at 0x{pc:04X} requires an address operand")]
    MissingAddress { mnemonic: Mnemonic, pc: u16 },
}
