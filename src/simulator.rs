//! # Fetch-Decode-Execute Loop
//!
//! `Simulator` composes the CPU, the storage (memory, PC and SP) and a shared
//! instruction set into a machine that executes one instruction per `step`.
//!
//! ## Step
//!
//! 1. Fetch the opcode at PC (PC advances by one)
//! 2. Look it up in the instruction set, failing fast on unknown opcodes
//! 3. Resolve the addressing mode, consuming the operand bytes
//! 4. Run the mnemonic's action against the CPU and storage
//!
//! The whole machine state is (PC, SP, A, X, Y, C, Z, N, memory). A step is
//! deterministic apart from the random-source read and host I/O.
//!
//! ## Running
//!
//! - `run()`: step until a BRK executes or an error occurs
//! - `run_for(n)`: step at most `n` times, for hosts that pace execution
//!   against wall-clock time and feed input between batches

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::addressing::resolve;
use crate::host::HostDevice;
use crate::instructions::{self, Flow, MissingAddress};
use crate::memory_map::MemoryMap;
use crate::storage::PROGRAM_ORIGIN;
use crate::{Cpu, ExecutionError, InstructionSet, MemoryBus, Storage};

/// A 6502 machine: registers, storage and the instruction table.
///
/// # Examples
///
/// ```
/// use sim6502::{NullDevice, Simulator};
///
/// let mut sim = Simulator::with_device(NullDevice);
/// sim.load_program(&[
///     0xA9, 0x05, // LDA #$05
///     0x85, 0x10, // STA $10
///     0x00,       // BRK
/// ]);
///
/// sim.run().unwrap();
/// assert_eq!(sim.cpu().a(), 0x05);
/// assert_eq!(sim.peek(0x0010), 0x05);
/// assert!(sim.is_halted());
/// ```
pub struct Simulator<M: MemoryBus> {
    cpu: Cpu,
    storage: Storage<M>,
    instructions: Arc<InstructionSet>,
    halted: bool,
    steps: u64,
}

impl<M: MemoryBus> Simulator<M> {
    /// Creates a simulator over `memory` using a shared instruction table.
    pub fn new(memory: M, instructions: Arc<InstructionSet>) -> Self {
        Self {
            cpu: Cpu::new(),
            storage: Storage::new(memory),
            instructions,
            halted: false,
            steps: 0,
        }
    }

    /// Copies a flat program image to `origin` and points PC at it.
    pub fn load(&mut self, image: &[u8], origin: u16) {
        self.storage.load(image, origin);
        self.storage.jump(origin);
        self.halted = false;
        debug!("loaded {} bytes at 0x{:04X}", image.len(), origin);
    }

    /// Loads a program at the default origin (0x0600).
    pub fn load_program(&mut self, image: &[u8]) {
        self.load(image, PROGRAM_ORIGIN);
    }

    /// Executes exactly one instruction.
    ///
    /// # Errors
    ///
    /// `ExecutionError::UnknownOpcode` when the byte at PC is not in the
    /// instruction set. PC has moved past the offending byte by then; the
    /// error carries the address it was fetched from.
    /// `ExecutionError::MissingAddress` when the table pairs a storing or
    /// jumping mnemonic with a mode that yields no address. Both
    /// `InstructionSet` constructors reject such pairs.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let pc = self.storage.pc();
        let opcode = self.storage.next();

        let instruction = match self.instructions.get(opcode) {
            Some(instruction) => instruction,
            None => {
                warn!("unknown opcode 0x{:02X} at 0x{:04X}", opcode, pc);
                return Err(ExecutionError::UnknownOpcode { opcode, pc });
            }
        };

        let reference = resolve(instruction.mode, &self.cpu, &mut self.storage);

        trace!(
            "{:04X}  {:02X}  {} {:?}  A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{:02X}",
            pc,
            opcode,
            instruction.mnemonic,
            reference,
            self.cpu.a(),
            self.cpu.x(),
            self.cpu.y(),
            self.storage.sp(),
            self.cpu.status()
        );

        let flow = instructions::execute(
            instruction.mnemonic,
            &mut self.cpu,
            &mut self.storage,
            reference,
        )
        .map_err(|MissingAddress(mnemonic)| ExecutionError::MissingAddress { mnemonic, pc })?;

        self.steps += 1;
        self.halted = flow == Flow::Halt;
        if self.halted {
            debug!("halted at 0x{:04X} after {} steps", pc, self.steps);
        }

        Ok(())
    }

    /// Steps until a BRK executes. Returns the number of instructions run.
    ///
    /// There is no other stopping condition: a program that never reaches a
    /// BRK keeps this looping. Use `run_for` to bound it.
    pub fn run(&mut self) -> Result<u64, ExecutionError> {
        let start = self.steps;
        loop {
            self.step()?;
            if self.halted {
                return Ok(self.steps - start);
            }
        }
    }

    /// Steps at most `max_steps` times, stopping early on BRK.
    ///
    /// Returns the number of instructions run.
    pub fn run_for(&mut self, max_steps: u64) -> Result<u64, ExecutionError> {
        let start = self.steps;
        for _ in 0..max_steps {
            self.step()?;
            if self.halted {
                break;
            }
        }
        Ok(self.steps - start)
    }

    /// Whether the last executed instruction was BRK.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Total instructions executed since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns the CPU registers and flags.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the CPU mutably, for test setup.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Returns the storage (memory, PC, SP).
    pub fn storage(&self) -> &Storage<M> {
        &self.storage
    }

    /// Returns the storage mutably.
    pub fn storage_mut(&mut self) -> &mut Storage<M> {
        &mut self.storage
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.storage.pc()
    }

    /// Returns the stack pointer.
    pub fn sp(&self) -> u8 {
        self.storage.sp()
    }

    /// Reads memory without triggering I/O hooks.
    pub fn peek(&self, addr: u16) -> u8 {
        self.storage.peek(addr)
    }

    /// Returns the memory bus.
    pub fn memory(&self) -> &M {
        self.storage.memory()
    }

    /// Returns the memory bus mutably.
    pub fn memory_mut(&mut self) -> &mut M {
        self.storage.memory_mut()
    }

    /// Returns the shared instruction table.
    pub fn instructions(&self) -> &Arc<InstructionSet> {
        &self.instructions
    }
}

impl<D: HostDevice> Simulator<MemoryMap<D>> {
    /// Standard machine: default memory layout, standard instruction set and
    /// an OS-seeded random source.
    pub fn with_device(device: D) -> Self {
        Self::new(
            MemoryMap::new(device),
            Arc::new(InstructionSet::standard()),
        )
    }

    /// Standard machine with a seeded random source.
    pub fn with_seed(device: D, seed: u64) -> Self {
        Self::new(
            MemoryMap::with_seed(device, seed),
            Arc::new(InstructionSet::standard()),
        )
    }

    /// Returns the host device.
    pub fn device(&self) -> &D {
        self.memory().device()
    }
}
