//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PLA: Pull Accumulator from Stack
//!
//! The stack lives in page 0x0100-0x01FF and is managed by `Storage`. SP wraps
//! silently on overflow and underflow.

use crate::{Cpu, MemoryBus, Register, Storage};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Flags affected: None
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &Cpu, storage: &mut Storage<M>) {
    storage.push(cpu.a());
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Z and N follow the pulled value.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu, storage: &mut Storage<M>) {
    let value = storage.pull();
    cpu.set(Register::A, value);
}
