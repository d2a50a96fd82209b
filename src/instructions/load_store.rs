//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//!
//! Loads go through `Cpu::set`, so Z and N always follow the loaded byte.
//! Stores leave every flag alone.

use super::{operand_value, target_address, MissingAddress};
use crate::addressing::Reference;
use crate::opcodes::Mnemonic;
use crate::{Cpu, MemoryBus, Register, Storage};

fn load<M: MemoryBus>(
    register: Register,
    cpu: &mut Cpu,
    storage: &Storage<M>,
    reference: Reference,
) {
    let value = operand_value(cpu, storage, reference);
    cpu.set(register, value);
}

fn store<M: MemoryBus>(
    mnemonic: Mnemonic,
    register: Register,
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    let addr = target_address(mnemonic, reference)?;
    storage.set(addr, cpu.get(register));
    Ok(())
}

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Carry (C): Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    load(Register::A, cpu, storage, reference);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    load(Register::X, cpu, storage, reference);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    load(Register::Y, cpu, storage, reference);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Writes A to the effective address. A write into the display range is
/// forwarded to the host by the memory map; nothing here needs to know.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    store(Mnemonic::Sta, Register::A, cpu, storage, reference)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    store(Mnemonic::Stx, Register::X, cpu, storage, reference)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    store(Mnemonic::Sty, Register::Y, cpu, storage, reference)
}
