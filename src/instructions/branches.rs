//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC / BCS: Branch on Carry clear / set
//! - BNE / BEQ: Branch on Zero clear / set
//! - BPL / BMI: Branch on Negative clear / set
//!
//! All branches use relative addressing. The resolver has already turned the
//! signed offset into an absolute target, so a branch is just
//! `Storage::branch` with the right predicate. A branch not taken leaves PC
//! on the next instruction.

use super::{target_address, MissingAddress};
use crate::addressing::Reference;
use crate::opcodes::Mnemonic;
use crate::{Cpu, MemoryBus, Storage};

fn branch<M: MemoryBus>(
    mnemonic: Mnemonic,
    condition: bool,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    let target = target_address(mnemonic, reference)?;
    storage.branch(condition, target);
    Ok(())
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Bcc, !cpu.flag_c(), storage, reference)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Bcs, cpu.flag_c(), storage, reference)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Beq, cpu.flag_z(), storage, reference)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Bne, !cpu.flag_z(), storage, reference)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Bmi, cpu.flag_n(), storage, reference)
}

/// Executes the BPL (Branch if Positive) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    branch(Mnemonic::Bpl, !cpu.flag_n(), storage, reference)
}
