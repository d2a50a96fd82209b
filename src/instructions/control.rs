//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute or indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//!
//! BRK and NOP need no state changes of their own and are handled directly in
//! the dispatcher: BRK halts the simulator, NOP does nothing.

use super::{target_address, MissingAddress};
use crate::addressing::Reference;
use crate::opcodes::Mnemonic;
use crate::{MemoryBus, Storage};

/// Executes the JMP (Jump) instruction.
///
/// The indirect form has already been dereferenced by the resolver, including
/// the NMOS page-wrap behaviour, so both forms arrive here as a plain target.
pub(crate) fn execute_jmp<M: MemoryBus>(
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    let target = target_address(Mnemonic::Jmp, reference)?;
    storage.jump(target);
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the instruction after the JSR (high byte first),
/// then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    let target = target_address(Mnemonic::Jsr, reference)?;
    storage.jsr(target);
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// An RTS without a matching JSR returns to whatever the stack holds.
pub(crate) fn execute_rts<M: MemoryBus>(storage: &mut Storage<M>) {
    storage.rts();
}
