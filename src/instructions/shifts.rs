//! # Shift and Rotate Instructions
//!
//! This module implements the shift family:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator (implied reference) or on memory. The bit
//! shifted out lands in Carry; Z and N follow the result.

use crate::addressing::Reference;
use crate::{Cpu, MemoryBus, Register, Storage};

/// Applies `op` to A or to the addressed byte.
///
/// `op` receives the old value and the incoming carry and returns the result
/// together with the outgoing carry.
fn shift<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) {
    let carry_in = cpu.flag_c();

    match reference {
        Reference::Address(addr) => {
            let (result, carry_out) = op(storage.get(addr), carry_in);
            storage.set(addr, result);
            cpu.carry_if(carry_out);
            cpu.update_zero_and_negative(result);
        }
        Reference::Implied | Reference::Immediate(_) => {
            let (result, carry_out) = op(cpu.a(), carry_in);
            cpu.carry_if(carry_out);
            cpu.set(Register::A, result);
        }
    }
}

pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) {
    shift(cpu, storage, reference, |value, _| {
        (value << 1, value & 0x80 != 0)
    });
}

pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) {
    shift(cpu, storage, reference, |value, _| {
        (value >> 1, value & 0x01 != 0)
    });
}

pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) {
    shift(cpu, storage, reference, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) {
    shift(cpu, storage, reference, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
