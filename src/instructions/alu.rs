//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical and compare operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Compare a register against memory
//! - BIT: Test accumulator bits against memory
//!
//! Arithmetic is binary only; decimal mode is not modelled.

use super::operand_value;
use crate::addressing::Reference;
use crate::{Cpu, MemoryBus, Register, Storage};

/// Executes the ADC (Add with Carry) instruction.
///
/// A = A + M + C.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned sum exceeds 0xFF
/// - Zero (Z), Negative (N): From the stored result
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    let carry_in = cpu.flag_c() as u16;

    let sum = cpu.a() as u16 + value as u16 + carry_in;

    cpu.carry_if(sum > 0xFF);
    cpu.set(Register::A, sum);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// A = A - M - (1 - C). Carry acts as an inverted borrow: it is set when the
/// subtraction did not need to borrow.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    let borrow = (!cpu.flag_c()) as i16;

    let difference = cpu.a() as i16 - value as i16 - borrow;

    cpu.carry_if(difference >= 0);
    cpu.set(Register::A, (difference & 0xFF) as u16);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.set(Register::A, cpu.a() & value);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.set(Register::A, cpu.a() | value);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.set(Register::A, cpu.a() ^ value);
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if A >= M
/// - Zero (Z): Set if A = M
/// - Negative (N): Bit 7 of (A - M)
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.compare(Register::A, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.compare(Register::X, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.compare(Register::Y, value);
}

/// Executes the BIT (Bit Test) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A & M = 0
/// - Negative (N): Bit 7 of M
///
/// Bit 6 of M would go to the overflow flag, which is not modelled.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>, reference: Reference) {
    let value = operand_value(cpu, storage, reference);
    cpu.bit_test(value);
}
