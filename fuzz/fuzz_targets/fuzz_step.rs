//! Fuzz target for single-instruction execution.
//!
//! Builds an arbitrary register state and memory contents, then executes one
//! instruction. Any opcode in the table must step without panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{NullDevice, Register, Simulator};

/// Arbitrary register state
#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    carry: bool,
}

/// Memory regions the operand can land in
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Opcode and operand bytes at the program origin
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
    seed: u64,
}

fuzz_target!(|input: FuzzInput| {
    let mut sim = Simulator::with_seed(NullDevice, input.seed);

    sim.storage_mut().load(&input.memory.zero_page, 0x0000);
    sim.storage_mut().load(&input.memory.stack_page, 0x0100);
    sim.load_program(&input.memory.instruction_bytes);

    let cpu = sim.cpu_mut();
    cpu.set(Register::A, input.registers.a);
    cpu.set(Register::X, input.registers.x);
    cpu.set(Register::Y, input.registers.y);
    cpu.carry_if(input.registers.carry);
    sim.storage_mut().set_sp(input.registers.sp);

    let opcode = input.memory.instruction_bytes[0];
    let known = sim.instructions().get(opcode).is_some();

    // Unknown opcodes are errors, never panics
    let result = sim.step();
    assert_eq!(result.is_ok(), known);
});
