//! Property-based tests for CPU invariants.
//!
//! Every register write recomputes Z and N, and every instruction that stores
//! a result keeps the flags consistent with that result.

use std::sync::Arc;

use proptest::prelude::*;
use sim6502::{Cpu, FlatMemory, InstructionSet, Mnemonic, Register, Simulator};

fn setup_simulator(program: &[u8]) -> Simulator<FlatMemory> {
    let mut sim = Simulator::new(FlatMemory::new(), Arc::new(InstructionSet::standard()));
    sim.load_program(program);
    sim
}

fn register() -> impl Strategy<Value = Register> {
    prop_oneof![Just(Register::A), Just(Register::X), Just(Register::Y)]
}

/// Opcodes whose result lands in a register, with their target register
fn register_writers() -> Vec<(u8, Register)> {
    InstructionSet::standard()
        .iter()
        .filter_map(|(opcode, instruction)| {
            let target = match instruction.mnemonic {
                Mnemonic::Lda
                | Mnemonic::Adc
                | Mnemonic::Sbc
                | Mnemonic::And
                | Mnemonic::Ora
                | Mnemonic::Eor
                | Mnemonic::Pla
                | Mnemonic::Txa
                | Mnemonic::Tya => Register::A,
                Mnemonic::Ldx | Mnemonic::Inx | Mnemonic::Dex | Mnemonic::Tax | Mnemonic::Tsx => {
                    Register::X
                }
                Mnemonic::Ldy | Mnemonic::Iny | Mnemonic::Dey | Mnemonic::Tay => Register::Y,
                _ => return None,
            };
            Some((opcode, target))
        })
        .collect()
}

proptest! {
    /// Register writes are masked and Z/N reflect the stored byte.
    #[test]
    fn prop_set_updates_zero_and_negative(register in register(), value in any::<u16>()) {
        let mut cpu = Cpu::new();
        cpu.set(register, value);

        let stored = cpu.get(register);
        prop_assert_eq!(stored as u16, value & 0xFF);
        prop_assert_eq!(cpu.flag_z(), stored == 0);
        prop_assert_eq!(cpu.flag_n(), stored & 0x80 != 0);
    }

    /// Compare never writes the register and sets C on >=.
    #[test]
    fn prop_compare_flags(register in register(), value in any::<u8>(), operand in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.set(register, value);
        cpu.compare(register, operand);

        let diff = value.wrapping_sub(operand);
        prop_assert_eq!(cpu.get(register), value);
        prop_assert_eq!(cpu.flag_c(), value >= operand);
        prop_assert_eq!(cpu.flag_z(), diff == 0);
        prop_assert_eq!(cpu.flag_n(), diff & 0x80 != 0);
    }

    /// After any register-writing instruction, Z and N describe the register.
    #[test]
    fn prop_register_writers_keep_flags_consistent(
        index in any::<prop::sample::Index>(),
        operand_lo in any::<u8>(),
        operand_hi in any::<u8>(),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        fill in any::<u8>(),
    ) {
        let writers = register_writers();
        let (opcode, target) = writers[index.index(writers.len())];

        let mut sim = setup_simulator(&[opcode, operand_lo, operand_hi]);
        // Whatever the operand resolves to outside the program reads `fill`
        for addr in 0x0000u16..0x0600 {
            sim.storage_mut().set(addr, fill);
        }
        sim.cpu_mut().set(Register::A, a);
        sim.cpu_mut().set(Register::X, x);
        sim.cpu_mut().set(Register::Y, y);

        sim.step().unwrap();

        let value = sim.cpu().get(target);
        prop_assert_eq!(sim.cpu().flag_z(), value == 0);
        prop_assert_eq!(sim.cpu().flag_n(), value & 0x80 != 0);
    }

    /// BIT derives Z from A & M and N from M, and writes nothing.
    #[test]
    fn prop_bit_flags(a in any::<u8>(), operand in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = Cpu::new();
        cpu.set(Register::A, a);
        cpu.carry_if(carry);
        cpu.bit_test(operand);

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), carry);
        prop_assert_eq!(cpu.flag_z(), a & operand == 0);
        prop_assert_eq!(cpu.flag_n(), operand & 0x80 != 0);
    }

    /// ADC with a clear carry matches plain 9-bit addition.
    #[test]
    fn prop_adc_matches_wide_addition(a in any::<u8>(), operand in any::<u8>(), carry in any::<bool>()) {
        // SEC/CLC, ADC #operand
        let carry_op = if carry { 0x38 } else { 0x18 };
        let mut sim = setup_simulator(&[carry_op, 0x69, operand]);
        sim.cpu_mut().set(Register::A, a);
        sim.run_for(2).unwrap();

        let sum = a as u16 + operand as u16 + carry as u16;
        prop_assert_eq!(sim.cpu().a() as u16, sum & 0xFF);
        prop_assert_eq!(sim.cpu().flag_c(), sum > 0xFF);
    }

    /// SBC with carry set matches subtraction; C means no borrow.
    #[test]
    fn prop_sbc_matches_subtraction(a in any::<u8>(), operand in any::<u8>()) {
        // SEC, SBC #operand
        let mut sim = setup_simulator(&[0x38, 0xE9, operand]);
        sim.cpu_mut().set(Register::A, a);
        sim.run_for(2).unwrap();

        prop_assert_eq!(sim.cpu().a(), a.wrapping_sub(operand));
        prop_assert_eq!(sim.cpu().flag_c(), a >= operand);
    }
}
