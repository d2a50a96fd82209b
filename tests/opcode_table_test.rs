//! Opcode table tests: standard encodings, external definitions, and a
//! single-step smoke test of every defined opcode.

use std::sync::Arc;

use proptest::prelude::*;
use sim6502::{
    AddressingMode, FlatMemory, InstructionSet, InstructionSetError, Mnemonic, Simulator,
    STANDARD_OPCODES,
};

#[test]
fn test_well_known_encodings() {
    let set = InstructionSet::standard();
    let cases = [
        (0x00, Mnemonic::Brk, AddressingMode::Implicit),
        (0x0A, Mnemonic::Asl, AddressingMode::Accumulator),
        (0x24, Mnemonic::Bit, AddressingMode::ZeroPage),
        (0x2C, Mnemonic::Bit, AddressingMode::Absolute),
        (0x20, Mnemonic::Jsr, AddressingMode::Absolute),
        (0x4C, Mnemonic::Jmp, AddressingMode::Absolute),
        (0x6C, Mnemonic::Jmp, AddressingMode::Indirect),
        (0x81, Mnemonic::Sta, AddressingMode::IndirectX),
        (0x91, Mnemonic::Sta, AddressingMode::IndirectY),
        (0x96, Mnemonic::Stx, AddressingMode::ZeroPageY),
        (0xA9, Mnemonic::Lda, AddressingMode::Immediate),
        (0xBE, Mnemonic::Ldx, AddressingMode::AbsoluteY),
        (0xD0, Mnemonic::Bne, AddressingMode::Relative),
        (0xEA, Mnemonic::Nop, AddressingMode::Implicit),
        (0xFE, Mnemonic::Inc, AddressingMode::AbsoluteX),
    ];

    for (opcode, mnemonic, mode) in cases {
        let instruction = set
            .get(opcode)
            .unwrap_or_else(|| panic!("0x{opcode:02X} missing"));
        assert_eq!(instruction.mnemonic, mnemonic, "0x{opcode:02X}");
        assert_eq!(instruction.mode, mode, "0x{opcode:02X}");
    }
}

#[test]
fn test_unsupported_flags_are_absent() {
    let set = InstructionSet::standard();
    // BVC, BVS, CLV, SEI, PHP, PLP, RTI
    for opcode in [0x50, 0x70, 0xB8, 0x78, 0x08, 0x28, 0x40] {
        assert!(set.get(opcode).is_none(), "0x{opcode:02X} should be absent");
    }
}

#[test]
fn test_standard_matches_definition_list() {
    let set = InstructionSet::standard();
    assert_eq!(set.len(), STANDARD_OPCODES.len());
    for &(opcode, mnemonic, mode) in STANDARD_OPCODES {
        let instruction = set.get(opcode).unwrap();
        assert_eq!((instruction.mnemonic, instruction.mode), (mnemonic, mode));
    }
}

#[test]
fn test_custom_definitions_drive_execution() {
    // Only LDA #imm and BRK, with BRK moved to 0x01
    let set = InstructionSet::from_definitions([
        (0xA9, Mnemonic::Lda, AddressingMode::Immediate),
        (0x01, Mnemonic::Brk, AddressingMode::Implicit),
    ])
    .unwrap();
    assert_eq!(set.len(), 2);

    let mut sim = Simulator::new(FlatMemory::new(), Arc::new(set));
    sim.load_program(&[0xA9, 0x33, 0x01]);
    sim.run().unwrap();
    assert_eq!(sim.cpu().a(), 0x33);

    // 0x00 is not BRK in this table
    sim.load_program(&[0x00]);
    assert!(sim.step().is_err());
}

#[test]
fn test_definitions_parsed_from_text() {
    let text = "A9 LDA\nE8 inx\n00 BRK";
    let definitions = text.lines().map(|line| {
        let (opcode, name) = line.split_once(' ').unwrap();
        let mnemonic: Mnemonic = name.parse().unwrap();
        let mode = match mnemonic {
            Mnemonic::Lda => AddressingMode::Immediate,
            _ => AddressingMode::Implicit,
        };
        (u8::from_str_radix(opcode, 16).unwrap(), mnemonic, mode)
    });

    let set = InstructionSet::from_definitions(definitions).unwrap();
    assert_eq!(set.get(0xE8).map(|i| i.mnemonic), Some(Mnemonic::Inx));
}

#[test]
fn test_invalid_definitions_rejected() {
    assert_eq!(
        InstructionSet::from_definitions([
            (0xEA, Mnemonic::Nop, AddressingMode::Implicit),
            (0xEA, Mnemonic::Inx, AddressingMode::Implicit),
        ])
        .unwrap_err(),
        InstructionSetError::DuplicateOpcode {
            opcode: 0xEA,
            existing: Mnemonic::Nop
        }
    );

    assert!(matches!(
        InstructionSet::from_definitions([(0x4C, Mnemonic::Jmp, AddressingMode::Immediate)]),
        Err(InstructionSetError::UnsupportedMode { .. })
    ));

    assert_eq!(
        "XYZ".parse::<Mnemonic>(),
        Err(InstructionSetError::UnknownMnemonic("XYZ".to_string()))
    );
}

fn straight_line(mnemonic: Mnemonic) -> bool {
    !matches!(
        mnemonic,
        Mnemonic::Bcc
            | Mnemonic::Bcs
            | Mnemonic::Beq
            | Mnemonic::Bmi
            | Mnemonic::Bne
            | Mnemonic::Bpl
            | Mnemonic::Jmp
            | Mnemonic::Jsr
            | Mnemonic::Rts
    )
}

proptest! {
    /// Every defined opcode executes one step without error, and
    /// straight-line instructions advance PC by their size.
    #[test]
    fn prop_every_opcode_steps(index in 0..STANDARD_OPCODES.len(), lo in any::<u8>(), hi in any::<u8>(), fill in any::<u8>()) {
        let (opcode, mnemonic, mode) = STANDARD_OPCODES[index];
        let mut sim = Simulator::new(FlatMemory::new(), Arc::new(InstructionSet::standard()));
        for addr in 0x0000u16..0x0600 {
            sim.storage_mut().set(addr, fill);
        }
        sim.load_program(&[opcode, lo, hi]);

        prop_assert!(sim.step().is_ok());
        if straight_line(mnemonic) {
            prop_assert_eq!(sim.pc(), 0x0601 + mode.operand_bytes() as u16);
        }
        prop_assert_eq!(sim.is_halted(), mnemonic == Mnemonic::Brk);
    }
}
