//! # Instruction Set
//!
//! This module holds the opcode table: a 256-entry lookup from opcode byte to
//! `(mnemonic, addressing mode)`. The table is built once, never mutated
//! afterwards, and shared with every `Simulator` through an `Arc`.
//!
//! The built-in table (`InstructionSet::standard`) covers the documented NMOS
//! opcodes whose behaviour depends only on the Carry, Zero and Negative flags.
//! BIT is included: its Z and N results are kept and its overflow output,
//! which nothing here can observe, is dropped.
//! Opcodes outside the table are rejected at execution time rather than
//! skipped, since skipping would leave the fetch stream pointing into the
//! middle of an instruction.
//!
//! Tables can also be assembled from external definitions with
//! `InstructionSet::from_definitions`, which validates every entry.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::addressing::AddressingMode;

/// Instruction mnemonics understood by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Clc,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Pla,
    Rol,
    Ror,
    Rts,
    Sbc,
    Sec,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// Broad operand shape of a mnemonic, used to validate table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandKind {
    /// Reads a value: immediate or any data address
    Read,
    /// Writes to a data address
    Store,
    /// Read-modify-write on memory
    Modify,
    /// Shifts: accumulator or memory
    Shift,
    /// Conditional branch
    Branch,
    /// Jump target
    Jump,
    /// Subroutine call target
    Call,
    /// Bit test against a plain zero-page or absolute address
    Test,
    /// No operand
    None,
}

impl Mnemonic {
    /// Every mnemonic, in alphabetical order.
    pub const ALL: [Mnemonic; 46] = [
        Mnemonic::Adc,
        Mnemonic::And,
        Mnemonic::Asl,
        Mnemonic::Bcc,
        Mnemonic::Bcs,
        Mnemonic::Beq,
        Mnemonic::Bit,
        Mnemonic::Bmi,
        Mnemonic::Bne,
        Mnemonic::Bpl,
        Mnemonic::Brk,
        Mnemonic::Clc,
        Mnemonic::Cmp,
        Mnemonic::Cpx,
        Mnemonic::Cpy,
        Mnemonic::Dec,
        Mnemonic::Dex,
        Mnemonic::Dey,
        Mnemonic::Eor,
        Mnemonic::Inc,
        Mnemonic::Inx,
        Mnemonic::Iny,
        Mnemonic::Jmp,
        Mnemonic::Jsr,
        Mnemonic::Lda,
        Mnemonic::Ldx,
        Mnemonic::Ldy,
        Mnemonic::Lsr,
        Mnemonic::Nop,
        Mnemonic::Ora,
        Mnemonic::Pha,
        Mnemonic::Pla,
        Mnemonic::Rol,
        Mnemonic::Ror,
        Mnemonic::Rts,
        Mnemonic::Sbc,
        Mnemonic::Sec,
        Mnemonic::Sta,
        Mnemonic::Stx,
        Mnemonic::Sty,
        Mnemonic::Tax,
        Mnemonic::Tay,
        Mnemonic::Tsx,
        Mnemonic::Txa,
        Mnemonic::Txs,
        Mnemonic::Tya,
    ];

    /// Three-letter upper-case name, e.g. `"LDA"`.
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Pla => "PLA",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    fn operand_kind(self) -> OperandKind {
        use Mnemonic::*;
        match self {
            Adc | And | Cmp | Cpx | Cpy | Eor | Lda | Ldx | Ldy | Ora | Sbc => OperandKind::Read,
            Sta | Stx | Sty => OperandKind::Store,
            Dec | Inc => OperandKind::Modify,
            Asl | Lsr | Rol | Ror => OperandKind::Shift,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl => OperandKind::Branch,
            Jmp => OperandKind::Jump,
            Jsr => OperandKind::Call,
            Bit => OperandKind::Test,
            Brk | Clc | Dex | Dey | Inx | Iny | Nop | Pha | Pla | Rts | Sec | Tax | Tay | Tsx
            | Txa | Txs | Tya => OperandKind::None,
        }
    }

    /// Whether `mode` makes sense for this mnemonic.
    pub fn supports(self, mode: AddressingMode) -> bool {
        use AddressingMode as Mode;
        let data_address = mode.is_addressed() && !matches!(mode, Mode::Relative | Mode::Indirect);
        match self.operand_kind() {
            OperandKind::Read => mode == Mode::Immediate || data_address,
            OperandKind::Store | OperandKind::Modify => data_address,
            OperandKind::Shift => mode == Mode::Accumulator || data_address,
            OperandKind::Branch => mode == Mode::Relative,
            OperandKind::Jump => matches!(mode, Mode::Absolute | Mode::Indirect),
            OperandKind::Call => mode == Mode::Absolute,
            OperandKind::Test => matches!(mode, Mode::ZeroPage | Mode::Absolute),
            OperandKind::None => mode == Mode::Implicit,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mnemonic {
    type Err = InstructionSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InstructionSetError::UnknownMnemonic(s.to_string()))
    }
}

/// Decoded form of one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// What the instruction does
    pub mnemonic: Mnemonic,

    /// How its operand bytes are interpreted
    pub mode: AddressingMode,
}

impl Instruction {
    /// Total instruction size in bytes (opcode + operands).
    pub fn size_bytes(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

/// Errors raised while building an `InstructionSet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionSetError {
    /// Two definitions claim the same opcode byte.
    #[error("opcode 0x{opcode:02X} defined twice (already {existing})")]
    DuplicateOpcode { opcode: u8, existing: Mnemonic },

    /// The mnemonic cannot take this addressing mode.
    #[error("{mnemonic} does not support {mode:?} addressing (opcode 0x{opcode:02X})")]
    UnsupportedMode {
        opcode: u8,
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },

    /// A mnemonic name that is not in the instruction set.
    #[error("unknown mnemonic {0:?}")]
    UnknownMnemonic(String),
}

/// Immutable opcode lookup table.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, InstructionSet, Mnemonic};
///
/// let set = InstructionSet::standard();
/// let lda = set.get(0xA9).unwrap();
/// assert_eq!(lda.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda.mode, AddressingMode::Immediate);
///
/// // Not part of the table
/// assert!(set.get(0x02).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InstructionSet {
    table: [Option<Instruction>; 256],
}

impl InstructionSet {
    /// Builds the standard table from `STANDARD_OPCODES`.
    pub fn standard() -> Self {
        let mut table = [None; 256];
        for &(opcode, mnemonic, mode) in STANDARD_OPCODES {
            table[opcode as usize] = Some(Instruction { mnemonic, mode });
        }
        debug!("standard instruction set: {} opcodes", STANDARD_OPCODES.len());
        Self { table }
    }

    /// Builds a table from external `(opcode, mnemonic, mode)` definitions.
    ///
    /// Fails on a duplicated opcode or on a mode the mnemonic cannot take.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, InstructionSetError>
    where
        I: IntoIterator<Item = (u8, Mnemonic, AddressingMode)>,
    {
        let mut table: [Option<Instruction>; 256] = [None; 256];
        let mut count = 0usize;

        for (opcode, mnemonic, mode) in definitions {
            if let Some(existing) = table[opcode as usize] {
                return Err(InstructionSetError::DuplicateOpcode {
                    opcode,
                    existing: existing.mnemonic,
                });
            }
            if !mnemonic.supports(mode) {
                return Err(InstructionSetError::UnsupportedMode {
                    opcode,
                    mnemonic,
                    mode,
                });
            }
            table[opcode as usize] = Some(Instruction { mnemonic, mode });
            count += 1;
        }

        debug!("instruction set built from {} definitions", count);
        Ok(Self { table })
    }

    /// Installs an entry without validating it.
    #[cfg(test)]
    pub(crate) fn with_unchecked(
        mut self,
        opcode: u8,
        mnemonic: Mnemonic,
        mode: AddressingMode,
    ) -> Self {
        self.table[opcode as usize] = Some(Instruction { mnemonic, mode });
        self
    }

    /// Looks up the instruction for `opcode`.
    pub fn get(&self, opcode: u8) -> Option<Instruction> {
        self.table[opcode as usize]
    }

    /// Number of defined opcodes.
    pub fn len(&self) -> usize {
        self.table.iter().filter(|entry| entry.is_some()).count()
    }

    /// Whether the table defines no opcodes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(opcode, instruction)` for every defined opcode.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Instruction)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(opcode, entry)| entry.map(|instr| (opcode as u8, instr)))
    }
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::standard()
    }
}

use crate::addressing::AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Accumulator as ACC, Immediate as IMM,
    Implicit as IMP, Indirect as IND, IndirectX as IZX, IndirectY as IZY, Relative as REL,
    ZeroPage as ZP0, ZeroPageX as ZPX, ZeroPageY as ZPY,
};

/// Documented NMOS opcodes that need only C, Z and N (BIT without V).
pub const STANDARD_OPCODES: &[(u8, Mnemonic, AddressingMode)] = &[
    // Loads
    (0xA9, Mnemonic::Lda, IMM),
    (0xA5, Mnemonic::Lda, ZP0),
    (0xB5, Mnemonic::Lda, ZPX),
    (0xAD, Mnemonic::Lda, ABS),
    (0xBD, Mnemonic::Lda, ABX),
    (0xB9, Mnemonic::Lda, ABY),
    (0xA1, Mnemonic::Lda, IZX),
    (0xB1, Mnemonic::Lda, IZY),
    (0xA2, Mnemonic::Ldx, IMM),
    (0xA6, Mnemonic::Ldx, ZP0),
    (0xB6, Mnemonic::Ldx, ZPY),
    (0xAE, Mnemonic::Ldx, ABS),
    (0xBE, Mnemonic::Ldx, ABY),
    (0xA0, Mnemonic::Ldy, IMM),
    (0xA4, Mnemonic::Ldy, ZP0),
    (0xB4, Mnemonic::Ldy, ZPX),
    (0xAC, Mnemonic::Ldy, ABS),
    (0xBC, Mnemonic::Ldy, ABX),
    // Stores
    (0x85, Mnemonic::Sta, ZP0),
    (0x95, Mnemonic::Sta, ZPX),
    (0x8D, Mnemonic::Sta, ABS),
    (0x9D, Mnemonic::Sta, ABX),
    (0x99, Mnemonic::Sta, ABY),
    (0x81, Mnemonic::Sta, IZX),
    (0x91, Mnemonic::Sta, IZY),
    (0x86, Mnemonic::Stx, ZP0),
    (0x96, Mnemonic::Stx, ZPY),
    (0x8E, Mnemonic::Stx, ABS),
    (0x84, Mnemonic::Sty, ZP0),
    (0x94, Mnemonic::Sty, ZPX),
    (0x8C, Mnemonic::Sty, ABS),
    // Arithmetic and logic
    (0x69, Mnemonic::Adc, IMM),
    (0x65, Mnemonic::Adc, ZP0),
    (0x75, Mnemonic::Adc, ZPX),
    (0x6D, Mnemonic::Adc, ABS),
    (0x7D, Mnemonic::Adc, ABX),
    (0x79, Mnemonic::Adc, ABY),
    (0x61, Mnemonic::Adc, IZX),
    (0x71, Mnemonic::Adc, IZY),
    (0xE9, Mnemonic::Sbc, IMM),
    (0xE5, Mnemonic::Sbc, ZP0),
    (0xF5, Mnemonic::Sbc, ZPX),
    (0xED, Mnemonic::Sbc, ABS),
    (0xFD, Mnemonic::Sbc, ABX),
    (0xF9, Mnemonic::Sbc, ABY),
    (0xE1, Mnemonic::Sbc, IZX),
    (0xF1, Mnemonic::Sbc, IZY),
    (0x29, Mnemonic::And, IMM),
    (0x25, Mnemonic::And, ZP0),
    (0x35, Mnemonic::And, ZPX),
    (0x2D, Mnemonic::And, ABS),
    (0x3D, Mnemonic::And, ABX),
    (0x39, Mnemonic::And, ABY),
    (0x21, Mnemonic::And, IZX),
    (0x31, Mnemonic::And, IZY),
    (0x09, Mnemonic::Ora, IMM),
    (0x05, Mnemonic::Ora, ZP0),
    (0x15, Mnemonic::Ora, ZPX),
    (0x0D, Mnemonic::Ora, ABS),
    (0x1D, Mnemonic::Ora, ABX),
    (0x19, Mnemonic::Ora, ABY),
    (0x01, Mnemonic::Ora, IZX),
    (0x11, Mnemonic::Ora, IZY),
    (0x49, Mnemonic::Eor, IMM),
    (0x45, Mnemonic::Eor, ZP0),
    (0x55, Mnemonic::Eor, ZPX),
    (0x4D, Mnemonic::Eor, ABS),
    (0x5D, Mnemonic::Eor, ABX),
    (0x59, Mnemonic::Eor, ABY),
    (0x41, Mnemonic::Eor, IZX),
    (0x51, Mnemonic::Eor, IZY),
    // Compares
    (0xC9, Mnemonic::Cmp, IMM),
    (0xC5, Mnemonic::Cmp, ZP0),
    (0xD5, Mnemonic::Cmp, ZPX),
    (0xCD, Mnemonic::Cmp, ABS),
    (0xDD, Mnemonic::Cmp, ABX),
    (0xD9, Mnemonic::Cmp, ABY),
    (0xC1, Mnemonic::Cmp, IZX),
    (0xD1, Mnemonic::Cmp, IZY),
    (0xE0, Mnemonic::Cpx, IMM),
    (0xE4, Mnemonic::Cpx, ZP0),
    (0xEC, Mnemonic::Cpx, ABS),
    (0xC0, Mnemonic::Cpy, IMM),
    (0xC4, Mnemonic::Cpy, ZP0),
    (0xCC, Mnemonic::Cpy, ABS),
    // Bit test
    (0x24, Mnemonic::Bit, ZP0),
    (0x2C, Mnemonic::Bit, ABS),
    // Increments and decrements
    (0xE6, Mnemonic::Inc, ZP0),
    (0xF6, Mnemonic::Inc, ZPX),
    (0xEE, Mnemonic::Inc, ABS),
    (0xFE, Mnemonic::Inc, ABX),
    (0xC6, Mnemonic::Dec, ZP0),
    (0xD6, Mnemonic::Dec, ZPX),
    (0xCE, Mnemonic::Dec, ABS),
    (0xDE, Mnemonic::Dec, ABX),
    (0xE8, Mnemonic::Inx, IMP),
    (0xC8, Mnemonic::Iny, IMP),
    (0xCA, Mnemonic::Dex, IMP),
    (0x88, Mnemonic::Dey, IMP),
    // Shifts and rotates
    (0x0A, Mnemonic::Asl, ACC),
    (0x06, Mnemonic::Asl, ZP0),
    (0x16, Mnemonic::Asl, ZPX),
    (0x0E, Mnemonic::Asl, ABS),
    (0x1E, Mnemonic::Asl, ABX),
    (0x4A, Mnemonic::Lsr, ACC),
    (0x46, Mnemonic::Lsr, ZP0),
    (0x56, Mnemonic::Lsr, ZPX),
    (0x4E, Mnemonic::Lsr, ABS),
    (0x5E, Mnemonic::Lsr, ABX),
    (0x2A, Mnemonic::Rol, ACC),
    (0x26, Mnemonic::Rol, ZP0),
    (0x36, Mnemonic::Rol, ZPX),
    (0x2E, Mnemonic::Rol, ABS),
    (0x3E, Mnemonic::Rol, ABX),
    (0x6A, Mnemonic::Ror, ACC),
    (0x66, Mnemonic::Ror, ZP0),
    (0x76, Mnemonic::Ror, ZPX),
    (0x6E, Mnemonic::Ror, ABS),
    (0x7E, Mnemonic::Ror, ABX),
    // Branches
    (0x90, Mnemonic::Bcc, REL),
    (0xB0, Mnemonic::Bcs, REL),
    (0xF0, Mnemonic::Beq, REL),
    (0xD0, Mnemonic::Bne, REL),
    (0x30, Mnemonic::Bmi, REL),
    (0x10, Mnemonic::Bpl, REL),
    // Control flow
    (0x4C, Mnemonic::Jmp, ABS),
    (0x6C, Mnemonic::Jmp, IND),
    (0x20, Mnemonic::Jsr, ABS),
    (0x60, Mnemonic::Rts, IMP),
    (0x00, Mnemonic::Brk, IMP),
    (0xEA, Mnemonic::Nop, IMP),
    // Stack
    (0x48, Mnemonic::Pha, IMP),
    (0x68, Mnemonic::Pla, IMP),
    // Flags
    (0x18, Mnemonic::Clc, IMP),
    (0x38, Mnemonic::Sec, IMP),
    // Transfers
    (0xAA, Mnemonic::Tax, IMP),
    (0xA8, Mnemonic::Tay, IMP),
    (0x8A, Mnemonic::Txa, IMP),
    (0x98, Mnemonic::Tya, IMP),
    (0xBA, Mnemonic::Tsx, IMP),
    (0x9A, Mnemonic::Txs, IMP),
];
