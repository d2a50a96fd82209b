//! # Instruction Semantics
//!
//! This module contains the semantic action of every mnemonic, organized by
//! category. Each action is a standalone function that receives the CPU, the
//! storage and the already-resolved `Reference`; operand bytes have been
//! consumed before it runs, so an action never touches the fetch stream
//! except to jump.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic, compares and bit test (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branches (BCC, BCS, BEQ, BNE, BMI, BPL)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, BRK, NOP)
//! - **stack**: Stack operations (PHA, PLA)
//! - **flags**: Carry manipulation (CLC, SEC)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

use crate::addressing::Reference;
use crate::opcodes::Mnemonic;
use crate::{Cpu, MemoryBus, Storage};

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

/// What the simulator should do after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

/// Runs the semantic action for `mnemonic`.
pub(crate) fn execute<M: MemoryBus>(
    mnemonic: Mnemonic,
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<Flow, MissingAddress> {
    match mnemonic {
        Mnemonic::Lda => load_store::execute_lda(cpu, storage, reference),
        Mnemonic::Ldx => load_store::execute_ldx(cpu, storage, reference),
        Mnemonic::Ldy => load_store::execute_ldy(cpu, storage, reference),
        Mnemonic::Sta => load_store::execute_sta(cpu, storage, reference)?,
        Mnemonic::Stx => load_store::execute_stx(cpu, storage, reference)?,
        Mnemonic::Sty => load_store::execute_sty(cpu, storage, reference)?,

        Mnemonic::Adc => alu::execute_adc(cpu, storage, reference),
        Mnemonic::Sbc => alu::execute_sbc(cpu, storage, reference),
        Mnemonic::And => alu::execute_and(cpu, storage, reference),
        Mnemonic::Ora => alu::execute_ora(cpu, storage, reference),
        Mnemonic::Eor => alu::execute_eor(cpu, storage, reference),
        Mnemonic::Cmp => alu::execute_cmp(cpu, storage, reference),
        Mnemonic::Cpx => alu::execute_cpx(cpu, storage, reference),
        Mnemonic::Cpy => alu::execute_cpy(cpu, storage, reference),
        Mnemonic::Bit => alu::execute_bit(cpu, storage, reference),

        Mnemonic::Inc => inc_dec::execute_inc(cpu, storage, reference)?,
        Mnemonic::Dec => inc_dec::execute_dec(cpu, storage, reference)?,
        Mnemonic::Inx => inc_dec::execute_inx(cpu),
        Mnemonic::Iny => inc_dec::execute_iny(cpu),
        Mnemonic::Dex => inc_dec::execute_dex(cpu),
        Mnemonic::Dey => inc_dec::execute_dey(cpu),

        Mnemonic::Asl => shifts::execute_asl(cpu, storage, reference),
        Mnemonic::Lsr => shifts::execute_lsr(cpu, storage, reference),
        Mnemonic::Rol => shifts::execute_rol(cpu, storage, reference),
        Mnemonic::Ror => shifts::execute_ror(cpu, storage, reference),

        Mnemonic::Bcc => branches::execute_bcc(cpu, storage, reference)?,
        Mnemonic::Bcs => branches::execute_bcs(cpu, storage, reference)?,
        Mnemonic::Beq => branches::execute_beq(cpu, storage, reference)?,
        Mnemonic::Bne => branches::execute_bne(cpu, storage, reference)?,
        Mnemonic::Bmi => branches::execute_bmi(cpu, storage, reference)?,
        Mnemonic::Bpl => branches::execute_bpl(cpu, storage, reference)?,

        Mnemonic::Jmp => control::execute_jmp(storage, reference)?,
        Mnemonic::Jsr => control::execute_jsr(storage, reference)?,
        Mnemonic::Rts => control::execute_rts(storage),
        Mnemonic::Nop => {}
        Mnemonic::Brk => return Ok(Flow::Halt),

        Mnemonic::Pha => stack::execute_pha(cpu, storage),
        Mnemonic::Pla => stack::execute_pla(cpu, storage),

        Mnemonic::Clc => flags::execute_clc(cpu),
        Mnemonic::Sec => flags::execute_sec(cpu),

        Mnemonic::Tax => transfer::execute_tax(cpu),
        Mnemonic::Tay => transfer::execute_tay(cpu),
        Mnemonic::Txa => transfer::execute_txa(cpu),
        Mnemonic::Tya => transfer::execute_tya(cpu),
        Mnemonic::Tsx => transfer::execute_tsx(cpu, storage),
        Mnemonic::Txs => transfer::execute_txs(cpu, storage),
    }

    Ok(Flow::Continue)
}

/// Reads the value an instruction operates on.
///
/// Immediate references carry the value, addresses are read through the bus,
/// and an implied reference means the accumulator.
pub(crate) fn operand_value<M: MemoryBus>(
    cpu: &Cpu,
    storage: &Storage<M>,
    reference: Reference,
) -> u8 {
    match reference {
        Reference::Immediate(value) => value,
        Reference::Address(addr) => storage.get(addr),
        Reference::Implied => cpu.a(),
    }
}

/// An action that writes or jumps was handed a reference with no address.
///
/// The simulator turns this into `ExecutionError::MissingAddress` once it
/// knows where the instruction was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MissingAddress(pub(crate) Mnemonic);

/// Returns the address an instruction needs to write to or jump to.
pub(crate) fn target_address(
    mnemonic: Mnemonic,
    reference: Reference,
) -> Result<u16, MissingAddress> {
    reference.address().ok_or(MissingAddress(mnemonic))
}
