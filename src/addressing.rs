//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolver
//! that turns the operand bytes following an opcode into a `Reference`.
//!
//! Resolution consumes exactly `mode.operand_bytes()` bytes from the fetch
//! stream before any instruction semantics run. Getting this count wrong
//! desynchronizes every later fetch, so it is the one contract the rest of the
//! simulator leans on.

use crate::memory::int16;
use crate::{Cpu, MemoryBus, Storage};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset from the address of the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC)
    /// Only used by JMP instruction.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Whether the mode produces a concrete memory address.
    pub fn is_addressed(self) -> bool {
        !matches!(
            self,
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Immediate
        )
    }
}

/// The outcome of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// No address. Accumulator-mode instructions act on A.
    Implied,

    /// The operand byte itself (immediate mode).
    Immediate(u8),

    /// An effective address to read or write through the bus.
    Address(u16),
}

impl Reference {
    /// Returns the effective address, if the reference has one.
    pub fn address(self) -> Option<u16> {
        match self {
            Reference::Address(addr) => Some(addr),
            Reference::Implied | Reference::Immediate(_) => None,
        }
    }
}

/// Consumes the operand bytes for `mode` and computes its `Reference`.
///
/// # Examples
///
/// ```
/// use sim6502::{resolve, AddressingMode, Cpu, FlatMemory, Reference, Storage};
///
/// let mut storage = Storage::new(FlatMemory::new());
/// storage.load(&[0x37, 0x13], 0x0600);
///
/// let reference = resolve(AddressingMode::Absolute, &Cpu::new(), &mut storage);
/// assert_eq!(reference, Reference::Address(0x1337));
/// assert_eq!(storage.pc(), 0x0602);
/// ```
pub fn resolve<M: MemoryBus>(
    mode: AddressingMode,
    cpu: &Cpu,
    storage: &mut Storage<M>,
) -> Reference {
    match mode {
        AddressingMode::Implicit | AddressingMode::Accumulator => Reference::Implied,

        AddressingMode::Immediate => Reference::Immediate(storage.next()),

        AddressingMode::ZeroPage => Reference::Address(storage.next() as u16),

        AddressingMode::ZeroPageX => {
            Reference::Address(storage.next().wrapping_add(cpu.x()) as u16)
        }

        AddressingMode::ZeroPageY => {
            Reference::Address(storage.next().wrapping_add(cpu.y()) as u16)
        }

        AddressingMode::Relative => {
            let offset = storage.next() as i8;
            Reference::Address(storage.pc().wrapping_add_signed(offset as i16))
        }

        AddressingMode::Absolute => Reference::Address(storage.next_word()),

        AddressingMode::AbsoluteX => {
            Reference::Address(storage.next_word().wrapping_add(cpu.x() as u16))
        }

        AddressingMode::AbsoluteY => {
            Reference::Address(storage.next_word().wrapping_add(cpu.y() as u16))
        }

        AddressingMode::Indirect => {
            let ptr = storage.next_word();
            // NMOS quirk: the high byte is fetched from the same page
            let high_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
            Reference::Address(int16([storage.get(ptr), storage.get(high_addr)]))
        }

        AddressingMode::IndirectX => {
            let zp = storage.next().wrapping_add(cpu.x());
            Reference::Address(zero_page_word(storage, zp))
        }

        AddressingMode::IndirectY => {
            let zp = storage.next();
            let base = zero_page_word(storage, zp);
            Reference::Address(base.wrapping_add(cpu.y() as u16))
        }
    }
}

/// Reads a pointer from zero page, wrapping the high byte back to 0x00.
fn zero_page_word<M: MemoryBus>(storage: &Storage<M>, zp: u8) -> u16 {
    int16([
        storage.get(zp as u16),
        storage.get(zp.wrapping_add(1) as u16),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, Register};

    fn setup(operands: &[u8]) -> (Cpu, Storage<FlatMemory>) {
        let mut storage = Storage::new(FlatMemory::new());
        storage.load(operands, 0x0600);
        (Cpu::new(), storage)
    }

    #[test]
    fn test_operand_byte_counts() {
        assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_bytes(), 0);
        assert_eq!(AddressingMode::Immediate.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
        assert_eq!(AddressingMode::AbsoluteY.operand_bytes(), 2);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
    }

    #[test]
    fn test_implicit_consumes_nothing() {
        let (cpu, mut storage) = setup(&[0xFF]);
        assert_eq!(
            resolve(AddressingMode::Implicit, &cpu, &mut storage),
            Reference::Implied
        );
        assert_eq!(storage.pc(), 0x0600);
    }

    #[test]
    fn test_immediate() {
        let (cpu, mut storage) = setup(&[0x42]);
        assert_eq!(
            resolve(AddressingMode::Immediate, &cpu, &mut storage),
            Reference::Immediate(0x42)
        );
        assert_eq!(storage.pc(), 0x0601);
    }

    #[test]
    fn test_zero_page_x() {
        let (mut cpu, mut storage) = setup(&[0x10]);
        cpu.set(Register::X, 5u8);
        assert_eq!(
            resolve(AddressingMode::ZeroPageX, &cpu, &mut storage),
            Reference::Address(0x0015)
        );
        assert_eq!(storage.pc(), 0x0601);
    }

    #[test]
    fn test_zero_page_x_wraps_within_zero_page() {
        let (mut cpu, mut storage) = setup(&[0xF0]);
        cpu.set(Register::X, 0x20u8);
        assert_eq!(
            resolve(AddressingMode::ZeroPageX, &cpu, &mut storage),
            Reference::Address(0x0010)
        );
    }

    #[test]
    fn test_indirect_x() {
        let (mut cpu, mut storage) = setup(&[0x10]);
        cpu.set(Register::X, 0x02u8);
        storage.set(0x0012, 0x00u8);
        storage.set(0x0013, 0x02u8);
        assert_eq!(
            resolve(AddressingMode::IndirectX, &cpu, &mut storage),
            Reference::Address(0x0200)
        );
        assert_eq!(storage.pc(), 0x0601);
    }

    #[test]
    fn test_indirect_y_crosses_page() {
        let (mut cpu, mut storage) = setup(&[0x10]);
        cpu.set(Register::Y, 0x20u8);
        storage.set(0x0010, 0xF0u8);
        storage.set(0x0011, 0x02u8);
        assert_eq!(
            resolve(AddressingMode::IndirectY, &cpu, &mut storage),
            Reference::Address(0x0310)
        );
    }

    #[test]
    fn test_absolute_y() {
        let (mut cpu, mut storage) = setup(&[0x00, 0x02]);
        cpu.set(Register::Y, 0x05u8);
        assert_eq!(
            resolve(AddressingMode::AbsoluteY, &cpu, &mut storage),
            Reference::Address(0x0205)
        );
        assert_eq!(storage.pc(), 0x0602);
    }

    #[test]
    fn test_relative_forward_and_backward() {
        let (cpu, mut storage) = setup(&[0x04]);
        assert_eq!(
            resolve(AddressingMode::Relative, &cpu, &mut storage),
            Reference::Address(0x0605)
        );

        let (cpu, mut storage) = setup(&[0xFC]);
        assert_eq!(
            resolve(AddressingMode::Relative, &cpu, &mut storage),
            Reference::Address(0x05FD)
        );
    }

    #[test]
    fn test_indirect_page_wrap_quirk() {
        let (cpu, mut storage) = setup(&[0xFF, 0x10]);
        storage.set(0x10FF, 0x34u8);
        storage.set(0x1000, 0x12u8);
        storage.set(0x1100, 0x99u8);
        assert_eq!(
            resolve(AddressingMode::Indirect, &cpu, &mut storage),
            Reference::Address(0x1234)
        );
    }

    #[test]
    fn test_reference_address() {
        assert_eq!(Reference::Address(0x10).address(), Some(0x10));
        assert_eq!(Reference::Immediate(0x10).address(), None);
        assert_eq!(Reference::Implied.address(), None);
    }
}
