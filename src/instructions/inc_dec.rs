//! # Increment and Decrement Instructions
//!
//! - INC, DEC: Read-modify-write on memory
//! - INX, INY, DEX, DEY: Register increments and decrements
//!
//! All of them wrap at the byte boundary and update Z and N. Carry is never
//! touched.

use super::{target_address, MissingAddress};
use crate::addressing::Reference;
use crate::opcodes::Mnemonic;
use crate::{Cpu, MemoryBus, Register, Storage};

fn modify_memory<M: MemoryBus>(
    mnemonic: Mnemonic,
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
    op: impl FnOnce(u8) -> u8,
) -> Result<(), MissingAddress> {
    let addr = target_address(mnemonic, reference)?;
    let result = op(storage.get(addr));
    storage.set(addr, result);
    cpu.update_zero_and_negative(result);
    Ok(())
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    modify_memory(Mnemonic::Inc, cpu, storage, reference, |v| v.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut Cpu,
    storage: &mut Storage<M>,
    reference: Reference,
) -> Result<(), MissingAddress> {
    modify_memory(Mnemonic::Dec, cpu, storage, reference, |v| v.wrapping_sub(1))
}

pub(crate) fn execute_inx(cpu: &mut Cpu) {
    cpu.set(Register::X, cpu.x().wrapping_add(1));
}

pub(crate) fn execute_iny(cpu: &mut Cpu) {
    cpu.set(Register::Y, cpu.y().wrapping_add(1));
}

pub(crate) fn execute_dex(cpu: &mut Cpu) {
    cpu.set(Register::X, cpu.x().wrapping_sub(1));
}

pub(crate) fn execute_dey(cpu: &mut Cpu) {
    cpu.set(Register::Y, cpu.y().wrapping_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_inc_wraps_and_sets_zero() {
        let mut cpu = Cpu::new();
        let mut storage = Storage::new(FlatMemory::new());
        storage.set(0x0020, 0xFFu8);

        execute_inc(&mut cpu, &mut storage, Reference::Address(0x0020)).unwrap();
        assert_eq!(storage.get(0x0020), 0x00);
        assert!(cpu.flag_z());
    }

    #[test]
    fn test_dec_sets_negative() {
        let mut cpu = Cpu::new();
        let mut storage = Storage::new(FlatMemory::new());

        execute_dec(&mut cpu, &mut storage, Reference::Address(0x0020)).unwrap();
        assert_eq!(storage.get(0x0020), 0xFF);
        assert!(cpu.flag_n());
    }

    #[test]
    fn test_register_wraparound() {
        let mut cpu = Cpu::new();

        execute_dex(&mut cpu);
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.flag_n());

        execute_inx(&mut cpu);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.flag_z());

        execute_dey(&mut cpu);
        execute_iny(&mut cpu);
        assert_eq!(cpu.y(), 0x00);
    }
}
