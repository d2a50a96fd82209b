//! # Register Transfer Instructions
//!
//! - TAX, TAY, TXA, TYA: Copy between A and an index register
//! - TSX: Copy the stack pointer into X
//! - TXS: Copy X into the stack pointer
//!
//! Every transfer into a register updates Z and N. TXS writes the stack
//! pointer, not a register, so it leaves the flags alone.

use crate::{Cpu, MemoryBus, Register, Storage};

fn transfer(cpu: &mut Cpu, from: Register, to: Register) {
    cpu.set(to, cpu.get(from));
}

pub(crate) fn execute_tax(cpu: &mut Cpu) {
    transfer(cpu, Register::A, Register::X);
}

pub(crate) fn execute_tay(cpu: &mut Cpu) {
    transfer(cpu, Register::A, Register::Y);
}

pub(crate) fn execute_txa(cpu: &mut Cpu) {
    transfer(cpu, Register::X, Register::A);
}

pub(crate) fn execute_tya(cpu: &mut Cpu) {
    transfer(cpu, Register::Y, Register::A);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut Cpu, storage: &Storage<M>) {
    cpu.set(Register::X, storage.sp());
}

pub(crate) fn execute_txs<M: MemoryBus>(cpu: &Cpu, storage: &mut Storage<M>) {
    storage.set_sp(cpu.x());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_tax_updates_flags() {
        let mut cpu = Cpu::new();
        cpu.set(Register::A, 0x00u8);
        cpu.set(Register::X, 0x05u8);

        execute_tax(&mut cpu);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.flag_z());
    }

    #[test]
    fn test_tsx_txs() {
        let mut cpu = Cpu::new();
        let mut storage = Storage::new(FlatMemory::new());

        execute_tsx(&mut cpu, &storage);
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.flag_n());

        cpu.set(Register::X, 0x00u8);
        execute_txs(&cpu, &mut storage);
        assert_eq!(storage.sp(), 0x00);
        // TXS does not touch flags
        assert!(cpu.flag_z());
    }
}
