//! # Status Flag Instructions
//!
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//!
//! Carry is the only flag with dedicated instructions here; Z and N are always
//! derived from results.

use crate::Cpu;

pub(crate) fn execute_clc(cpu: &mut Cpu) {
    cpu.clear_carry();
}

pub(crate) fn execute_sec(cpu: &mut Cpu) {
    cpu.set_carry();
}
