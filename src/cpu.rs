//! # CPU Registers and Status Flags
//!
//! This module contains the `Cpu` struct holding the three 8-bit registers and
//! the status flags the simulator models.
//!
//! ## CPU State
//!
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Status flags**: Carry (C), Zero (Z), Negative (N)
//!
//! The program counter and stack pointer live in `Storage`, next to the memory
//! they walk through.
//!
//! ## Flag Discipline
//!
//! Z and N are never poked directly. Every register write recomputes them from
//! the written byte, and the few instructions whose result lands somewhere
//! other than a register (compares, read-modify-write on memory) go through
//! the same recomputation. C is only changed through `set_carry`,
//! `clear_carry` and `carry_if`.

/// One of the three 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Accumulator
    A,
    /// X index register
    X,
    /// Y index register
    Y,
}

/// One of the modelled status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Set on unsigned overflow, cleared on borrow
    Carry,
    /// Set if the last result was zero
    Zero,
    /// Copy of bit 7 of the last result
    Negative,
}

/// Register file and status flags.
///
/// # Examples
///
/// ```
/// use sim6502::{Cpu, Flag, Register};
///
/// let mut cpu = Cpu::new();
/// cpu.set(Register::A, 0x80u8);
///
/// assert_eq!(cpu.get(Register::A), 0x80);
/// assert!(cpu.flag(Flag::Negative));
/// assert!(!cpu.flag(Flag::Zero));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    flag_c: bool,
    flag_z: bool,
    flag_n: bool,
}

impl Cpu {
    /// Creates a CPU with all registers zeroed and all flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `register`.
    pub fn get(&self, register: Register) -> u8 {
        match register {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
        }
    }

    /// Returns the current state of `flag`.
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Carry => self.flag_c,
            Flag::Zero => self.flag_z,
            Flag::Negative => self.flag_n,
        }
    }

    /// Stores `value` masked to a byte in `register` and recomputes Z and N.
    pub fn set(&mut self, register: Register, value: impl Into<u16>) {
        let byte = (value.into() & 0xFF) as u8;
        match register {
            Register::A => self.a = byte,
            Register::X => self.x = byte,
            Register::Y => self.y = byte,
        }
        self.update_zero_and_negative(byte);
    }

    /// Sets the carry flag.
    pub fn set_carry(&mut self) {
        self.flag_c = true;
    }

    /// Clears the carry flag.
    pub fn clear_carry(&mut self) {
        self.flag_c = false;
    }

    /// Sets the carry flag if `condition` holds, clears it otherwise.
    pub fn carry_if(&mut self, condition: bool) {
        if condition {
            self.set_carry();
        } else {
            self.clear_carry();
        }
    }

    /// Compares `register` against `operand` the way CMP/CPX/CPY do.
    ///
    /// C is set when the register is greater than or equal to the operand; Z
    /// and N come from the wrapped difference. The register is not written.
    pub fn compare(&mut self, register: Register, operand: u8) {
        let value = self.get(register);
        self.carry_if(value >= operand);
        self.update_zero_and_negative(value.wrapping_sub(operand));
    }

    /// Tests `operand` against the accumulator the way BIT does.
    ///
    /// Z is set when `A & operand` is zero and N is bit 7 of the operand
    /// itself. No register is written.
    pub fn bit_test(&mut self, operand: u8) {
        self.flag_z = self.a & operand == 0;
        self.flag_n = operand & 0x80 != 0;
    }

    /// Recomputes Z and N from a result that was stored to memory.
    pub(crate) fn update_zero_and_negative(&mut self, result: u8) {
        self.flag_z = result == 0;
        self.flag_n = (result & 0x80) != 0;
    }

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns the modelled flags packed in their 6502 bit positions.
    ///
    /// Bit layout (N-----ZC):
    /// - Bit 7: N (Negative)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// Bit 5 is always 1, as on the real status register.
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b00100000;

        if self.flag_n {
            status |= 0b10000000;
        }
        if self.flag_z {
            status |= 0b00000010;
        }
        if self.flag_c {
            status |= 0b00000001;
        }

        status
    }
}
