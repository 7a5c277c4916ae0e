// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! MIPS R3000A interpreter
//!
//! The CPU owns the register file and COP0. It borrows the [`Bus`] for each
//! step, so the machine context decides who else may touch memory.

use std::fmt::Write as _;

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Bus;

mod cop0;
mod decode;
mod disassembler;
mod instructions;
#[cfg(test)]
mod tests;
mod tracer;

pub use cop0::{Cause, ExceptionCause, Status, COP0};
pub use decode::{decode, Instruction, Opcode};
pub use disassembler::Disassembler;
pub use tracer::CpuTracer;

/// CPU (MIPS R3000A) emulation implementation
///
/// # Specifications
/// - Architecture: MIPS I (32-bit)
/// - Clock frequency: 33.8688 MHz
/// - Registers: 32 general-purpose registers + HI/LO
///
/// # Example
/// ```
/// use psxcore::core::cpu::CPU;
///
/// let mut cpu = CPU::new();
/// cpu.reset();
/// assert_eq!(cpu.reg(0), 0); // r0 is always 0
/// assert_eq!(cpu.pc(), 0xBFC00000);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31)
    ///
    /// r0 is never written, so it always reads 0
    regs: [u32; 32],

    /// Address of the next instruction to fetch
    pc: u32,

    /// Value `pc` takes after the next fetch (branch delay handling)
    next_pc: u32,

    /// Address of the instruction currently executing
    current_pc: u32,

    /// HI register (multiplication/division result upper 32 bits)
    hi: u32,

    /// LO register (multiplication/division result lower 32 bits)
    lo: u32,

    /// Coprocessor 0 (System Control Unit)
    cop0: COP0,

    /// Current instruction word (for debugging)
    current_instruction: u32,
}

/// ABI register names, indexed by register number
pub const REGISTER_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "fp",
    "ra",
];

impl CPU {
    /// Reset vector
    pub const RESET_VECTOR: u32 = 0xBFC0_0000;

    /// General exception vector with Status.BEV set
    pub const BOOT_EXCEPTION_VECTOR: u32 = 0xBFC0_0180;

    /// General exception vector with Status.BEV clear
    pub const EXCEPTION_VECTOR: u32 = 0x8000_0080;

    /// Create a new CPU instance in its reset state
    ///
    /// - All general purpose registers and HI/LO: 0
    /// - PC: 0xBFC00000 (BIOS entry point), next_pc: 0xBFC00004
    /// - COP0 SR: 0x00400000 (BEV), PRID: 0x00000002
    pub fn new() -> Self {
        Self {
            regs: [0u32; 32],
            pc: Self::RESET_VECTOR,
            next_pc: Self::RESET_VECTOR.wrapping_add(4),
            current_pc: Self::RESET_VECTOR,
            hi: 0,
            lo: 0,
            cop0: COP0::new(),
            current_instruction: 0,
        }
    }

    /// Reset CPU to initial state
    ///
    /// This mimics the behavior of power-on or hardware reset.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read a general purpose register
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(1), 0);
    /// ```
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        self.regs[(index & 0x1F) as usize]
    }

    /// Write a general purpose register
    ///
    /// Writes to r0 are discarded.
    ///
    /// # Example
    /// ```
    /// use psxcore::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(1, 0x12345678);
    /// assert_eq!(cpu.reg(1), 0x12345678);
    ///
    /// cpu.set_reg(0, 0xDEADBEEF);
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u32) {
        let index = (index & 0x1F) as usize;
        if index != 0 {
            self.regs[index] = value;
        }
    }

    /// Execute one instruction
    ///
    /// 1. Fetch the word at `pc`
    /// 2. Advance: `pc <- next_pc`, `next_pc <- next_pc + 4`
    /// 3. Decode and execute; branches overwrite `next_pc`, so the
    ///    instruction after a branch (its delay slot) still runs next
    ///
    /// # Returns
    ///
    /// Number of cycles consumed (always 1)
    ///
    /// # Errors
    ///
    /// Fatal conditions (unsupported instruction, unaligned jump target,
    /// unmapped I/O) are returned without retiring the instruction's result.
    /// Bus errors come back as [`EmulatorError::ExecutionFault`] carrying the
    /// faulting PC and instruction word.
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::cpu::CPU;
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut cpu = CPU::new();
    /// let mut bus = Bus::new();
    ///
    /// // Zeroed BIOS decodes as NOPs
    /// let cycles = cpu.step(&mut bus).unwrap();
    /// assert_eq!(cycles, 1);
    /// assert_eq!(cpu.pc(), 0xBFC00004);
    /// ```
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32> {
        let pc = self.pc;
        self.current_pc = pc;
        self.current_instruction = bus.read32(pc).map_err(|e| e.at(pc, None))?;

        self.pc = self.next_pc;
        self.next_pc = self.next_pc.wrapping_add(4);

        let word = self.current_instruction;
        self.execute(decode::decode(word), bus)
            .map_err(|e| e.at(pc, Some(word)))?;

        Ok(1)
    }

    /// Enter the general exception handler
    ///
    /// EPC is the address of the trapping instruction. The KU/IE stack is
    /// pushed, Cause.ExcCode is set and Cause.BD is cleared.
    pub fn exception(&mut self, cause: ExceptionCause) {
        let status = self.cop0.status();
        self.cop0.set_status(status.push_mode());

        let cause_reg = self.cop0.cause().with_excode(cause as u32) - Cause::BD;
        self.cop0.set_cause(cause_reg);

        let epc = self.current_pc;
        self.cop0.set_epc(epc);

        let handler = if status.contains(Status::BEV) {
            Self::BOOT_EXCEPTION_VECTOR
        } else {
            Self::EXCEPTION_VECTOR
        };

        log::debug!(
            "EXCEPTION: cause={:?}, EPC=0x{:08X}, handler=0x{:08X}, instruction=0x{:08X}",
            cause,
            epc,
            handler,
            self.current_instruction
        );

        self.pc = handler;
        self.next_pc = handler.wrapping_add(4);
    }

    /// Current PC value (next instruction to fetch)
    #[inline(always)]
    pub fn pc(&self) -> u32 {
        self.pc
    }

    #[inline(always)]
    pub fn next_pc(&self) -> u32 {
        self.next_pc
    }

    /// Address of the most recently fetched instruction
    pub fn current_pc(&self) -> u32 {
        self.current_pc
    }

    /// Most recently fetched instruction word
    pub fn current_instruction(&self) -> u32 {
        self.current_instruction
    }

    /// Jump to `pc` with no delay slot pending
    ///
    /// Used by the executable loader.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.next_pc = pc.wrapping_add(4);
    }

    /// Restore the PC pair and the last fetched instruction (save states)
    pub(crate) fn restore_pc_state(&mut self, pc: u32, next_pc: u32, current_pc: u32, instruction: u32) {
        self.pc = pc;
        self.next_pc = next_pc;
        self.current_pc = current_pc;
        self.current_instruction = instruction;
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn set_hi(&mut self, value: u32) {
        self.hi = value;
    }

    pub fn set_lo(&mut self, value: u32) {
        self.lo = value;
    }

    pub fn cop0(&self) -> &COP0 {
        &self.cop0
    }

    pub fn cop0_mut(&mut self) -> &mut COP0 {
        &mut self.cop0
    }

    /// All general purpose registers (r0 included)
    pub fn registers(&self) -> &[u32; 32] {
        &self.regs
    }

    pub(crate) fn restore_registers(&mut self, regs: [u32; 32]) {
        self.regs = regs;
        self.regs[0] = 0;
    }

    /// Formatted dump of the CPU state
    ///
    /// PC pair, HI/LO, all 32 GPRs in rows of four and the COP0 exception
    /// registers.
    pub fn register_dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "PC: 0x{:08X}  Next PC: 0x{:08X}  Current: 0x{:08X} [0x{:08X}]",
            self.pc, self.next_pc, self.current_pc, self.current_instruction
        );
        let _ = writeln!(out, "HI: 0x{:08X}  LO: 0x{:08X}", self.hi, self.lo);

        for row in 0..8 {
            for col in 0..4 {
                let i = row * 4 + col;
                let _ = write!(out, "{:>4}: 0x{:08X}  ", REGISTER_NAMES[i], self.regs[i]);
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(
            out,
            "SR: 0x{:08X}  CAUSE: 0x{:08X}  EPC: 0x{:08X}",
            self.cop0.read(COP0::SR),
            self.cop0.read(COP0::CAUSE),
            self.cop0.read(COP0::EPC)
        );
        out
    }

    /// Error for an instruction that has no handler
    #[inline]
    pub(crate) fn unsupported(&self) -> EmulatorError {
        EmulatorError::UnsupportedInstruction {
            pc: self.current_pc,
            instruction: self.current_instruction,
        }
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}
