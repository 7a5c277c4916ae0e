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

//! Coprocessor 0 (System Control)
//!
//! COP0 holds the privilege state, the exception bookkeeping registers and
//! the processor ID. Status and Cause are packed hardware words; the typed
//! [`Status`] and [`Cause`] views expose their bit fields without giving up
//! the raw layout that MFC0/MTC0 move around.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Status Register (COP0 r12)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        /// Interrupt enable (current)
        const IEC = 1 << 0;
        /// User mode (current)
        const KUC = 1 << 1;
        /// Interrupt enable (previous)
        const IEP = 1 << 2;
        /// User mode (previous)
        const KUP = 1 << 3;
        /// Interrupt enable (old)
        const IEO = 1 << 4;
        /// User mode (old)
        const KUO = 1 << 5;
        /// Interrupt mask
        const IM = 0xFF << 8;
        /// Isolate cache
        const ISC = 1 << 16;
        /// Swap caches
        const SWC = 1 << 17;
        const PZ = 1 << 18;
        const CM = 1 << 19;
        const PE = 1 << 20;
        const TS = 1 << 21;
        /// Boot exception vectors in ROM
        const BEV = 1 << 22;
        const RE = 1 << 25;
        const CU0 = 1 << 28;
        const CU1 = 1 << 29;
        const CU2 = 1 << 30;
        const CU3 = 1 << 31;
    }
}

impl Status {
    /// KU/IE three-level stack (bits 0-5)
    pub const MODE_STACK: u32 = 0x3F;

    /// 8-bit interrupt mask
    pub fn interrupt_mask(self) -> u8 {
        ((self.bits() >> 8) & 0xFF) as u8
    }

    /// Exception entry: push the KU/IE stack, entering kernel mode with
    /// interrupts disabled
    pub fn push_mode(self) -> Self {
        let sr = self.bits();
        Self::from_bits_retain((sr & !Self::MODE_STACK) | ((sr << 2) & Self::MODE_STACK))
    }

    /// RFE: pop the KU/IE stack; the old pair is left in place
    pub fn pop_mode(self) -> Self {
        let sr = self.bits();
        Self::from_bits_retain((sr & !0x0F) | ((sr >> 2) & 0x0F))
    }
}

bitflags! {
    /// Cause Register (COP0 r13)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cause: u32 {
        /// Exception code (bits 2-6)
        const EXCODE = 0x1F << 2;
        /// Software interrupts
        const SW = 0x3 << 8;
        /// Hardware interrupt lines
        const HW = 0x3F << 10;
        /// Coprocessor number of a coprocessor-unusable trap
        const CE = 0x3 << 28;
        /// Exception happened in a branch delay slot
        const BD = 1 << 31;
    }
}

impl Cause {
    pub fn excode(self) -> u32 {
        (self.bits() & Self::EXCODE.bits()) >> 2
    }

    pub fn with_excode(self, code: u32) -> Self {
        Self::from_bits_retain((self.bits() & !Self::EXCODE.bits()) | ((code << 2) & Self::EXCODE.bits()))
    }

    /// Pending interrupt bitmap (IP, bits 8-15)
    pub fn pending(self) -> u8 {
        ((self.bits() >> 8) & 0xFF) as u8
    }
}

/// Coprocessor 0 register bank
///
/// Indices 12, 13 and 14 are the Status, Cause and EPC words. Everything else
/// is raw storage; the breakpoint registers have no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct COP0 {
    regs: [u32; 32],
}

impl COP0 {
    /// Breakpoint PC
    pub const BPC: usize = 3;
    /// Breakpoint Data Address
    pub const BDA: usize = 5;
    /// Target Address
    pub const TAR: usize = 6;
    /// Breakpoint control
    pub const DCIC: usize = 7;
    /// Bad Virtual Address
    pub const BADA: usize = 8;
    /// Data Address Mask
    pub const BDAM: usize = 9;
    /// PC Mask
    pub const BPCM: usize = 11;
    /// Status Register
    pub const SR: usize = 12;
    /// Cause Register
    pub const CAUSE: usize = 13;
    /// Exception PC
    pub const EPC: usize = 14;
    /// Processor ID
    pub const PRID: usize = 15;

    /// Status after reset: BEV set, everything else clear
    pub const RESET_STATUS: u32 = 0x0040_0000;

    /// R3000A processor ID
    pub const PROCESSOR_ID: u32 = 0x0000_0002;

    /// Cause bits MTC0 may change (software interrupts)
    const CAUSE_WRITABLE: u32 = 0x0000_0300;

    pub fn new() -> Self {
        let mut regs = [0u32; 32];
        regs[Self::SR] = Self::RESET_STATUS;
        regs[Self::PRID] = Self::PROCESSOR_ID;
        Self { regs }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// MFC0 view of register `index`
    #[inline]
    pub fn read(&self, index: usize) -> u32 {
        self.regs[index & 0x1F]
    }

    /// MTC0 write of register `index`
    ///
    /// Cause only accepts the software interrupt bits, and PRID is read-only.
    pub fn write(&mut self, index: usize, value: u32) {
        let index = index & 0x1F;
        match index {
            Self::CAUSE => {
                let cause = self.regs[Self::CAUSE];
                self.regs[Self::CAUSE] =
                    (cause & !Self::CAUSE_WRITABLE) | (value & Self::CAUSE_WRITABLE);
            }
            Self::PRID => {
                log::debug!("Ignoring write to COP0 PRID: 0x{:08X}", value);
            }
            _ => self.regs[index] = value,
        }
    }

    #[inline(always)]
    pub fn status(&self) -> Status {
        Status::from_bits_retain(self.regs[Self::SR])
    }

    pub fn set_status(&mut self, status: Status) {
        self.regs[Self::SR] = status.bits();
    }

    #[inline(always)]
    pub fn cause(&self) -> Cause {
        Cause::from_bits_retain(self.regs[Self::CAUSE])
    }

    pub fn set_cause(&mut self, cause: Cause) {
        self.regs[Self::CAUSE] = cause.bits();
    }

    #[inline(always)]
    pub fn epc(&self) -> u32 {
        self.regs[Self::EPC]
    }

    pub fn set_epc(&mut self, epc: u32) {
        self.regs[Self::EPC] = epc;
    }

    /// Drive hardware interrupt line `line` (0-5) in Cause IP
    pub fn set_hardware_interrupt(&mut self, line: u32, asserted: bool) {
        let bit = 1 << (10 + line);
        if asserted {
            self.regs[Self::CAUSE] |= bit;
        } else {
            self.regs[Self::CAUSE] &= !bit;
        }
    }

    /// Whole register bank, for save states
    pub fn registers(&self) -> &[u32; 32] {
        &self.regs
    }

    pub fn restore_registers(&mut self, regs: [u32; 32]) {
        self.regs = regs;
    }
}

impl Default for COP0 {
    fn default() -> Self {
        Self::new()
    }
}

/// Exception cause codes for MIPS R3000A
///
/// These correspond to the exception codes stored in the CAUSE register
/// when a CPU exception occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ExceptionCause {
    /// Interrupt (external or internal)
    Interrupt = 0,
    /// Address error on load
    AddressErrorLoad = 4,
    /// Address error on store
    AddressErrorStore = 5,
    /// Bus error on instruction fetch
    BusErrorInstruction = 6,
    /// Bus error on data access
    BusErrorData = 7,
    /// Syscall instruction executed
    Syscall = 8,
    /// Breakpoint instruction executed
    Breakpoint = 9,
    /// Reserved or illegal instruction
    ReservedInstruction = 10,
    /// Coprocessor unusable
    CoprocessorUnusable = 11,
    /// Arithmetic overflow
    Overflow = 12,
}
