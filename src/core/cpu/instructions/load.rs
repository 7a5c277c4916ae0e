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

use super::super::decode::Instruction;
use super::super::CPU;
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Load Instructions ===
    //
    // Results land in rt immediately. Halfword and word loads ignore the
    // misaligned low address bits, as the bus does.

    /// LB: Load Byte (sign-extended)
    ///
    /// Format: lb rt, offset(rs)
    pub(in crate::core::cpu) fn op_lb(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let value = bus.read8(addr)? as i8 as i32 as u32;
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LBU: Load Byte Unsigned
    ///
    /// Format: lbu rt, offset(rs)
    pub(in crate::core::cpu) fn op_lbu(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let value = bus.read8(addr)? as u32;
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LH: Load Halfword (sign-extended)
    ///
    /// Format: lh rt, offset(rs)
    pub(in crate::core::cpu) fn op_lh(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let value = bus.read16(addr)? as i16 as i32 as u32;
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LHU: Load Halfword Unsigned
    ///
    /// Format: lhu rt, offset(rs)
    pub(in crate::core::cpu) fn op_lhu(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let value = bus.read16(addr)? as u32;
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LW: Load Word
    ///
    /// Format: lw rt, offset(rs)
    pub(in crate::core::cpu) fn op_lw(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let value = bus.read32(addr)?;
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LWL: Load Word Left
    ///
    /// Replaces the high-order `(addr & 3) + 1` bytes of rt with the
    /// low-order bytes of the aligned word containing `addr`.
    ///
    /// Format: lwl rt, offset(rs)
    ///
    /// ```text
    /// addr & 3   result
    ///    0       mem[0]    rt[2] rt[1] rt[0]      (high byte first)
    ///    1       mem[1..0] rt[1] rt[0]
    ///    2       mem[2..0] rt[0]
    ///    3       mem[3..0]
    /// ```
    pub(in crate::core::cpu) fn op_lwl(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let word = bus.read32(addr & !3)?;
        let current = self.reg(i.rt);

        let value = match addr & 3 {
            0 => (current & 0x00FF_FFFF) | (word << 24),
            1 => (current & 0x0000_FFFF) | (word << 16),
            2 => (current & 0x0000_00FF) | (word << 8),
            _ => word,
        };
        self.set_reg(i.rt, value);
        Ok(())
    }

    /// LWR: Load Word Right
    ///
    /// Replaces the low-order `4 - (addr & 3)` bytes of rt with the
    /// high-order bytes of the aligned word containing `addr`.
    ///
    /// Format: lwr rt, offset(rs)
    pub(in crate::core::cpu) fn op_lwr(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let word = bus.read32(addr & !3)?;
        let current = self.reg(i.rt);

        let value = match addr & 3 {
            0 => word,
            1 => (current & 0xFF00_0000) | (word >> 8),
            2 => (current & 0xFFFF_0000) | (word >> 16),
            _ => (current & 0xFFFF_FF00) | (word >> 24),
        };
        self.set_reg(i.rt, value);
        Ok(())
    }
}
