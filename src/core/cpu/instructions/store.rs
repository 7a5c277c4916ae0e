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
    // === Store Instructions ===
    //
    // The bus drops every store while the cache is isolated.

    /// SB: Store Byte
    ///
    /// Format: sb rt, offset(rs)
    pub(in crate::core::cpu) fn op_sb(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        bus.write8(addr, self.reg(i.rt) as u8)
    }

    /// SH: Store Halfword
    ///
    /// Format: sh rt, offset(rs)
    pub(in crate::core::cpu) fn op_sh(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        bus.write16(addr, self.reg(i.rt) as u16)
    }

    /// SW: Store Word
    ///
    /// Format: sw rt, offset(rs)
    pub(in crate::core::cpu) fn op_sw(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        bus.write32(addr, self.reg(i.rt))
    }

    /// SWL: Store Word Left
    ///
    /// Writes the high-order `(addr & 3) + 1` bytes of rt into the low-order
    /// bytes of the aligned word containing `addr`.
    ///
    /// Format: swl rt, offset(rs)
    pub(in crate::core::cpu) fn op_swl(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let aligned = addr & !3;
        let mem = bus.read32(aligned)?;
        let value = self.reg(i.rt);

        let merged = match addr & 3 {
            0 => (mem & 0xFFFF_FF00) | (value >> 24),
            1 => (mem & 0xFFFF_0000) | (value >> 16),
            2 => (mem & 0xFF00_0000) | (value >> 8),
            _ => value,
        };
        bus.write32(aligned, merged)
    }

    /// SWR: Store Word Right
    ///
    /// Writes the low-order `4 - (addr & 3)` bytes of rt into the high-order
    /// bytes of the aligned word containing `addr`.
    ///
    /// Format: swr rt, offset(rs)
    pub(in crate::core::cpu) fn op_swr(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let addr = self.effective_address(i);
        let aligned = addr & !3;
        let mem = bus.read32(aligned)?;
        let value = self.reg(i.rt);

        let merged = match addr & 3 {
            0 => value,
            1 => (mem & 0x0000_00FF) | (value << 8),
            2 => (mem & 0x0000_FFFF) | (value << 16),
            _ => (mem & 0x00FF_FFFF) | (value << 24),
        };
        bus.write32(aligned, merged)
    }
}
