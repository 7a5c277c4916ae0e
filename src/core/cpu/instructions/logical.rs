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

impl CPU {
    // === Logical Instructions ===

    /// AND: Bitwise AND
    ///
    /// Format: and rd, rs, rt
    pub(in crate::core::cpu) fn op_and(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs) & self.reg(rt));
        Ok(())
    }

    /// OR: Bitwise OR
    ///
    /// Format: or rd, rs, rt
    pub(in crate::core::cpu) fn op_or(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs) | self.reg(rt));
        Ok(())
    }

    /// XOR: Bitwise exclusive OR
    ///
    /// Format: xor rd, rs, rt
    pub(in crate::core::cpu) fn op_xor(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs) ^ self.reg(rt));
        Ok(())
    }

    /// NOR: Bitwise NOT OR
    ///
    /// Format: nor rd, rs, rt
    pub(in crate::core::cpu) fn op_nor(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        self.set_reg(rd, !(self.reg(rs) | self.reg(rt)));
        Ok(())
    }

    // Logical immediates zero-extend

    /// ANDI: Format: andi rt, rs, imm
    pub(in crate::core::cpu) fn op_andi(&mut self, i: Instruction) -> Result<()> {
        self.set_reg(i.rt, self.reg(i.rs) & i.imm_ze());
        Ok(())
    }

    /// ORI: Format: ori rt, rs, imm
    pub(in crate::core::cpu) fn op_ori(&mut self, i: Instruction) -> Result<()> {
        self.set_reg(i.rt, self.reg(i.rs) | i.imm_ze());
        Ok(())
    }

    /// XORI: Format: xori rt, rs, imm
    pub(in crate::core::cpu) fn op_xori(&mut self, i: Instruction) -> Result<()> {
        self.set_reg(i.rt, self.reg(i.rs) ^ i.imm_ze());
        Ok(())
    }

    /// LUI: Load Upper Immediate
    ///
    /// Format: lui rt, imm
    /// Operation: rt = imm << 16
    pub(in crate::core::cpu) fn op_lui(&mut self, i: Instruction) -> Result<()> {
        self.set_reg(i.rt, i.imm_ze() << 16);
        Ok(())
    }
}
