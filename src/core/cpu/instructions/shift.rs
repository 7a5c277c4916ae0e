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

use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Shift Instructions ===

    /// SLL: Shift Left Logical
    ///
    /// Format: sll rd, rt, shamt
    /// Operation: rd = rt << shamt
    ///
    /// `sll zero, zero, 0` is the canonical NOP.
    pub(in crate::core::cpu) fn op_sll(&mut self, rt: u8, rd: u8, shamt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rt) << shamt);
        Ok(())
    }

    /// SRL: Shift Right Logical
    ///
    /// Format: srl rd, rt, shamt
    pub(in crate::core::cpu) fn op_srl(&mut self, rt: u8, rd: u8, shamt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rt) >> shamt);
        Ok(())
    }

    /// SRA: Shift Right Arithmetic
    ///
    /// Format: sra rd, rt, shamt
    pub(in crate::core::cpu) fn op_sra(&mut self, rt: u8, rd: u8, shamt: u8) -> Result<()> {
        self.set_reg(rd, ((self.reg(rt) as i32) >> shamt) as u32);
        Ok(())
    }

    /// SLLV: Shift Left Logical Variable
    ///
    /// Format: sllv rd, rt, rs
    /// Operation: rd = rt << (rs & 0x1F)
    pub(in crate::core::cpu) fn op_sllv(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shift = self.reg(rs) & 0x1F;
        self.set_reg(rd, self.reg(rt) << shift);
        Ok(())
    }

    /// SRLV: Shift Right Logical Variable
    ///
    /// Format: srlv rd, rt, rs
    pub(in crate::core::cpu) fn op_srlv(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shift = self.reg(rs) & 0x1F;
        self.set_reg(rd, self.reg(rt) >> shift);
        Ok(())
    }

    /// SRAV: Shift Right Arithmetic Variable
    ///
    /// Format: srav rd, rt, rs
    pub(in crate::core::cpu) fn op_srav(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shift = self.reg(rs) & 0x1F;
        self.set_reg(rd, ((self.reg(rt) as i32) >> shift) as u32);
        Ok(())
    }
}
