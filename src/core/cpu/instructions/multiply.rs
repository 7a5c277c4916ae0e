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
    // === Multiply/Divide Instructions ===

    /// MULT: Multiply (signed)
    ///
    /// Both operands are sign-extended to 64 bits first.
    ///
    /// Format: mult rs, rt
    /// Operation: (HI, LO) = rs * rt
    pub(in crate::core::cpu) fn op_mult(&mut self, rs: u8, rt: u8) -> Result<()> {
        let a = self.reg(rs) as i32 as i64;
        let b = self.reg(rt) as i32 as i64;
        let result = (a * b) as u64;

        self.lo = result as u32;
        self.hi = (result >> 32) as u32;
        Ok(())
    }

    /// MULTU: Multiply Unsigned
    ///
    /// Format: multu rs, rt
    /// Operation: (HI, LO) = rs * rt
    pub(in crate::core::cpu) fn op_multu(&mut self, rs: u8, rt: u8) -> Result<()> {
        let a = self.reg(rs) as u64;
        let b = self.reg(rt) as u64;
        let result = a * b;

        self.lo = result as u32;
        self.hi = (result >> 32) as u32;
        Ok(())
    }

    /// DIV: Divide (signed)
    ///
    /// Format: div rs, rt
    /// Operation: LO = rs / rt, HI = rs % rt
    ///
    /// Division never traps. The degenerate cases produce what the R3000A
    /// produces:
    /// - `n / 0`: LO = 0xFFFFFFFF, HI = n
    /// - `0x80000000 / -1`: LO = 0x80000000, HI = 0
    pub(in crate::core::cpu) fn op_div(&mut self, rs: u8, rt: u8) -> Result<()> {
        let n = self.reg(rs) as i32;
        let d = self.reg(rt) as i32;

        if d == 0 {
            self.hi = n as u32;
            self.lo = 0xFFFF_FFFF;
        } else if n == i32::MIN && d == -1 {
            self.hi = 0;
            self.lo = 0x8000_0000;
        } else {
            self.lo = (n / d) as u32;
            self.hi = (n % d) as u32;
        }
        Ok(())
    }

    /// DIVU: Divide Unsigned
    ///
    /// Format: divu rs, rt
    /// Operation: LO = rs / rt, HI = rs % rt
    ///
    /// `n / 0` leaves LO = 0xFFFFFFFF and HI = n.
    pub(in crate::core::cpu) fn op_divu(&mut self, rs: u8, rt: u8) -> Result<()> {
        let n = self.reg(rs);
        let d = self.reg(rt);

        if d == 0 {
            self.hi = n;
            self.lo = 0xFFFF_FFFF;
        } else {
            self.lo = n / d;
            self.hi = n % d;
        }
        Ok(())
    }

    /// MFHI: Format: mfhi rd
    pub(in crate::core::cpu) fn op_mfhi(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.hi);
        Ok(())
    }

    /// MTHI: Format: mthi rs
    pub(in crate::core::cpu) fn op_mthi(&mut self, rs: u8) -> Result<()> {
        self.hi = self.reg(rs);
        Ok(())
    }

    /// MFLO: Format: mflo rd
    pub(in crate::core::cpu) fn op_mflo(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.lo);
        Ok(())
    }

    /// MTLO: Format: mtlo rs
    pub(in crate::core::cpu) fn op_mtlo(&mut self, rs: u8) -> Result<()> {
        self.lo = self.reg(rs);
        Ok(())
    }
}
