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
    // === Branch Instructions ===
    //
    // At execute time `pc` already points at the delay slot, so the target is
    // delay_slot + (sign_extend(imm) << 2). A taken branch only replaces
    // `next_pc`; the delay slot instruction runs first.

    #[inline(always)]
    fn branch(&mut self, i: Instruction) {
        self.next_pc = self.pc.wrapping_add(i.branch_offset());
    }

    /// BLTZ / BLTZAL: Branch on Less Than Zero (and Link)
    ///
    /// The linking form writes r31 whether or not the branch is taken.
    pub(in crate::core::cpu) fn op_bltz(&mut self, i: Instruction, link: bool) -> Result<()> {
        let taken = (self.reg(i.rs) as i32) < 0;
        if link {
            self.set_reg(31, self.next_pc);
        }
        if taken {
            self.branch(i);
        }
        Ok(())
    }

    /// BGEZ / BGEZAL: Branch on Greater Than or Equal to Zero (and Link)
    pub(in crate::core::cpu) fn op_bgez(&mut self, i: Instruction, link: bool) -> Result<()> {
        let taken = (self.reg(i.rs) as i32) >= 0;
        if link {
            self.set_reg(31, self.next_pc);
        }
        if taken {
            self.branch(i);
        }
        Ok(())
    }

    /// BEQ: Branch on Equal
    ///
    /// Format: beq rs, rt, offset
    pub(in crate::core::cpu) fn op_beq(&mut self, i: Instruction) -> Result<()> {
        if self.reg(i.rs) == self.reg(i.rt) {
            self.branch(i);
        }
        Ok(())
    }

    /// BNE: Branch on Not Equal
    ///
    /// Format: bne rs, rt, offset
    pub(in crate::core::cpu) fn op_bne(&mut self, i: Instruction) -> Result<()> {
        if self.reg(i.rs) != self.reg(i.rt) {
            self.branch(i);
        }
        Ok(())
    }

    /// BLEZ: Branch on Less Than or Equal to Zero
    ///
    /// Format: blez rs, offset
    pub(in crate::core::cpu) fn op_blez(&mut self, i: Instruction) -> Result<()> {
        if (self.reg(i.rs) as i32) <= 0 {
            self.branch(i);
        }
        Ok(())
    }

    /// BGTZ: Branch on Greater Than Zero
    ///
    /// Format: bgtz rs, offset
    pub(in crate::core::cpu) fn op_bgtz(&mut self, i: Instruction) -> Result<()> {
        if (self.reg(i.rs) as i32) > 0 {
            self.branch(i);
        }
        Ok(())
    }
}
