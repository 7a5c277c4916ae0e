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
use crate::core::error::{EmulatorError, Result};

impl CPU {
    // === Jump Instructions ===

    /// J: Jump
    ///
    /// The upper 4 bits come from the delay slot address.
    ///
    /// Format: j target
    /// Operation: next_pc = (pc & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_j(&mut self, i: Instruction) -> Result<()> {
        self.next_pc = (self.pc & 0xF000_0000) | (i.target << 2);
        Ok(())
    }

    /// JAL: Jump and Link
    ///
    /// r31 receives the address after the delay slot.
    ///
    /// Format: jal target
    pub(in crate::core::cpu) fn op_jal(&mut self, i: Instruction) -> Result<()> {
        self.set_reg(31, self.next_pc);
        self.op_j(i)
    }

    /// JR: Jump Register
    ///
    /// Format: jr rs
    ///
    /// # Errors
    ///
    /// `AddressError` if the target is not word aligned.
    pub(in crate::core::cpu) fn op_jr(&mut self, rs: u8) -> Result<()> {
        let target = self.jump_target(rs)?;
        self.next_pc = target;
        Ok(())
    }

    /// JALR: Jump and Link Register
    ///
    /// Format: jalr rd, rs
    /// Operation: rd = return address; next_pc = rs
    pub(in crate::core::cpu) fn op_jalr(&mut self, rs: u8, rd: u8) -> Result<()> {
        // Read rs before linking, rd may alias it
        let target = self.jump_target(rs)?;
        self.set_reg(rd, self.next_pc);
        self.next_pc = target;
        Ok(())
    }

    fn jump_target(&self, rs: u8) -> Result<u32> {
        let target = self.reg(rs);
        if target & 0x3 != 0 {
            log::error!(
                "Unaligned jump target 0x{:08X} at PC=0x{:08X}",
                target,
                self.current_pc
            );
            return Err(EmulatorError::AddressError {
                pc: self.current_pc,
                target,
            });
        }
        Ok(target)
    }
}
