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

//! Coprocessor 0 (System Control) instructions
//!
//! CFC0/CTC0 share the MFC0/MTC0 handlers: COP0 has no separate control
//! register file.

use super::super::cop0::{Status, COP0};
use super::CPU;
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    /// MFC0: Move From Coprocessor 0
    ///
    /// ```text
    /// MFC0 $t0, $12  # Move Status Register to $t0
    /// ```
    pub(in crate::core::cpu) fn op_mfc0(&mut self, rt: u8, rd: u8) -> Result<()> {
        let value = self.cop0.read(rd as usize);
        self.set_reg(rt, value);
        Ok(())
    }

    /// MTC0: Move To Coprocessor 0
    ///
    /// A Status write propagates the cache isolation bit to the bus.
    ///
    /// ```text
    /// MTC0 $t0, $12  # Move $t0 to Status Register
    /// ```
    pub(in crate::core::cpu) fn op_mtc0(&mut self, rt: u8, rd: u8, bus: &mut Bus) -> Result<()> {
        let value = self.reg(rt);
        self.cop0.write(rd as usize, value);

        if rd as usize == COP0::SR {
            bus.set_cache_isolated(self.cop0.status().contains(Status::ISC));
        }
        Ok(())
    }

    /// RFE: Return From Exception
    ///
    /// Pops the KU/IE stack (bits 0-5): current <- previous,
    /// previous <- old. The old pair keeps its value.
    pub(in crate::core::cpu) fn op_rfe(&mut self) -> Result<()> {
        let status = self.cop0.status().pop_mode();
        self.cop0.set_status(status);
        Ok(())
    }
}
