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

//! Cache control register and cache isolation
//!
//! The only KSEG2 address the core decodes is the cache control register
//! at 0xFFFE0130. Cache contents are not emulated. What matters to software
//! is the COP0 "isolate cache" status bit: while it is set, stores go to the
//! (absent) data cache instead of memory, which the BIOS relies on when it
//! flushes the instruction cache. The bus models that by dropping stores.

use super::access::AccessWidth;
use super::Bus;
use crate::core::error::{EmulatorError, Result};

impl Bus {
    /// Start of KSEG2
    pub(super) const KSEG2_START: u32 = 0xC000_0000;

    /// Cache control register address
    pub const CACHE_CONTROL: u32 = 0xFFFE_0130;

    /// Mirror of COP0 status bit 16 (IsC)
    pub fn set_cache_isolated(&mut self, isolated: bool) {
        if isolated != self.cache_isolated {
            log::debug!("Cache isolation {}", if isolated { "on" } else { "off" });
        }
        self.cache_isolated = isolated;
    }

    pub fn cache_isolated(&self) -> bool {
        self.cache_isolated
    }

    pub fn cache_control(&self) -> u32 {
        self.cache_control
    }

    /// Read from KSEG2
    ///
    /// Narrow reads of the cache control register return the addressed lane.
    pub(super) fn kseg2_load<W: AccessWidth>(&self, vaddr: u32) -> Result<W> {
        if vaddr & !3 != Self::CACHE_CONTROL {
            return Err(EmulatorError::InvalidMemoryAccess { address: vaddr });
        }
        let shift = (vaddr & 3) * 8;
        Ok(W::from_u32(self.cache_control >> shift))
    }

    /// Write to KSEG2
    ///
    /// Narrow writes merge into the addressed lane and keep the other bytes.
    pub(super) fn kseg2_store<W: AccessWidth>(&mut self, vaddr: u32, value: W) -> Result<()> {
        if vaddr & !3 != Self::CACHE_CONTROL {
            return Err(EmulatorError::InvalidMemoryAccess { address: vaddr });
        }
        let shift = (vaddr & 3) * 8;
        let lane = (u32::MAX >> (32 - W::BYTES * 8)) << shift;
        self.cache_control = (self.cache_control & !lane) | ((value.to_u32() << shift) & lane);
        log::debug!("Cache control = 0x{:08X}", self.cache_control);
        Ok(())
    }
}
