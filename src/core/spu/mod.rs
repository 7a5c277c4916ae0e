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

//! SPU (Sound Processing Unit) register file
//!
//! The SPU exposes 512 halfword registers at 0x1F801C00-0x1F801FFF:
//! 24 voices × 8 registers, then the global control block. Only the
//! register semantics the CPU can observe are modeled here; voice playback
//! and mixing live outside the core.

mod registers;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::memory::IODevice;

pub use registers::{SPUControl, TransferMode};

/// SPU register state
///
/// # Example
///
/// ```
/// use psxcore::core::spu::SPU;
///
/// let mut spu = SPU::new();
/// spu.write16(SPU::SPUCNT, 0xC020);
/// assert_eq!(spu.read16(SPU::SPUSTAT) & 0x3F, 0x20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SPU {
    registers: Vec<u16>,
}

impl SPU {
    /// Physical address of the first voice register
    pub const BASE: u32 = 0x1F80_1C00;

    /// Number of halfword registers
    const REGISTER_COUNT: usize = 0x200;

    /// Number of voices
    pub const VOICE_COUNT: usize = 24;

    /// SPUCNT offset
    pub const SPUCNT: u32 = 0x1AA;
    /// SPUSTAT offset
    pub const SPUSTAT: u32 = 0x1AE;

    pub fn new() -> Self {
        Self {
            registers: vec![0; Self::REGISTER_COUNT],
        }
    }

    /// Read the halfword register at `offset` (relative to 0x1F801C00)
    pub fn read16(&self, offset: u32) -> u16 {
        self.registers[Self::index(offset)]
    }

    /// Write the halfword register at `offset`
    pub fn write16(&mut self, offset: u32, value: u16) {
        let offset = offset & !1;
        self.registers[Self::index(offset)] = value;

        if offset == Self::SPUCNT {
            // SPUSTAT bits 0-5 mirror SPUCNT bits 0-5
            let stat = &mut self.registers[Self::index(Self::SPUSTAT)];
            *stat = (*stat & !0x3F) | (value & 0x3F);
            log::debug!("SPUCNT = 0x{:04X} ({:?})", value, SPUControl::from_bits(value));
        } else {
            log::trace!("SPU +0x{:03X} = 0x{:04X}", offset, value);
        }
    }

    /// Voice register `reg` (0-7) of voice `voice` (0-23)
    pub fn voice_register(&self, voice: usize, reg: u32) -> u16 {
        self.read16((voice as u32) * 0x10 + reg * 2)
    }

    /// Decoded SPUCNT
    pub fn control(&self) -> SPUControl {
        SPUControl::from_bits(self.read16(Self::SPUCNT))
    }

    #[inline(always)]
    fn index(offset: u32) -> usize {
        ((offset as usize) >> 1) & (Self::REGISTER_COUNT - 1)
    }
}

impl Default for SPU {
    fn default() -> Self {
        Self::new()
    }
}

impl IODevice for SPU {
    fn address_range(&self) -> (u32, u32) {
        (Self::BASE, Self::BASE + 0x3FF)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        let low = self.read16(offset) as u32;
        let high = self.read16(offset + 2) as u32;
        Ok(low | (high << 16))
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        self.write16(offset, value as u16);
        self.write16(offset + 2, (value >> 16) as u16);
        Ok(())
    }

    fn read_register16(&mut self, offset: u32) -> Result<u16> {
        Ok(self.read16(offset))
    }

    fn write_register16(&mut self, offset: u32, value: u16) -> Result<()> {
        self.write16(offset, value);
        Ok(())
    }

    fn read_register8(&mut self, offset: u32) -> Result<u8> {
        let value = self.read16(offset);
        Ok((value >> ((offset & 1) * 8)) as u8)
    }

    fn write_register8(&mut self, offset: u32, value: u8) -> Result<()> {
        let shift = (offset & 1) * 8;
        let current = self.read16(offset);
        let merged = (current & !(0xFF << shift)) | ((value as u16) << shift);
        self.write16(offset, merged);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SPU"
    }
}
