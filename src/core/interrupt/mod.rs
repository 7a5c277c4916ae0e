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

//! PSX Interrupt Controller Implementation
//!
//! ## Registers
//!
//! - **I_STAT** (0x1F801070): pending interrupt bitmap. A write replaces
//!   the whole bitmap.
//! - **I_MASK** (0x1F801074): enable bitmap. 1 = line may reach the CPU.
//!
//! Both registers are 16 bits wide; the upper halfword reads as zero.
//!
//! ## Interrupt Sources (Bit Positions)
//!
//! ```text
//! Bit  | Source
//! -----|-----------
//! 0    | VBLANK
//! 1    | GPU
//! 2    | CDROM
//! 3    | DMA
//! 4-6  | TIMER0-2
//! 7    | CONTROLLER
//! 8    | SIO
//! 9    | SPU
//! 10   | LIGHTPEN
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::IODevice;

#[cfg(test)]
mod tests;

/// Interrupt source bit flags
pub mod interrupts {
    pub const VBLANK: u16 = 1 << 0;
    pub const GPU: u16 = 1 << 1;
    pub const CDROM: u16 = 1 << 2;
    pub const DMA: u16 = 1 << 3;
    pub const TIMER0: u16 = 1 << 4;
    pub const TIMER1: u16 = 1 << 5;
    pub const TIMER2: u16 = 1 << 6;
    pub const CONTROLLER: u16 = 1 << 7;
    pub const SIO: u16 = 1 << 8;
    pub const SPU: u16 = 1 << 9;
    pub const LIGHTPEN: u16 = 1 << 10;

    /// Timer interrupt bit for channel `n` (0-2)
    pub const fn timer(n: usize) -> u16 {
        TIMER0 << n
    }
}

/// PlayStation Interrupt Controller
///
/// # Example
///
/// ```
/// use psxcore::core::interrupt::{InterruptController, interrupts};
///
/// let mut ic = InterruptController::new();
/// ic.request(interrupts::VBLANK);
/// ic.write_mask(interrupts::VBLANK as u32);
/// assert!(ic.is_pending());
///
/// ic.write_status(0);
/// assert!(!ic.is_pending());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptController {
    /// I_STAT (0x1F801070)
    status: u16,

    /// I_MASK (0x1F801074)
    mask: u16,
}

impl InterruptController {
    /// Physical address of I_STAT
    pub const I_STAT: u32 = 0x1F80_1070;
    /// Physical address of I_MASK
    pub const I_MASK: u32 = 0x1F80_1074;

    /// Create a controller with all lines cleared and masked
    pub fn new() -> Self {
        Self { status: 0, mask: 0 }
    }

    /// Raise one or more interrupt lines
    ///
    /// Called by peripherals; bits are ORed into I_STAT.
    pub fn request(&mut self, interrupt: u16) {
        self.status |= interrupt;
        log::trace!(
            "IRQ requested: 0x{:04X}, status=0x{:04X}",
            interrupt,
            self.status
        );
    }

    /// True when any unmasked line is pending
    pub fn is_pending(&self) -> bool {
        (self.status & self.mask) != 0
    }

    pub fn read_status(&self) -> u32 {
        self.status as u32
    }

    /// Replace I_STAT
    pub fn write_status(&mut self, value: u32) {
        self.status = value as u16;
        log::trace!("I_STAT = 0x{:04X}", self.status);
    }

    pub fn read_mask(&self) -> u32 {
        self.mask as u32
    }

    /// Replace I_MASK
    pub fn write_mask(&mut self, value: u32) {
        self.mask = value as u16;
        log::debug!("IRQ mask set: 0x{:04X}", self.mask);
    }
}

impl IODevice for InterruptController {
    fn address_range(&self) -> (u32, u32) {
        (Self::I_STAT, Self::I_MASK + 3)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        match offset {
            0x0 => Ok(self.read_status()),
            0x4 => Ok(self.read_mask()),
            _ => Err(EmulatorError::UnmappedIo {
                address: Self::I_STAT + offset,
                width: 4,
            }),
        }
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        match offset {
            0x0 => self.write_status(value),
            0x4 => self.write_mask(value),
            _ => {
                return Err(EmulatorError::UnmappedIo {
                    address: Self::I_STAT + offset,
                    width: 4,
                })
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Interrupt Controller"
    }
}
