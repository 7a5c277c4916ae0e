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

//! GPU register interface
//!
//! The core only sees the GPU through two word-wide ports:
//!
//! | Address    | Read    | Write |
//! |------------|---------|-------|
//! | 0x1F801810 | GPUREAD | GP0   |
//! | 0x1F801814 | GPUSTAT | GP1   |
//!
//! GP0 words (drawing commands and their parameters) are queued in a FIFO
//! that the rasterizer drains with [`GPU::drain_gp0`]. GP1 control commands
//! are applied to the status register directly.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::IODevice;

#[cfg(test)]
mod tests;

/// GPU register state
///
/// # Example
///
/// ```
/// use psxcore::core::gpu::GPU;
///
/// let mut gpu = GPU::new();
/// gpu.submit_gp0(0xE100_0000);
/// assert_eq!(gpu.drain_gp0(), vec![0xE100_0000]);
///
/// // Ready bits always read as set
/// assert_eq!(gpu.read_status() & 0x1C00_0000, 0x1C00_0000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GPU {
    /// GPUSTAT without the forced ready bits
    status: u32,

    /// GP0 words waiting for the rasterizer
    command_fifo: VecDeque<u32>,

    /// Value returned by the next GPUREAD
    read_latch: u32,

    /// GP1(05h) parameter
    display_start: u32,

    /// GP1(06h) parameter
    horizontal_range: u32,

    /// GP1(07h) parameter
    vertical_range: u32,
}

impl GPU {
    /// GP0 / GPUREAD
    pub const GP0: u32 = 0x1F80_1810;
    /// GP1 / GPUSTAT
    pub const GP1: u32 = 0x1F80_1814;

    /// GPUSTAT after GP1(00h)
    const RESET_STATUS: u32 = 0x1480_2000;

    /// Ready to receive command, send VRAM, receive DMA block
    const READY_BITS: u32 = 0x1C00_0000;

    const STATUS_DISPLAY_DISABLED: u32 = 1 << 23;
    const STATUS_IRQ: u32 = 1 << 24;

    /// Words kept before the oldest queued GP0 word is dropped
    pub const FIFO_CAPACITY: usize = 4096;

    /// GPU version reported by GP1(10h) info request 07h
    const GPU_VERSION: u32 = 2;

    pub fn new() -> Self {
        Self {
            status: Self::RESET_STATUS,
            command_fifo: VecDeque::new(),
            read_latch: 0,
            display_start: 0,
            horizontal_range: 0,
            vertical_range: 0,
        }
    }

    /// Queue a GP0 word
    pub fn submit_gp0(&mut self, word: u32) {
        if self.command_fifo.len() == Self::FIFO_CAPACITY {
            self.command_fifo.pop_front();
            log::trace!("GP0 FIFO full, dropping oldest word");
        }
        self.command_fifo.push_back(word);
        log::trace!("GP0 0x{:08X}", word);
    }

    /// Take every queued GP0 word, oldest first
    pub fn drain_gp0(&mut self) -> Vec<u32> {
        self.command_fifo.drain(..).collect()
    }

    /// Number of GP0 words waiting
    pub fn pending_gp0(&self) -> usize {
        self.command_fifo.len()
    }

    /// Execute a GP1 control command
    pub fn submit_gp1(&mut self, word: u32) {
        let command = word >> 24;
        let param = word & 0x00FF_FFFF;

        match command {
            0x00 => {
                self.status = Self::RESET_STATUS;
                self.command_fifo.clear();
                self.read_latch = 0;
                log::debug!("GP1 reset GPU");
            }
            0x01 => {
                self.command_fifo.clear();
                log::debug!("GP1 clear command buffer");
            }
            0x02 => {
                self.status &= !Self::STATUS_IRQ;
                log::debug!("GP1 acknowledge IRQ1");
            }
            0x03 => {
                if param & 1 != 0 {
                    self.status |= Self::STATUS_DISPLAY_DISABLED;
                } else {
                    self.status &= !Self::STATUS_DISPLAY_DISABLED;
                }
                log::debug!("GP1 display {}", if param & 1 != 0 { "off" } else { "on" });
            }
            0x04 => {
                self.status = (self.status & !(3 << 29)) | ((param & 3) << 29);
                log::debug!("GP1 DMA direction {}", param & 3);
            }
            0x05 => self.display_start = param,
            0x06 => self.horizontal_range = param,
            0x07 => self.vertical_range = param,
            0x08 => self.set_display_mode(param),
            0x10..=0x1F => self.gpu_info(param),
            _ => log::warn!("Unhandled GP1 command 0x{:02X} (0x{:08X})", command, word),
        }
    }

    /// GP1(08h): horizontal/vertical resolution, video mode, color depth,
    /// interlace and the "reverse" flag
    fn set_display_mode(&mut self, param: u32) {
        let mut status = self.status & !0x007F_4000;
        status |= (param & 0x3) << 17;
        status |= ((param >> 2) & 1) << 19;
        status |= ((param >> 3) & 1) << 20;
        status |= ((param >> 4) & 1) << 21;
        status |= ((param >> 5) & 1) << 22;
        status |= ((param >> 6) & 1) << 16;
        status |= ((param >> 7) & 1) << 14;
        self.status = status;
        log::debug!("GP1 display mode 0x{:02X}", param & 0xFF);
    }

    /// GP1(10h): latch an info value for the next GPUREAD
    fn gpu_info(&mut self, param: u32) {
        self.read_latch = match param & 0x7 {
            0x7 => Self::GPU_VERSION,
            _ => 0,
        };
        log::debug!("GPU info request {:X}", param & 0xF);
    }

    /// GPUSTAT with the ready bits forced on
    pub fn read_status(&self) -> u32 {
        self.status | Self::READY_BITS
    }

    /// GPUREAD
    pub fn read_data(&self) -> u32 {
        self.read_latch
    }

    /// Display disable flag (GPUSTAT bit 23)
    pub fn display_disabled(&self) -> bool {
        self.status & Self::STATUS_DISPLAY_DISABLED != 0
    }

    /// DMA direction (GPUSTAT bits 29-30)
    pub fn dma_direction(&self) -> u32 {
        (self.status >> 29) & 3
    }

    pub fn display_start(&self) -> u32 {
        self.display_start
    }

    pub fn display_range(&self) -> (u32, u32) {
        (self.horizontal_range, self.vertical_range)
    }
}

impl Default for GPU {
    fn default() -> Self {
        Self::new()
    }
}

impl IODevice for GPU {
    fn address_range(&self) -> (u32, u32) {
        (Self::GP0, Self::GP1 + 3)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        match offset {
            0x0 => Ok(self.read_data()),
            0x4 => Ok(self.read_status()),
            _ => Err(EmulatorError::UnmappedIo {
                address: Self::GP0 + offset,
                width: 4,
            }),
        }
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        match offset {
            0x0 => self.submit_gp0(value),
            0x4 => self.submit_gp1(value),
            _ => {
                return Err(EmulatorError::UnmappedIo {
                    address: Self::GP0 + offset,
                    width: 4,
                })
            }
        }
        Ok(())
    }

    /// Narrow writes cannot form a command word; they are logged and dropped
    fn write_register16(&mut self, offset: u32, value: u16) -> Result<()> {
        log::warn!("Ignoring 16-bit GPU write +0x{:X} = 0x{:04X}", offset, value);
        Ok(())
    }

    fn write_register8(&mut self, offset: u32, value: u8) -> Result<()> {
        log::warn!("Ignoring 8-bit GPU write +0x{:X} = 0x{:02X}", offset, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "GPU"
    }
}
