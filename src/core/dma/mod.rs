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

//! DMA (Direct Memory Access) Controller registers
//!
//! The transfer engine itself lives outside the core. This module keeps the
//! register file the CPU sees and the bookkeeping an engine needs: which
//! channels were started, and how completion updates the interrupt register.
//!
//! # DMA Channels
//!
//! | Channel | Device      | Base Address |
//! |---------|-------------|--------------|
//! | 0       | MDEC In     | 0x1F801080   |
//! | 1       | MDEC Out    | 0x1F801090   |
//! | 2       | GPU         | 0x1F8010A0   |
//! | 3       | CD-ROM      | 0x1F8010B0   |
//! | 4       | SPU         | 0x1F8010C0   |
//! | 5       | PIO         | 0x1F8010D0   |
//! | 6       | OTC         | 0x1F8010E0   |
//!
//! Each channel has MADR (+0x0), BCR (+0x4) and CHCR (+0x8).
//! DPCR is at 0x1F8010F0 and DICR at 0x1F8010F4.

use serde::{Deserialize, Serialize};

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::IODevice;

#[cfg(test)]
mod tests;

/// Single DMA channel register block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DMAChannel {
    /// Memory Address Register (MADR), 24 bits
    base_address: u32,

    /// Block Control Register (BCR)
    ///
    /// - Bits 0-15: Block size (words)
    /// - Bits 16-31: Block count
    block_control: u32,

    /// Channel Control Register (CHCR)
    ///
    /// - Bit 0: Direction (0=to RAM, 1=from RAM)
    /// - Bit 1: Address step (0=forward, 1=backward)
    /// - Bits 9-10: Sync mode (0=immediate, 1=block, 2=linked-list)
    /// - Bit 24: Start/busy
    /// - Bit 28: Manual trigger
    channel_control: u32,
}

impl DMAChannel {
    const START_BUSY: u32 = 1 << 24;
    const TRIGGER: u32 = 1 << 28;

    #[inline(always)]
    pub fn base_address(&self) -> u32 {
        self.base_address
    }

    #[inline(always)]
    pub fn block_control(&self) -> u32 {
        self.block_control
    }

    #[inline(always)]
    pub fn channel_control(&self) -> u32 {
        self.channel_control
    }

    /// Start/busy flag (bit 24 of CHCR)
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        (self.channel_control & Self::START_BUSY) != 0
    }

    /// Transfer direction (bit 0 of CHCR), 1 = RAM to device
    #[inline(always)]
    pub fn direction(&self) -> u32 {
        self.channel_control & 1
    }

    /// Synchronization mode (bits 9-10 of CHCR)
    #[inline(always)]
    pub fn sync_mode(&self) -> u32 {
        (self.channel_control >> 9) & 3
    }

    /// Manual trigger (bit 28 of CHCR)
    #[inline(always)]
    pub fn trigger(&self) -> bool {
        (self.channel_control & Self::TRIGGER) != 0
    }

    /// A channel is ready to run once started; immediate mode also needs
    /// the manual trigger
    fn is_ready(&self) -> bool {
        self.is_active() && (self.sync_mode() != 0 || self.trigger())
    }
}

/// DMA controller register file
///
/// # Examples
///
/// ```
/// use psxcore::core::dma::DMA;
///
/// let mut dma = DMA::new();
/// assert_eq!(dma.read_control(), 0x07654321);
///
/// dma.write_base(2, 0x8001_0000);
/// assert_eq!(dma.channel(2).base_address(), 0x0001_0000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DMA {
    channels: [DMAChannel; 7],

    /// DPCR: per-channel priority and enable bits
    control: u32,

    /// DICR: interrupt enables and flags
    interrupt: u32,

    /// Unidentified registers at 0x1F8010F8/0x1F8010FC, stored raw
    unknown: [u32; 2],

    /// Channels started since the last `take_triggered`, one bit each
    triggered: u8,
}

impl DMA {
    pub const CH_MDEC_IN: usize = 0;
    pub const CH_MDEC_OUT: usize = 1;
    pub const CH_GPU: usize = 2;
    pub const CH_CDROM: usize = 3;
    pub const CH_SPU: usize = 4;
    pub const CH_PIO: usize = 5;
    pub const CH_OTC: usize = 6;

    /// Physical address of channel 0's MADR
    pub const BASE: u32 = 0x1F80_1080;

    const DICR_FORCE: u32 = 1 << 15;
    const DICR_MASTER_ENABLE: u32 = 1 << 23;
    const DICR_MASTER_FLAG: u32 = 1 << 31;

    pub fn new() -> Self {
        Self {
            channels: Default::default(),
            control: 0x0765_4321,
            interrupt: 0,
            unknown: [0; 2],
            triggered: 0,
        }
    }

    pub fn channel(&self, channel: usize) -> &DMAChannel {
        &self.channels[channel]
    }

    pub fn read_base(&self, channel: usize) -> u32 {
        self.channels[channel].base_address
    }

    /// Write channel MADR
    pub fn write_base(&mut self, channel: usize, value: u32) {
        self.channels[channel].base_address = value & 0x00FF_FFFF;
        log::trace!("DMA{} MADR = 0x{:08X}", channel, value);
    }

    pub fn read_block_control(&self, channel: usize) -> u32 {
        self.channels[channel].block_control
    }

    /// Write channel BCR
    pub fn write_block_control(&mut self, channel: usize, value: u32) {
        self.channels[channel].block_control = value;
        log::trace!("DMA{} BCR = 0x{:08X}", channel, value);
    }

    pub fn read_channel_control(&self, channel: usize) -> u32 {
        self.channels[channel].channel_control
    }

    /// Write channel CHCR
    ///
    /// Starting a channel whose DPCR enable bit is set queues it for the
    /// transfer engine (see [`DMA::take_triggered`]).
    pub fn write_channel_control(&mut self, channel: usize, value: u32) {
        let value = if channel == Self::CH_OTC {
            // OTC always steps backward; only start, trigger and bit 30 are writable
            (value & 0x5100_0000) | 0x2
        } else {
            value
        };
        self.channels[channel].channel_control = value;
        log::trace!("DMA{} CHCR = 0x{:08X}", channel, value);

        if self.channels[channel].is_ready() && self.is_channel_enabled(channel) {
            log::debug!(
                "DMA{} started: addr=0x{:08X} bcr=0x{:08X} mode={}",
                channel,
                self.channels[channel].base_address,
                self.channels[channel].block_control,
                self.channels[channel].sync_mode()
            );
            self.triggered |= 1 << channel;
        }
    }

    /// Read DPCR
    pub fn read_control(&self) -> u32 {
        self.control
    }

    /// Write DPCR
    pub fn write_control(&mut self, value: u32) {
        self.control = value;
        log::trace!("DPCR = 0x{:08X}", value);
    }

    /// DPCR master enable for a channel (bit 3 of its nibble)
    pub fn is_channel_enabled(&self, channel: usize) -> bool {
        (self.control >> (channel * 4 + 3)) & 1 != 0
    }

    /// Read DICR
    pub fn read_interrupt(&self) -> u32 {
        self.interrupt
    }

    /// Write DICR
    ///
    /// Bits 0-5, 15 and 16-23 are plain read/write. Writing 1 to a flag in
    /// bits 24-30 clears it. Bit 31 is recomputed.
    pub fn write_interrupt(&mut self, value: u32) {
        let flags = (self.interrupt & 0x7F00_0000) & !(value & 0x7F00_0000);
        self.interrupt = flags | (value & 0x00FF_803F);
        self.update_master_flag();
        log::trace!("DICR = 0x{:08X}", self.interrupt);
    }

    /// Drain the set of channels started since the last call
    pub fn take_triggered(&mut self) -> Vec<usize> {
        let pending = std::mem::take(&mut self.triggered);
        (0..7).filter(|ch| pending & (1 << ch) != 0).collect()
    }

    /// Mark a channel's transfer as finished
    ///
    /// Clears start/busy and trigger, sets the channel's DICR flag when its
    /// interrupt is enabled, and returns `true` if the master flag rose (the
    /// caller should raise the DMA interrupt line).
    pub fn complete(&mut self, channel: usize) -> bool {
        self.channels[channel].channel_control &= !(DMAChannel::START_BUSY | DMAChannel::TRIGGER);

        let was_raised = self.interrupt & Self::DICR_MASTER_FLAG != 0;
        if self.interrupt & (1 << (16 + channel)) != 0 {
            self.interrupt |= 1 << (24 + channel);
        }
        self.update_master_flag();
        log::trace!("DMA{} complete, DICR=0x{:08X}", channel, self.interrupt);

        !was_raised && self.interrupt & Self::DICR_MASTER_FLAG != 0
    }

    fn update_master_flag(&mut self) {
        let enables = (self.interrupt >> 16) & 0x7F;
        let flags = (self.interrupt >> 24) & 0x7F;
        let raised = self.interrupt & Self::DICR_FORCE != 0
            || (self.interrupt & Self::DICR_MASTER_ENABLE != 0 && enables & flags != 0);

        if raised {
            self.interrupt |= Self::DICR_MASTER_FLAG;
        } else {
            self.interrupt &= !Self::DICR_MASTER_FLAG;
        }
    }
}

impl Default for DMA {
    fn default() -> Self {
        Self::new()
    }
}

impl IODevice for DMA {
    fn address_range(&self) -> (u32, u32) {
        (Self::BASE, Self::BASE + 0x7F)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        let channel = (offset >> 4) as usize;
        match (channel, offset & 0xC) {
            (0..=6, 0x0) => Ok(self.read_base(channel)),
            (0..=6, 0x4) => Ok(self.read_block_control(channel)),
            (0..=6, 0x8) => Ok(self.read_channel_control(channel)),
            (7, 0x0) => Ok(self.read_control()),
            (7, 0x4) => Ok(self.read_interrupt()),
            (7, 0x8) => Ok(self.unknown[0]),
            (7, 0xC) => Ok(self.unknown[1]),
            _ => Err(EmulatorError::UnmappedIo {
                address: Self::BASE + offset,
                width: 4,
            }),
        }
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        let channel = (offset >> 4) as usize;
        match (channel, offset & 0xC) {
            (0..=6, 0x0) => self.write_base(channel, value),
            (0..=6, 0x4) => self.write_block_control(channel, value),
            (0..=6, 0x8) => self.write_channel_control(channel, value),
            (7, 0x0) => self.write_control(value),
            (7, 0x4) => self.write_interrupt(value),
            (7, 0x8) => self.unknown[0] = value,
            (7, 0xC) => self.unknown[1] = value,
            _ => {
                return Err(EmulatorError::UnmappedIo {
                    address: Self::BASE + offset,
                    width: 4,
                })
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DMA"
    }
}
