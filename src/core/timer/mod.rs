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

//! PSX Timer/Counter registers
//!
//! Three channels, each a 16-bit counter with a mode and a target register
//! at 16-byte intervals from 0x1F801100. The counters advance once per
//! [`Timers::tick`]; clock-source selection and sync modes are not modeled,
//! so every channel free-runs on the system tick.
//!
//! ## Mode Register Format (16 bits)
//!
//! ```text
//! 12:    Reached 0xFFFF (cleared on read)
//! 11:    Reached target (cleared on read)
//! 10:    IRQ request, active low (set to 1 on mode write)
//! 8-9:   Clock source
//! 7:     IRQ pulse/toggle
//! 6:     IRQ repeat
//! 5:     IRQ on 0xFFFF
//! 4:     IRQ on target
//! 3:     Reset counter after target (0 = after 0xFFFF)
//! 0-2:   Sync enable / mode
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::{EmulatorError, Result};
use crate::core::interrupt::interrupts;
use crate::core::memory::IODevice;

#[cfg(test)]
mod tests;

/// A single timer channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerChannel {
    counter: u16,
    mode: u16,
    target: u16,
    /// Set once a one-shot IRQ has fired; cleared by a mode write
    fired: bool,
}

impl TimerChannel {
    const RESET_ON_TARGET: u16 = 1 << 3;
    const IRQ_ON_TARGET: u16 = 1 << 4;
    const IRQ_ON_MAX: u16 = 1 << 5;
    const IRQ_REPEAT: u16 = 1 << 6;
    const IRQ_TOGGLE: u16 = 1 << 7;
    const IRQ_REQUEST: u16 = 1 << 10;
    const REACHED_TARGET: u16 = 1 << 11;
    const REACHED_MAX: u16 = 1 << 12;

    /// Bits the CPU may write (0-9)
    const WRITABLE: u16 = 0x03FF;

    /// Create a new timer channel
    ///
    /// ```
    /// use psxcore::core::timer::TimerChannel;
    ///
    /// let timer = TimerChannel::new();
    /// assert_eq!(timer.read_counter(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            counter: 0,
            mode: Self::IRQ_REQUEST,
            target: 0,
            fired: false,
        }
    }

    #[inline(always)]
    pub fn read_counter(&self) -> u16 {
        self.counter
    }

    pub fn write_counter(&mut self, value: u32) {
        self.counter = value as u16;
    }

    /// Read mode; clears both reached flags
    pub fn read_mode(&mut self) -> u16 {
        let value = self.mode;
        self.mode &= !(Self::REACHED_TARGET | Self::REACHED_MAX);
        value
    }

    /// Mode value without the read side effect
    pub fn peek_mode(&self) -> u16 {
        self.mode
    }

    /// Write mode; resets the counter and re-arms the IRQ
    pub fn write_mode(&mut self, value: u32) {
        self.mode = (value as u16 & Self::WRITABLE) | Self::IRQ_REQUEST;
        self.counter = 0;
        self.fired = false;
    }

    #[inline(always)]
    pub fn read_target(&self) -> u16 {
        self.target
    }

    pub fn write_target(&mut self, value: u32) {
        self.target = value as u16;
    }

    /// Advance by one tick; returns `true` when the channel's IRQ fires
    fn tick(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(1);
        let mut irq = false;

        if self.counter == self.target {
            self.mode |= Self::REACHED_TARGET;
            irq |= self.mode & Self::IRQ_ON_TARGET != 0;
            if self.mode & Self::RESET_ON_TARGET != 0 {
                self.counter = 0;
            }
        }

        if self.counter == 0xFFFF {
            self.mode |= Self::REACHED_MAX;
            irq |= self.mode & Self::IRQ_ON_MAX != 0;
            if self.mode & Self::RESET_ON_TARGET == 0 {
                self.counter = 0;
            }
        }

        irq && self.raise_irq()
    }

    fn raise_irq(&mut self) -> bool {
        if self.fired && self.mode & Self::IRQ_REPEAT == 0 {
            return false;
        }
        self.fired = true;
        if self.mode & Self::IRQ_TOGGLE != 0 {
            self.mode ^= Self::IRQ_REQUEST;
        } else {
            self.mode &= !Self::IRQ_REQUEST;
        }
        true
    }
}

/// All three timer channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    channels: [TimerChannel; 3],
}

impl Timers {
    /// Physical address of timer 0's counter
    pub const BASE: u32 = 0x1F80_1100;

    pub fn new() -> Self {
        Self {
            channels: [TimerChannel::new(), TimerChannel::new(), TimerChannel::new()],
        }
    }

    pub fn channel(&self, index: usize) -> &TimerChannel {
        &self.channels[index]
    }

    pub fn channel_mut(&mut self, index: usize) -> &mut TimerChannel {
        &mut self.channels[index]
    }

    /// Advance every channel by one tick
    ///
    /// Returns the interrupt bits (`interrupts::TIMERn`) to raise.
    pub fn tick(&mut self) -> u16 {
        let mut irq = 0;
        for (n, channel) in self.channels.iter_mut().enumerate() {
            if channel.tick() {
                log::trace!("Timer {} IRQ", n);
                irq |= interrupts::timer(n);
            }
        }
        irq
    }

    fn unmapped(offset: u32, width: u8) -> EmulatorError {
        EmulatorError::UnmappedIo {
            address: Self::BASE + offset,
            width,
        }
    }
}

impl Default for TimerChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl IODevice for Timers {
    fn address_range(&self) -> (u32, u32) {
        (Self::BASE, Self::BASE + 0x2F)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        let channel = &mut self.channels[(offset >> 4) as usize];
        match offset & 0xF {
            0x0 => Ok(channel.read_counter() as u32),
            0x4 => Ok(channel.read_mode() as u32),
            0x8 => Ok(channel.read_target() as u32),
            _ => Err(Self::unmapped(offset, 4)),
        }
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        let channel = &mut self.channels[(offset >> 4) as usize];
        match offset & 0xF {
            0x0 => channel.write_counter(value),
            0x4 => channel.write_mode(value),
            0x8 => channel.write_target(value),
            _ => return Err(Self::unmapped(offset, 4)),
        }
        log::trace!("Timer write +0x{:02X} = 0x{:04X}", offset, value);
        Ok(())
    }

    /// Registers are 16 bits; the upper halfword reads as zero and ignores writes
    fn read_register16(&mut self, offset: u32) -> Result<u16> {
        if offset & 0x2 != 0 {
            return Ok(0);
        }
        self.read_register(offset).map(|value| value as u16)
    }

    fn write_register16(&mut self, offset: u32, value: u16) -> Result<()> {
        if offset & 0x2 != 0 {
            return Ok(());
        }
        self.write_register(offset, value as u32)
    }

    fn name(&self) -> &'static str {
        "Timers"
    }
}
