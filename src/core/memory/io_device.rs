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

//! I/O device trait for memory-mapped peripherals
//!
//! Every register-level peripheral (interrupt controller, DMA, timers, GPU,
//! SPU) implements [`IODevice`]. The bus owns each device by value and
//! forwards accesses with a device-relative offset, so dispatch is a plain
//! `match` on the decoded target with no trait objects involved.
//!
//! # Example
//!
//! ```
//! use psxcore::core::error::Result;
//! use psxcore::core::memory::IODevice;
//!
//! struct Latch {
//!     value: u32,
//! }
//!
//! impl IODevice for Latch {
//!     fn address_range(&self) -> (u32, u32) {
//!         (0x1F801F00, 0x1F801F03)
//!     }
//!
//!     fn read_register(&mut self, _offset: u32) -> Result<u32> {
//!         Ok(self.value)
//!     }
//!
//!     fn write_register(&mut self, _offset: u32, value: u32) -> Result<()> {
//!         self.value = value;
//!         Ok(())
//!     }
//! }
//!
//! let mut latch = Latch { value: 0 };
//! latch.write_register16(2, 0xBEEF).unwrap();
//! assert_eq!(latch.read_register(0).unwrap(), 0xBEEF_0000);
//! ```

use crate::core::error::Result;

/// Trait for memory-mapped I/O devices
///
/// Devices must implement the 32-bit methods. The 8-bit and 16-bit methods
/// default to a read-modify-write of the containing word; devices whose
/// registers are natively narrower override them.
///
/// Reads take `&mut self` because several registers have read side effects
/// (timer mode flags clear on read, for example).
pub trait IODevice {
    /// Get the address range this device responds to
    ///
    /// Returns `(start, end)` physical addresses, both inclusive.
    fn address_range(&self) -> (u32, u32);

    /// Check if this device contains the given physical address
    fn contains(&self, addr: u32) -> bool {
        let (start, end) = self.address_range();
        addr >= start && addr <= end
    }

    /// Read a 32-bit value from a device register
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset from device base address (4-byte aligned)
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::UnmappedIo` when the offset lands in a hole
    /// inside the device's range.
    fn read_register(&mut self, offset: u32) -> Result<u32>;

    /// Write a 32-bit value to a device register
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset from device base address (4-byte aligned)
    /// * `value` - 32-bit value to write
    fn write_register(&mut self, offset: u32, value: u32) -> Result<()>;

    /// Read a 16-bit value from a device register
    fn read_register16(&mut self, offset: u32) -> Result<u16> {
        let value = self.read_register(offset & !0x03)?;
        let shift = (offset & 0x02) * 8;
        Ok((value >> shift) as u16)
    }

    /// Write a 16-bit value to a device register
    fn write_register16(&mut self, offset: u32, value: u16) -> Result<()> {
        let aligned = offset & !0x03;
        let shift = (offset & 0x02) * 8;
        let mask = !(0xFFFFu32 << shift);
        let current = self.read_register(aligned)?;
        self.write_register(aligned, (current & mask) | ((value as u32) << shift))
    }

    /// Read an 8-bit value from a device register
    fn read_register8(&mut self, offset: u32) -> Result<u8> {
        let value = self.read_register(offset & !0x03)?;
        let shift = (offset & 0x03) * 8;
        Ok((value >> shift) as u8)
    }

    /// Write an 8-bit value to a device register
    fn write_register8(&mut self, offset: u32, value: u8) -> Result<()> {
        let aligned = offset & !0x03;
        let shift = (offset & 0x03) * 8;
        let mask = !(0xFFu32 << shift);
        let current = self.read_register(aligned)?;
        self.write_register(aligned, (current & mask) | ((value as u32) << shift))
    }

    /// Device name for logging
    fn name(&self) -> &'static str {
        "Unknown Device"
    }
}
