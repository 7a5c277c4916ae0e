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

//! Memory bus implementation
//!
//! The Bus routes every CPU load and store to a backing byte array or to a
//! peripheral register block. Routing is a pure function of the address:
//!
//! 1. KSEG2 (0xC0000000 and up) only decodes the cache control register.
//! 2. Everything else drops the top three bits, so KUSEG, KSEG0 and KSEG1
//!    alias the same physical byte.
//! 3. The physical address selects one of seven regions (see [`region`]),
//!    and the region's mask turns it into an index.
//! 4. The I/O region is further decoded by address to a peripheral.
//!
//! Halfword and word accesses ignore the misaligned low address bits, as the
//! hardware bus does. All multi-byte values are little-endian.
//!
//! # Example
//!
//! ```
//! use psxcore::core::memory::Bus;
//!
//! let mut bus = Bus::new();
//!
//! // Write to RAM via KSEG0
//! bus.write32(0x80000000, 0x12345678).unwrap();
//!
//! // Same byte through KUSEG and KSEG1
//! assert_eq!(bus.read32(0x00000000).unwrap(), 0x12345678);
//! assert_eq!(bus.read32(0xA0000000).unwrap(), 0x12345678);
//! ```

mod access;
mod cache;
mod io_device;
mod io_ports;
pub mod region;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::core::dma::DMA;
use crate::core::error::{EmulatorError, Result};
use crate::core::gpu::GPU;
use crate::core::interrupt::{interrupts, InterruptController};
use crate::core::spu::SPU;
use crate::core::timer::Timers;

pub use access::AccessWidth;
pub use io_device::IODevice;
pub use region::{MemoryRegion, RegionDescriptor, PHYSICAL_MASK, REGIONS};

/// Memory bus owning every region and peripheral
pub struct Bus {
    /// Backing store per region, indexed by `MemoryRegion::index`
    regions: [Box<[u8]>; MemoryRegion::COUNT],

    /// Cache Control register (0xFFFE0130)
    cache_control: u32,

    /// Stores are dropped while set (COP0 status IsC)
    cache_isolated: bool,

    interrupts: InterruptController,
    dma: DMA,
    timers: Timers,
    gpu: GPU,
    spu: SPU,
}

impl Bus {
    /// BIOS size (512KB)
    pub const BIOS_SIZE: usize = 512 * 1024;

    /// RAM size (2MB)
    pub const RAM_SIZE: usize = 2 * 1024 * 1024;

    /// Create a new Bus with zeroed memory and peripherals at reset state
    pub fn new() -> Self {
        Self {
            regions: REGIONS.map(|desc| vec![0u8; desc.size].into_boxed_slice()),
            cache_control: 0,
            cache_isolated: false,
            interrupts: InterruptController::new(),
            dma: DMA::new(),
            timers: Timers::new(),
            gpu: GPU::new(),
            spu: SPU::new(),
        }
    }

    /// Reset the bus to its power-on state
    ///
    /// Every region except the BIOS ROM is cleared, and every peripheral
    /// returns to its reset state.
    ///
    /// ```
    /// use psxcore::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write32(0x80000000, 0x12345678).unwrap();
    /// bus.reset();
    /// assert_eq!(bus.read32(0x80000000).unwrap(), 0);
    /// ```
    pub fn reset(&mut self) {
        for desc in REGIONS.iter() {
            if desc.region != MemoryRegion::BIOS {
                self.regions[desc.region.index()].fill(0);
            }
        }
        self.cache_control = 0;
        self.cache_isolated = false;
        self.interrupts = InterruptController::new();
        self.dma = DMA::new();
        self.timers = Timers::new();
        self.gpu = GPU::new();
        self.spu = SPU::new();
    }

    /// Copy a BIOS image into the BIOS region
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::InvalidBiosSize` unless the image is exactly 512KB.
    pub fn load_bios(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != Self::BIOS_SIZE {
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: data.len(),
            });
        }
        self.regions[MemoryRegion::BIOS.index()].copy_from_slice(data);
        Ok(())
    }

    /// Load a BIOS image from disk
    pub fn load_bios_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let data = std::fs::read(path.as_ref())?;
        self.load_bios(&data)?;
        log::info!("BIOS loaded from {}", path.as_ref().display());
        Ok(())
    }

    /// Load a value of width `W`
    ///
    /// The address is truncated to `W`'s alignment first.
    ///
    /// # Errors
    ///
    /// - `UnmappedIo` for an I/O window address no peripheral decodes
    /// - `InvalidMemoryAccess` for KSEG2 addresses other than cache control
    #[inline]
    pub fn load<W: AccessWidth>(&mut self, vaddr: u32) -> Result<W> {
        let vaddr = vaddr & W::ALIGN_MASK;
        if vaddr >= Self::KSEG2_START {
            return self.kseg2_load(vaddr);
        }

        let paddr = Self::translate_address(vaddr);
        let region = MemoryRegion::from_physical(paddr);
        if region == MemoryRegion::IO {
            return self.io_load(paddr);
        }

        Ok(W::read_le(&self.regions[region.index()], region.offset(paddr)))
    }

    /// Store a value of width `W`
    ///
    /// Dropped while the cache is isolated. Writes to the BIOS ROM are ignored.
    #[inline]
    pub fn store<W: AccessWidth>(&mut self, vaddr: u32, value: W) -> Result<()> {
        let vaddr = vaddr & W::ALIGN_MASK;
        if vaddr >= Self::KSEG2_START {
            return self.kseg2_store(vaddr, value);
        }

        if self.cache_isolated {
            log::trace!("Isolated store to 0x{:08X} dropped", vaddr);
            return Ok(());
        }

        let paddr = Self::translate_address(vaddr);
        match MemoryRegion::from_physical(paddr) {
            MemoryRegion::IO => self.io_store(paddr, value),
            MemoryRegion::BIOS => {
                log::trace!("Ignoring write to BIOS ROM at 0x{:08X}", vaddr);
                Ok(())
            }
            region => {
                value.write_le(&mut self.regions[region.index()], region.offset(paddr));
                Ok(())
            }
        }
    }

    #[inline(always)]
    pub fn read8(&mut self, vaddr: u32) -> Result<u8> {
        self.load(vaddr)
    }

    #[inline(always)]
    pub fn read16(&mut self, vaddr: u32) -> Result<u16> {
        self.load(vaddr)
    }

    #[inline(always)]
    pub fn read32(&mut self, vaddr: u32) -> Result<u32> {
        self.load(vaddr)
    }

    #[inline(always)]
    pub fn write8(&mut self, vaddr: u32, value: u8) -> Result<()> {
        self.store(vaddr, value)
    }

    #[inline(always)]
    pub fn write16(&mut self, vaddr: u32, value: u16) -> Result<()> {
        self.store(vaddr, value)
    }

    #[inline(always)]
    pub fn write32(&mut self, vaddr: u32, value: u32) -> Result<()> {
        self.store(vaddr, value)
    }

    /// Copy bytes into RAM starting at `vaddr`, wrapping at the 2MB mirror
    pub fn copy_to_ram(&mut self, vaddr: u32, data: &[u8]) {
        let ram = &mut self.regions[MemoryRegion::RAM.index()];
        let base = Self::translate_address(vaddr);
        for (i, &byte) in data.iter().enumerate() {
            ram[MemoryRegion::RAM.offset(base.wrapping_add(i as u32))] = byte;
        }
    }

    /// Fill `len` bytes of RAM starting at `vaddr`
    ///
    /// `len` is clamped to the size of RAM; a longer fill would only wrap
    /// around the mirror and rewrite the same bytes.
    pub fn fill_ram(&mut self, vaddr: u32, len: u32, value: u8) {
        let ram = &mut self.regions[MemoryRegion::RAM.index()];
        let ram_size = ram.len() as u32;
        if len > ram_size {
            log::warn!(
                "RAM fill of 0x{:X} bytes at 0x{:08X} clamped to 0x{:X}",
                len,
                vaddr,
                ram_size
            );
        }
        let base = Self::translate_address(vaddr);
        for i in 0..len.min(ram_size) {
            ram[MemoryRegion::RAM.offset(base.wrapping_add(i))] = value;
        }
    }

    /// Raw backing store of a region
    pub fn region(&self, region: MemoryRegion) -> &[u8] {
        &self.regions[region.index()]
    }

    pub(crate) fn region_mut(&mut self, region: MemoryRegion) -> &mut [u8] {
        &mut self.regions[region.index()]
    }

    pub(crate) fn set_cache_control(&mut self, value: u32) {
        self.cache_control = value;
    }

    /// Advance peripherals by one step
    ///
    /// Timers count and raise their interrupt lines. Returns whether an
    /// unmasked interrupt is pending afterwards.
    pub fn tick_peripherals(&mut self) -> bool {
        let irq = self.timers.tick();
        if irq != 0 {
            self.interrupts.request(irq);
        }
        self.interrupts.is_pending()
    }

    /// Report a finished DMA transfer on `channel`
    ///
    /// Raises the DMA interrupt line when DICR says so.
    pub fn complete_dma(&mut self, channel: usize) {
        if self.dma.complete(channel) {
            self.interrupts.request(interrupts::DMA);
        }
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    pub fn dma(&self) -> &DMA {
        &self.dma
    }

    pub fn dma_mut(&mut self) -> &mut DMA {
        &mut self.dma
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    pub fn gpu(&self) -> &GPU {
        &self.gpu
    }

    pub fn gpu_mut(&mut self) -> &mut GPU {
        &mut self.gpu
    }

    pub fn spu(&self) -> &SPU {
        &self.spu
    }

    pub fn spu_mut(&mut self) -> &mut SPU {
        &mut self.spu
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
