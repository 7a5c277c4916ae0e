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

//! Memory region identification and address translation
//!
//! Every virtual address collapses to a 29-bit physical address by dropping
//! the three segment-select bits, so KUSEG, KSEG0 and KSEG1 alias the same
//! bytes. The physical space is then cut into seven back-to-back regions.
//! Each region owns a byte array and an index mask, which is how the small
//! regions repeat across the rest of their window.
//!
//! ```text
//! Region       Window (masked)          Backing   Index mask
//! RAM          0x00000000-0x1EFFFFFF    2 MiB     0x001FFFFF
//! Expansion 1  0x1F000000-0x1F7FFFFF    8 MiB     0x007FFFFF
//! Scratchpad   0x1F800000-0x1F800FFF    1 KiB     0x000003FF
//! I/O ports    0x1F801000-0x1F801FFF    8 KiB     0x00001FFF
//! Expansion 2  0x1F802000-0x1F9FFFFF    8 KiB     0x00001FFF
//! Expansion 3  0x1FA00000-0x1FBFFFFF    2 MiB     0x001FFFFF
//! BIOS ROM     0x1FC00000-0x1FFFFFFF    512 KiB   0x0007FFFF
//! ```

use super::Bus;

/// Mask that strips the KSEG0/KSEG1 segment bits
pub const PHYSICAL_MASK: u32 = 0x1FFF_FFFF;

/// Memory region identification
///
/// Used to identify which memory region an address belongs to. The
/// discriminant doubles as the index into the bus's region arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// Main RAM (2MB)
    RAM = 0,
    /// Expansion region 1 (8MB)
    Expansion1 = 1,
    /// Scratchpad (1KB)
    Scratchpad = 2,
    /// I/O ports
    IO = 3,
    /// Expansion region 2 (8KB)
    Expansion2 = 4,
    /// Expansion region 3 (2MB)
    Expansion3 = 5,
    /// BIOS ROM (512KB)
    BIOS = 6,
}

/// Static description of one region
#[derive(Debug, Clone, Copy)]
pub struct RegionDescriptor {
    pub region: MemoryRegion,
    /// First masked address of the window
    pub start: u32,
    /// One past the last masked address of the window
    pub end: u32,
    /// Backing store size in bytes
    pub size: usize,
    /// Mask applied to the masked address before indexing the backing store
    pub mask: u32,
}

/// Region table, ordered by start address
pub const REGIONS: [RegionDescriptor; MemoryRegion::COUNT] = [
    RegionDescriptor {
        region: MemoryRegion::RAM,
        start: 0x0000_0000,
        end: 0x1F00_0000,
        size: 2 * 1024 * 1024,
        mask: 0x001F_FFFF,
    },
    RegionDescriptor {
        region: MemoryRegion::Expansion1,
        start: 0x1F00_0000,
        end: 0x1F80_0000,
        size: 8 * 1024 * 1024,
        mask: 0x007F_FFFF,
    },
    RegionDescriptor {
        region: MemoryRegion::Scratchpad,
        start: 0x1F80_0000,
        end: 0x1F80_1000,
        size: 1024,
        mask: 0x0000_03FF,
    },
    RegionDescriptor {
        region: MemoryRegion::IO,
        start: 0x1F80_1000,
        end: 0x1F80_2000,
        size: 8 * 1024,
        mask: 0x0000_1FFF,
    },
    RegionDescriptor {
        region: MemoryRegion::Expansion2,
        start: 0x1F80_2000,
        end: 0x1FA0_0000,
        size: 8 * 1024,
        mask: 0x0000_1FFF,
    },
    RegionDescriptor {
        region: MemoryRegion::Expansion3,
        start: 0x1FA0_0000,
        end: 0x1FC0_0000,
        size: 2 * 1024 * 1024,
        mask: 0x001F_FFFF,
    },
    RegionDescriptor {
        region: MemoryRegion::BIOS,
        start: 0x1FC0_0000,
        end: 0x2000_0000,
        size: 512 * 1024,
        mask: 0x0007_FFFF,
    },
];

impl MemoryRegion {
    /// Number of regions in the physical map
    pub const COUNT: usize = 7;

    /// Select the region covering a masked (physical) address
    ///
    /// Pure function of the address: windows are contiguous and disjoint,
    /// so exactly one region matches every value below 0x20000000.
    #[inline(always)]
    pub fn from_physical(paddr: u32) -> MemoryRegion {
        if paddr < 0x1F00_0000 {
            MemoryRegion::RAM
        } else if paddr < 0x1F80_0000 {
            MemoryRegion::Expansion1
        } else if paddr < 0x1F80_1000 {
            MemoryRegion::Scratchpad
        } else if paddr < 0x1F80_2000 {
            MemoryRegion::IO
        } else if paddr < 0x1FA0_0000 {
            MemoryRegion::Expansion2
        } else if paddr < 0x1FC0_0000 {
            MemoryRegion::Expansion3
        } else {
            MemoryRegion::BIOS
        }
    }

    /// Arena index of this region
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Descriptor for this region
    #[inline(always)]
    pub const fn descriptor(self) -> &'static RegionDescriptor {
        &REGIONS[self as usize]
    }

    /// Offset into this region's backing store for a masked address
    #[inline(always)]
    pub const fn offset(self, paddr: u32) -> usize {
        (paddr & REGIONS[self as usize].mask) as usize
    }

    /// Human-readable region name for logs
    pub const fn name(self) -> &'static str {
        match self {
            MemoryRegion::RAM => "RAM",
            MemoryRegion::Expansion1 => "EXP1",
            MemoryRegion::Scratchpad => "Scratchpad",
            MemoryRegion::IO => "I/O",
            MemoryRegion::Expansion2 => "EXP2",
            MemoryRegion::Expansion3 => "EXP3",
            MemoryRegion::BIOS => "BIOS",
        }
    }
}

impl Bus {
    /// Translate virtual address to physical address
    ///
    /// - 0x00001234 (KUSEG) → 0x00001234
    /// - 0x80001234 (KSEG0) → 0x00001234
    /// - 0xA0001234 (KSEG1) → 0x00001234
    #[inline(always)]
    pub fn translate_address(vaddr: u32) -> u32 {
        vaddr & PHYSICAL_MASK
    }

    /// Identify memory region for an address
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::memory::{Bus, MemoryRegion};
    ///
    /// assert_eq!(Bus::identify_region(0x00000000), MemoryRegion::RAM);
    /// assert_eq!(Bus::identify_region(0x9F800000), MemoryRegion::Scratchpad);
    /// assert_eq!(Bus::identify_region(0x1F801070), MemoryRegion::IO);
    /// assert_eq!(Bus::identify_region(0xBFC00000), MemoryRegion::BIOS);
    /// ```
    #[inline(always)]
    pub fn identify_region(vaddr: u32) -> MemoryRegion {
        MemoryRegion::from_physical(Self::translate_address(vaddr))
    }
}
