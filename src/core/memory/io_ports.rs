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

//! I/O window decoding
//!
//! Addresses inside 0x1F801000-0x1F801FFF are routed to a peripheral by
//! physical address. Memory control and RAM size registers have no behavior
//! and are kept as raw bytes in the I/O region. Blocks of devices that are
//! not emulated read as zero and swallow writes.

use super::{AccessWidth, Bus, IODevice, MemoryRegion};
use crate::core::error::{EmulatorError, Result};

/// Peripheral selected by an I/O window address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IoTarget {
    /// Memory control 1 (0x1F801000-0x1F801023) and RAM size (0x1F801060)
    Raw,
    Interrupt,
    Dma,
    Timers,
    Gpu,
    Spu,
    /// Known device that is not emulated
    Unimplemented(&'static str),
}

impl IoTarget {
    pub(super) fn decode(paddr: u32) -> Option<IoTarget> {
        match paddr {
            0x1F80_1000..=0x1F80_1023 => Some(IoTarget::Raw),
            0x1F80_1040..=0x1F80_105F => Some(IoTarget::Unimplemented("SIO")),
            0x1F80_1060..=0x1F80_1063 => Some(IoTarget::Raw),
            0x1F80_1070..=0x1F80_1077 => Some(IoTarget::Interrupt),
            0x1F80_1080..=0x1F80_10FF => Some(IoTarget::Dma),
            0x1F80_1100..=0x1F80_112F => Some(IoTarget::Timers),
            0x1F80_1800..=0x1F80_1803 => Some(IoTarget::Unimplemented("CD-ROM")),
            0x1F80_1810..=0x1F80_1817 => Some(IoTarget::Gpu),
            0x1F80_1820..=0x1F80_1827 => Some(IoTarget::Unimplemented("MDEC")),
            0x1F80_1C00..=0x1F80_1FFF => Some(IoTarget::Spu),
            _ => None,
        }
    }
}

/// Rewrite a device's "no such register" error with the bus-level address and width
fn widen_error<W: AccessWidth>(paddr: u32) -> impl FnOnce(EmulatorError) -> EmulatorError {
    move |err| match err {
        EmulatorError::UnmappedIo { .. } => EmulatorError::UnmappedIo {
            address: paddr,
            width: W::BYTES as u8,
        },
        other => other,
    }
}

fn device_load<D: IODevice, W: AccessWidth>(device: &mut D, paddr: u32) -> Result<W> {
    let offset = paddr - device.address_range().0;
    let value = match W::BYTES {
        1 => device.read_register8(offset).map(u32::from),
        2 => device.read_register16(offset).map(u32::from),
        _ => device.read_register(offset),
    }
    .map_err(widen_error::<W>(paddr))?;
    Ok(W::from_u32(value))
}

fn device_store<D: IODevice, W: AccessWidth>(device: &mut D, paddr: u32, value: W) -> Result<()> {
    let offset = paddr - device.address_range().0;
    let value = value.to_u32();
    match W::BYTES {
        1 => device.write_register8(offset, value as u8),
        2 => device.write_register16(offset, value as u16),
        _ => device.write_register(offset, value),
    }
    .map_err(widen_error::<W>(paddr))
}

impl Bus {
    pub(super) fn io_load<W: AccessWidth>(&mut self, paddr: u32) -> Result<W> {
        let target = IoTarget::decode(paddr).ok_or(EmulatorError::UnmappedIo {
            address: paddr,
            width: W::BYTES as u8,
        })?;

        match target {
            IoTarget::Raw => Ok(W::read_le(
                &self.regions[MemoryRegion::IO.index()],
                MemoryRegion::IO.offset(paddr),
            )),
            IoTarget::Interrupt => device_load(&mut self.interrupts, paddr),
            IoTarget::Dma => device_load(&mut self.dma, paddr),
            IoTarget::Timers => device_load(&mut self.timers, paddr),
            IoTarget::Gpu => device_load(&mut self.gpu, paddr),
            IoTarget::Spu => device_load(&mut self.spu, paddr),
            IoTarget::Unimplemented(device) => {
                log::warn!(
                    "Unimplemented {} read ({} bytes) at 0x{:08X}",
                    device,
                    W::BYTES,
                    paddr
                );
                Ok(W::from_u32(0))
            }
        }
    }

    pub(super) fn io_store<W: AccessWidth>(&mut self, paddr: u32, value: W) -> Result<()> {
        let target = IoTarget::decode(paddr).ok_or(EmulatorError::UnmappedIo {
            address: paddr,
            width: W::BYTES as u8,
        })?;

        match target {
            IoTarget::Raw => {
                value.write_le(
                    &mut self.regions[MemoryRegion::IO.index()],
                    MemoryRegion::IO.offset(paddr),
                );
                Ok(())
            }
            IoTarget::Interrupt => device_store(&mut self.interrupts, paddr, value),
            IoTarget::Dma => device_store(&mut self.dma, paddr, value),
            IoTarget::Timers => device_store(&mut self.timers, paddr, value),
            IoTarget::Gpu => device_store(&mut self.gpu, paddr, value),
            IoTarget::Spu => device_store(&mut self.spu, paddr, value),
            IoTarget::Unimplemented(device) => {
                log::warn!(
                    "Unimplemented {} write ({} bytes) at 0x{:08X}: 0x{:08X}",
                    device,
                    W::BYTES,
                    paddr,
                    value.to_u32()
                );
                Ok(())
            }
        }
    }
}
