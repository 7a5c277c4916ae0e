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

//! Width-generic memory access
//!
//! [`AccessWidth`] is implemented for `u8`, `u16` and `u32`, which lets the
//! bus expose one `load::<W>` / `store::<W>` pair instead of three copies of
//! every routing path. All multi-byte values are little-endian.

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A bus access width (byte, halfword or word)
pub trait AccessWidth: sealed::Sealed + Copy + Default + std::fmt::Debug + 'static {
    /// Access size in bytes
    const BYTES: u32;

    /// Mask that clears the misaligned low address bits
    const ALIGN_MASK: u32 = !(Self::BYTES - 1);

    /// Truncate a 32-bit value to this width
    fn from_u32(value: u32) -> Self;

    /// Zero-extend this value to 32 bits
    fn to_u32(self) -> u32;

    /// Read a little-endian value at `offset`
    fn read_le(mem: &[u8], offset: usize) -> Self;

    /// Write a little-endian value at `offset`
    fn write_le(self, mem: &mut [u8], offset: usize);
}

impl AccessWidth for u8 {
    const BYTES: u32 = 1;

    #[inline(always)]
    fn from_u32(value: u32) -> Self {
        value as u8
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn read_le(mem: &[u8], offset: usize) -> Self {
        mem[offset]
    }

    #[inline(always)]
    fn write_le(self, mem: &mut [u8], offset: usize) {
        mem[offset] = self;
    }
}

impl AccessWidth for u16 {
    const BYTES: u32 = 2;

    #[inline(always)]
    fn from_u32(value: u32) -> Self {
        value as u16
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn read_le(mem: &[u8], offset: usize) -> Self {
        u16::from_le_bytes([mem[offset], mem[offset + 1]])
    }

    #[inline(always)]
    fn write_le(self, mem: &mut [u8], offset: usize) {
        mem[offset..offset + 2].copy_from_slice(&self.to_le_bytes());
    }
}

impl AccessWidth for u32 {
    const BYTES: u32 = 4;

    #[inline(always)]
    fn from_u32(value: u32) -> Self {
        value
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self
    }

    #[inline(always)]
    fn read_le(mem: &[u8], offset: usize) -> Self {
        u32::from_le_bytes([mem[offset], mem[offset + 1], mem[offset + 2], mem[offset + 3]])
    }

    #[inline(always)]
    fn write_le(self, mem: &mut [u8], offset: usize) {
        mem[offset..offset + 4].copy_from_slice(&self.to_le_bytes());
    }
}
