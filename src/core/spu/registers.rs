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

//! SPU register definitions and types

/// Decoded SPUCNT (0x1F801DAA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SPUControl {
    pub enabled: bool,
    pub unmute: bool,
    pub noise_clock: u8,
    pub noise_step: u8,
    pub reverb_enabled: bool,
    pub irq_enabled: bool,
    pub transfer_mode: TransferMode,
    pub external_audio_reverb: bool,
    pub cd_audio_reverb: bool,
    pub external_audio_enabled: bool,
    pub cd_audio_enabled: bool,
}

/// SPU RAM data transfer mode (SPUCNT bits 4-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Stop,
    ManualWrite,
    DMAWrite,
    DMARead,
}

impl SPUControl {
    pub fn from_bits(value: u16) -> Self {
        Self {
            enabled: value & (1 << 15) != 0,
            unmute: value & (1 << 14) != 0,
            noise_clock: ((value >> 10) & 0xF) as u8,
            noise_step: ((value >> 8) & 0x3) as u8,
            reverb_enabled: value & (1 << 7) != 0,
            irq_enabled: value & (1 << 6) != 0,
            transfer_mode: match (value >> 4) & 3 {
                0 => TransferMode::Stop,
                1 => TransferMode::ManualWrite,
                2 => TransferMode::DMAWrite,
                _ => TransferMode::DMARead,
            },
            external_audio_reverb: value & (1 << 3) != 0,
            cd_audio_reverb: value & (1 << 2) != 0,
            external_audio_enabled: value & (1 << 1) != 0,
            cd_audio_enabled: value & 1 != 0,
        }
    }
}
