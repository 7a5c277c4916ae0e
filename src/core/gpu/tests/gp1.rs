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

use super::super::*;

#[test]
fn test_reset_status() {
    let mut gpu = GPU::new();
    gpu.submit_gp0(0xE100_0000);
    gpu.submit_gp1(0x0000_0000);

    assert_eq!(gpu.read_status(), 0x1480_2000 | 0x1C00_0000);
    assert_eq!(gpu.pending_gp0(), 0);
    assert!(gpu.display_disabled());
}

#[test]
fn test_clear_command_buffer() {
    let mut gpu = GPU::new();
    gpu.submit_gp0(1);
    gpu.submit_gp1(0x0100_0000);
    assert_eq!(gpu.pending_gp0(), 0);
}

#[test]
fn test_display_enable() {
    let mut gpu = GPU::new();
    gpu.submit_gp1(0x0300_0000);
    assert!(!gpu.display_disabled());
    gpu.submit_gp1(0x0300_0001);
    assert!(gpu.display_disabled());
}

#[test]
fn test_dma_direction() {
    let mut gpu = GPU::new();
    gpu.submit_gp1(0x0400_0002);
    assert_eq!(gpu.dma_direction(), 2);
    assert_eq!((gpu.read_status() >> 29) & 3, 2);
}

#[test]
fn test_display_mode_bits() {
    let mut gpu = GPU::new();
    // 320 wide (1), 480 lines, PAL, 24-bit, interlace
    gpu.submit_gp1(0x0800_003D);

    let status = gpu.read_status();
    assert_eq!((status >> 17) & 3, 1);
    assert_eq!((status >> 19) & 1, 1);
    assert_eq!((status >> 20) & 1, 1);
    assert_eq!((status >> 21) & 1, 1);
    assert_eq!((status >> 22) & 1, 1);
}

#[test]
fn test_display_area_parameters() {
    let mut gpu = GPU::new();
    gpu.submit_gp1(0x0500_0400);
    gpu.submit_gp1(0x0620_0260);
    gpu.submit_gp1(0x0704_2018);

    assert_eq!(gpu.display_start(), 0x400);
    assert_eq!(gpu.display_range(), (0x20_0260, 0x04_2018));
}

#[test]
fn test_gpu_version_info() {
    let mut gpu = GPU::new();
    gpu.submit_gp1(0x1000_0007);
    assert_eq!(gpu.read_register(0x0).unwrap(), 2);
}

#[test]
fn test_status_port_reads_gpustat() {
    let mut gpu = GPU::new();
    assert_eq!(gpu.read_register(0x4).unwrap(), gpu.read_status());
}
