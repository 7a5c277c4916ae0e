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
fn test_interrupt_masking() {
    let mut ic = InterruptController::new();

    ic.request(interrupts::VBLANK);
    ic.write_mask(0);
    assert!(!ic.is_pending());

    ic.write_mask(interrupts::VBLANK as u32);
    assert!(ic.is_pending());
}

#[test]
fn test_partial_masking() {
    let mut ic = InterruptController::new();
    ic.request(interrupts::VBLANK | interrupts::TIMER0);

    ic.write_mask(interrupts::TIMER0 as u32);
    assert!(ic.is_pending());

    ic.write_mask(interrupts::SPU as u32);
    assert!(!ic.is_pending());
}

#[test]
fn test_mask_does_not_touch_status() {
    let mut ic = InterruptController::new();
    ic.request(interrupts::DMA);
    ic.write_mask(0xFFFF);
    ic.write_mask(0);
    assert_eq!(ic.read_status(), interrupts::DMA as u32);
}
