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

use super::*;

#[test]
fn test_taken_branch_runs_delay_slot_once() {
    let (mut cpu, mut bus) = setup(&[
        asm::beq(0, 0, 2),        // -> PROGRAM_BASE + 12
        asm::addiu(T0, T0, 1),    // delay slot
        asm::addiu(T1, 0, 0x42),  // skipped
        asm::addiu(T2, 0, 7),     // target
    ]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(T0), 1);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 12);

    run(&mut cpu, &mut bus, 1);

    assert_eq!(cpu.reg(T0), 1);
    assert_eq!(cpu.reg(T1), 0);
    assert_eq!(cpu.reg(T2), 7);
}

#[test]
fn test_not_taken_branch_falls_through() {
    let (mut cpu, mut bus) = setup(&[asm::bne(0, 0, 10), asm::NOP, asm::addiu(T0, 0, 1)]);

    run(&mut cpu, &mut bus, 3);

    assert_eq!(cpu.reg(T0), 1);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 12);
}

#[test]
fn test_backward_branch_loop() {
    let (mut cpu, mut bus) = setup(&[
        asm::addiu(T0, 0, 3),
        asm::addiu(T0, T0, -1), // loop:
        asm::bne(T0, 0, -2),    // -> loop
        asm::NOP,
        asm::NOP,
    ]);

    run(&mut cpu, &mut bus, 10);

    assert_eq!(cpu.reg(T0), 0);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 16);
}

#[test]
fn test_blez_bgtz_at_zero() {
    let (mut cpu, mut bus) = setup(&[asm::bgtz(0, 4), asm::NOP, asm::blez(0, 4), asm::NOP]);

    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 8);

    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 12 + 16);
}

#[test]
fn test_bltz_negative() {
    let (mut cpu, mut bus) = setup(&[asm::bltz(T0, 3), asm::NOP]);
    cpu.set_reg(T0, 0x80000000);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.pc(), PROGRAM_BASE + 4 + 12);
}

#[test]
fn test_bltzal_links_when_not_taken() {
    let (mut cpu, mut bus) = setup(&[asm::bltzal(T0, 8), asm::NOP]);
    cpu.set_reg(T0, 1);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(RA), PROGRAM_BASE + 8);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 8);
}

#[test]
fn test_bgezal_links_and_branches() {
    let (mut cpu, mut bus) = setup(&[asm::bgezal(0, 8), asm::NOP]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(RA), PROGRAM_BASE + 8);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 4 + 32);
}

#[test]
fn test_j_keeps_segment_bits() {
    let (mut cpu, mut bus) = setup(&[asm::j(0x0001_0100), asm::addiu(T0, 0, 1)]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(T0), 1);
    assert_eq!(cpu.pc(), 0x8001_0100);
}

#[test]
fn test_jal_links_past_delay_slot() {
    let (mut cpu, mut bus) = setup(&[asm::jal(PROGRAM_BASE + 0x40), asm::NOP]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(RA), PROGRAM_BASE + 8);
    assert_eq!(cpu.pc(), PROGRAM_BASE + 0x40);
}

#[test]
fn test_jr_and_jalr() {
    let (mut cpu, mut bus) = setup(&[asm::jalr(RA, T0), asm::NOP]);
    cpu.set_reg(T0, 0x8002_0000);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.reg(RA), PROGRAM_BASE + 8);
    assert_eq!(cpu.pc(), 0x8002_0000);

    let (mut cpu, mut bus) = setup(&[asm::jr(RA), asm::NOP]);
    cpu.set_reg(RA, 0x8003_0000);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.pc(), 0x8003_0000);
}

#[test]
fn test_jalr_same_source_and_link() {
    let (mut cpu, mut bus) = setup(&[asm::jalr(T0, T0), asm::NOP]);
    cpu.set_reg(T0, 0x8002_0000);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.pc(), 0x8002_0000);
    assert_eq!(cpu.reg(T0), PROGRAM_BASE + 8);
}

#[test]
fn test_jr_unaligned_target_is_address_error() {
    let (mut cpu, mut bus) = setup(&[asm::jr(T0)]);
    cpu.set_reg(T0, 0x8002_0002);

    let err = cpu.step(&mut bus).unwrap_err();

    assert!(matches!(
        err,
        EmulatorError::AddressError {
            pc: PROGRAM_BASE,
            target: 0x8002_0002
        }
    ));
    assert_eq!(err.exception_cause(), Some(ExceptionCause::AddressErrorLoad));
    assert_eq!(err.pc(), Some(PROGRAM_BASE));
}

#[test]
fn test_jalr_unaligned_does_not_link() {
    let (mut cpu, mut bus) = setup(&[asm::jalr(RA, T0)]);
    cpu.set_reg(T0, 0x8002_0001);

    assert!(cpu.step(&mut bus).is_err());
    assert_eq!(cpu.reg(RA), 0);
}
