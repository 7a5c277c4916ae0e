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

//! End-to-end tests that assemble small programs and step a `System`

mod common;

use common::assertions::{
    assert_cpu_pc, assert_cpu_reg, assert_cpu_regs, assert_memory_word, assert_mode_stack,
};
use common::fixtures::{bios_image, exe_image, system_with_program, PROGRAM_BASE};
use common::test_roms;
use psxcore::core::config::{EmulatorConfig, TickOrder};
use psxcore::core::cpu::Status;
use psxcore::core::error::{EmulatorError, Result};
use psxcore::core::loader::PsxExecutable;
use psxcore::core::save_state::SaveState;
use psxcore::core::system::System;

#[test]
fn test_basic_initialization() -> Result<()> {
    let system = System::new();
    assert_eq!(system.cycles(), 0);
    assert_cpu_pc(system.cpu(), 0xBFC00000);
    Ok(())
}

#[test]
fn test_arithmetic_program() -> Result<()> {
    let mut system = system_with_program(&test_roms::basic_arithmetic());

    system.step_n(6)?;

    let cpu = system.cpu();
    assert_cpu_reg(cpu, 3, 3);
    assert_cpu_reg(cpu, 4, 0xFFFFFFFD);
    assert_cpu_reg(cpu, 5, 0xFFFFFFFF);
    assert_cpu_reg(cpu, 6, 1);
    Ok(())
}

#[test]
fn test_load_store_program() -> Result<()> {
    let mut system = system_with_program(&test_roms::load_store());

    system.step_n(7)?;

    assert_cpu_reg(system.cpu(), 3, 0xAA);
    assert_cpu_reg(system.cpu(), 4, 0xFFFFFFAA);
    assert_cpu_reg(system.cpu(), 5, 0xAA);
    assert_memory_word(system.bus_mut(), 0x1F800000, 0xAA);
    assert_memory_word(system.bus_mut(), 0x1F800004, 0x0000AA00);
    Ok(())
}

#[test]
fn test_branch_program_runs_delay_slot() -> Result<()> {
    let mut system = system_with_program(&test_roms::branch());

    system.step_n(5)?;

    assert_cpu_reg(system.cpu(), 7, 7);
    assert_cpu_reg(system.cpu(), 3, 0);
    assert_cpu_reg(system.cpu(), 4, 0);
    assert_cpu_reg(system.cpu(), 5, 0x55);
    Ok(())
}

#[test]
fn test_counted_loop() -> Result<()> {
    let mut system = system_with_program(&test_roms::counted_loop());

    system.run(Some(60))?;

    assert_cpu_reg(system.cpu(), 1, 0);
    assert_cpu_reg(system.cpu(), 2, 55);
    Ok(())
}

#[test]
fn test_bios_jumps_into_ram() -> Result<()> {
    let mut system = System::new();
    // lui t0, 0x8001 ; jr t0 ; nop
    system.load_bios(&bios_image(&[0x3C088001, 0x01000008, 0x00000000]))?;
    common::fixtures::load_test_program(
        system.bus_mut(),
        PROGRAM_BASE,
        &test_roms::basic_arithmetic(),
    );

    system.step_n(3)?;
    assert_cpu_pc(system.cpu(), PROGRAM_BASE);

    system.step_n(6)?;
    assert_cpu_reg(system.cpu(), 3, 3);
    Ok(())
}

#[test]
fn test_syscall_round_trip_through_handler() -> Result<()> {
    let mut program = vec![
        0x24080005, // ADDIU $8, $0, 5
        0x0000000C, // SYSCALL
        0x25080001, // ADDIU $8, $8, 1
    ];
    program.extend(test_roms::idle_loop());
    let mut system = system_with_program(&program);
    common::fixtures::load_test_program(system.bus_mut(), 0x80000080, &test_roms::syscall_handler());
    system
        .cpu_mut()
        .cop0_mut()
        .set_status(Status::IEC | Status::KUC);

    system.step_n(2)?;
    assert_cpu_pc(system.cpu(), 0x80000080);
    assert_eq!(system.cpu().cop0().cause().excode(), 8);
    assert_eq!(system.cpu().cop0().epc(), PROGRAM_BASE + 4);
    assert_mode_stack(system.cpu(), 0b00_11_00);

    system.step_n(5)?;
    assert_cpu_reg(system.cpu(), 8, 6);
    assert_cpu_reg(system.cpu(), 26, PROGRAM_BASE + 8);
    assert_mode_stack(system.cpu(), 0b00_00_11);
    Ok(())
}

#[test]
fn test_executable_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("loop.exe");
    std::fs::write(&path, exe_image(PROGRAM_BASE, &test_roms::counted_loop()))?;

    let mut system = System::new();
    system.load_bios(&bios_image(&[]))?;
    let exe = PsxExecutable::from_file(&path)?;
    system.load_executable(&exe);
    system.run(Some(60))?;

    assert_cpu_regs(system.cpu(), &[(2, 55), (28, 0x80020000), (29, 0x801FFF00)]);
    Ok(())
}

#[test]
fn test_unmapped_io_is_fatal() {
    // lui t0, 0x1F80 ; lw t1, 0x1400(t0)
    let mut system = system_with_program(&[0x3C081F80, 0x8D091400]);

    let err = system.run(None).unwrap_err();

    assert!(matches!(
        err.root(),
        EmulatorError::UnmappedIo {
            address: 0x1F801400,
            width: 4
        }
    ));
    assert_eq!(err.pc(), Some(PROGRAM_BASE + 4));
    assert_eq!(err.instruction(), Some(0x8D091400));
    assert_eq!(system.cycles(), 1);
}

#[test]
fn test_unsupported_instruction_reports_pc() {
    // nop ; mfc2 t0, 0
    let mut system = system_with_program(&[0x00000000, 0x48080000]);

    let err = system.run(Some(10)).unwrap_err();

    assert_eq!(err.pc(), Some(PROGRAM_BASE + 4));
    assert!(matches!(
        err,
        EmulatorError::UnsupportedInstruction {
            instruction: 0x48080000,
            ..
        }
    ));
}

#[test]
fn test_save_state_resume() -> Result<()> {
    let mut system = system_with_program(&test_roms::counted_loop());
    system.step_n(20)?;
    let state = system.save_state();
    let bytes = state.to_bytes()?;

    system.step_n(40)?;
    let finished = *system.cpu().registers();

    let mut resumed = system_with_program(&[]);
    resumed.load_state(&SaveState::from_bytes(&bytes)?)?;
    resumed.step_n(40)?;

    assert_eq!(*resumed.cpu().registers(), finished);
    assert_eq!(resumed.cycles(), 60);
    Ok(())
}

#[test]
fn test_config_drives_tick_order() -> Result<()> {
    let config = EmulatorConfig::from_toml_str("tick_order = \"peripherals-first\"")?;
    let mut system = system_with_program(&test_roms::idle_loop());
    system.set_tick_order(config.tick_order);

    system.run(Some(8))?;

    assert_eq!(system.tick_order(), TickOrder::PeripheralsFirst);
    assert_eq!(system.bus().timers().channel(0).read_counter(), 8);
    Ok(())
}
