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

//! PlayStation (R3000A) interpreter core
//!
//! A MIPS-I interpreter for the PlayStation CPU together with the memory
//! bus that decodes its address space into RAM, BIOS, scratchpad and the
//! memory-mapped peripherals.
//!
//! # Example
//!
//! ```
//! use psxcore::core::cpu::CPU;
//! use psxcore::core::memory::Bus;
//!
//! let mut cpu = CPU::new();
//! let mut bus = Bus::new();
//!
//! // addiu t0, zero, 42
//! bus.write32(0x8001_0000, 0x2408_002A).unwrap();
//! cpu.set_pc(0x8001_0000);
//! cpu.step(&mut bus).unwrap();
//! assert_eq!(cpu.reg(8), 42);
//! ```

pub mod core;
