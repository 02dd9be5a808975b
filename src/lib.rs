// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! # Longmode Core — an educational x86_64 kernel core
//!
//! This crate is the part of a small teaching kernel that every
//! higher-level subsystem depends on: interrupt dispatch, physical and
//! virtual memory management, a kernel heap, and preemptive
//! round-robin multitasking driven by a periodic timer tick.
//!
//! ```text
//! src/
//! ├── arch/amd64/   # IDT, PIC, paging, port I/O — everything CPU-specific
//! ├── config.rs     # compile-time tunables shared across subsystems
//! ├── console.rs    # VGA text-mode sink and leveled log macros
//! ├── error.rs      # the one recoverable KernelError
//! ├── mm/           # physical frame allocator (pmm) and kernel heap
//! ├── process/      # PCB, process table, context-switch trampoline
//! ├── sched/        # the round-robin ready queue
//! └── timer.rs      # PIT programming and the tick counter
//! ```
//!
//! One address space spans the whole machine (see
//! [`arch::amd64::paging`]); a "process" here is a kernel-stack-backed
//! thread of control rather than an isolated address space. There is
//! no usermode, no filesystem, and no networking — see the top-level
//! design document for the full list of non-goals.
//!
//! The binary crate (`main.rs`) owns `kernel_main`, the panic handler,
//! and the init sequence; this library is `#![no_std]` and has no
//! knowledge of how it is booted.

#![no_std]

extern crate alloc;

pub mod arch;
pub mod config;
pub mod console;
pub mod error;
pub mod mm;
pub mod process;
pub mod sched;
pub mod timer;

pub use error::{KernelError, KernelResult};
pub use process::process_create;
