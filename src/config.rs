// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Compile-time kernel configuration.
//!
//! Every tunable constant used by more than one subsystem lives here
//! instead of scattered through the modules that consume it.

/// Size of one physical frame / virtual page.
pub const FRAME_SIZE: usize = 4096;

/// Size of the low region reserved during PMM init: kernel image,
/// bootstrap heap and the bitmap itself all live below this line.
pub const RESERVED_LOW_REGION: usize = 0x200000;

/// Virtual base address of the kernel heap.
pub const HEAP_VIRT_BASE: usize = 0x1000_0000;

/// Size of the kernel heap region.
pub const HEAP_SIZE: usize = 1024 * 1024;

/// Minimum payload alignment for heap allocations.
pub const HEAP_ALIGN: usize = 16;

/// Identity-mapped region covering the kernel image and bootstrap heap.
pub const IDENTITY_MAP_END: u64 = 0x0040_0000;

/// Total physical RAM the PMM is told to manage.
pub const PHYSICAL_MEMORY_BYTES: usize = 32 * 1024 * 1024;

/// Base I/O port for the master 8259 PIC.
pub const PIC1_COMMAND: u16 = 0x20;
pub const PIC1_DATA: u16 = 0x21;

/// Base I/O port for the slave 8259 PIC.
pub const PIC2_COMMAND: u16 = 0xA0;
pub const PIC2_DATA: u16 = 0xA1;

/// Interrupt vector offset the master/slave PIC is remapped to.
pub const PIC1_VECTOR_OFFSET: u8 = 32;
pub const PIC2_VECTOR_OFFSET: u8 = 40;

/// PIT channel 0 ports and base oscillator frequency.
pub const PIT_CHANNEL0_DATA: u16 = 0x40;
pub const PIT_COMMAND: u16 = 0x43;
pub const PIT_BASE_FREQUENCY_HZ: u32 = 1_193_182;

/// Timer tick rate the scheduler preempts against.
pub const TIMER_HZ: u32 = 100;

/// Kernel code segment selector installed by the bootloader's GDT.
pub const KERNEL_CODE_SELECTOR: u16 = 0x08;

/// Maximum number of simultaneously live processes.
pub const MAX_PROCESSES: usize = 64;

/// Default stack size handed to a newly created process.
pub const DEFAULT_STACK_SIZE: usize = 8192;

/// Tick budget a process is given each time it starts running.
pub const DEFAULT_TICK_BUDGET: u32 = 10;

/// RFLAGS value seeded into a new process: IF set, reserved bit 1 set.
pub const DEFAULT_RFLAGS: u64 = 0x202;
