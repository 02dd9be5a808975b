// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel entry point: owns `kernel_main`, the panic handler, and the
//! global allocator. Everything else lives in the `longmode_core`
//! library, which has no knowledge of how it is booted.

#![no_std]
#![no_main]

extern crate alloc;

use core::alloc::{GlobalAlloc, Layout};
use core::panic::PanicInfo;

use longmode_core::arch::amd64::paging::{AddressSpace, FrameAllocator};
use longmode_core::arch::amd64::{idt, ops, paging, pic};
use longmode_core::config::{DEFAULT_STACK_SIZE, FRAME_SIZE, HEAP_SIZE, HEAP_VIRT_BASE, PHYSICAL_MEMORY_BYTES};
use longmode_core::console::{self, Color};
use longmode_core::mm::{HEAP, PMM};
use longmode_core::{log_error, log_info, log_ok, process_create, sched, timer};

// Bracket the reserved region the bootloader sets aside for the early
// allocator and the PMM bitmap (see the PMM's `init` contract). These
// are defined by the bootloader's linker script, not by this crate; a
// freestanding build without one will fail to link, which is the
// expected state for a core that treats the bootloader as an external
// collaborator.
extern "C" {
    #[allow(dead_code)]
    static heap_start: u8;
    static heap_end: u8;
}

/// Hands the VMM freshly zeroed frames by pulling them from the PMM.
struct PmmFrames;

impl FrameAllocator for PmmFrames {
    fn alloc_zeroed_frame(&mut self) -> u64 {
        let frame = PMM.lock().alloc_page();
        unsafe { core::ptr::write_bytes(frame as *mut u8, 0, FRAME_SIZE) };
        frame
    }
}

/// Routes Rust's `alloc` crate through the kernel heap.
struct KernelAllocator;

unsafe impl GlobalAlloc for KernelAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        HEAP.lock().alloc(layout.size())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        HEAP.lock().free(ptr)
    }
}

#[global_allocator]
static ALLOCATOR: KernelAllocator = KernelAllocator;

/// A demo process: prints a heartbeat and yields. Exists only to give
/// the scheduler more than the bootstrap process to rotate between.
fn demo_heartbeat() {
    loop {
        log_info!("heartbeat: {} ticks since boot", timer::ticks());
        for _ in 0..20_000_000 {
            core::hint::spin_loop();
        }
        sched::yield_now();
    }
}

/// The bootloader transfers control here directly: CPU already in long
/// mode, a valid GDT with selector 0x08 for kernel code, `heap_start`
/// and `heap_end` bracketing the early-allocation region.
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    console::clear();
    log_ok!("console online");

    unsafe { idt::init() };
    log_ok!("idt loaded");

    unsafe { pic::remap() };
    log_ok!("pic remapped, all lines masked");

    let bitmap_ptr = core::ptr::addr_of!(heap_end) as *mut u8;
    unsafe { PMM.lock().init(bitmap_ptr, PHYSICAL_MEMORY_BYTES) };
    log_ok!(
        "pmm online: {} frames free of {}",
        PMM.lock().free_frames(),
        PMM.lock().total_frames()
    );

    let mut frames = PmmFrames;
    let pml4_phys = frames.alloc_zeroed_frame();
    let mut space = unsafe { AddressSpace::new(pml4_phys, &mut frames) };
    let cr3 = space.cr3();

    unsafe { HEAP.lock().init(&mut space, &mut frames, HEAP_VIRT_BASE, HEAP_SIZE) };
    log_ok!("heap region mapped and online: {} bytes", HEAP_SIZE);

    unsafe { paging::load_cr3(cr3) };
    log_ok!("paging enabled");

    sched::init(cr3);
    match process_create(demo_heartbeat, DEFAULT_STACK_SIZE) {
        Ok(pid) => {
            log_ok!("spawned heartbeat process {}", pid);
        }
        Err(e) => {
            log_error!("failed to spawn heartbeat process: {:?}", e);
        }
    }

    unsafe { timer::init() };
    unsafe { pic::unmask(0) };
    unsafe { pic::unmask(1) };
    unsafe { ops::enable_interrupts() };
    log_ok!("interrupts enabled, entering idle loop");

    loop {
        unsafe { ops::hlt() };
    }
}

/// The kernel's single fatal-error sink: disables interrupts, prints a
/// banner to the VGA console, and halts forever. Callable from any
/// context, including before the heap exists, so it performs no
/// allocation.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    unsafe { ops::disable_interrupts() };
    console::clear();
    console::_print_colored(Color::LightRed, format_args!("\n*** KERNEL PANIC ***\n\n"));
    if let Some(location) = info.location() {
        console::_print_colored(Color::White, format_args!("Location: "));
        console::_print_colored(Color::LightCyan, format_args!("{}:{}\n", location.file(), location.line()));
    }
    console::_print_colored(Color::White, format_args!("Message:  "));
    console::_print_colored(Color::Yellow, format_args!("{}\n", info.message()));
    console::_print_colored(Color::LightGray, format_args!("\nSystem halted.\n"));

    loop {
        unsafe {
            ops::disable_interrupts();
            ops::hlt();
        }
    }
}
