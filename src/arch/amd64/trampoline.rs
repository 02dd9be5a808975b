// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Raw interrupt entry stubs and the single dispatcher they all call.
//!
//! No construct in stable Rust generates "push the registers the
//! interrupted code was using, call a plain function, pop them back,
//! `iretq`" — so vectors 0-47 each get a few lines of hand-written
//! assembly here, all funnelling into [`common_stub`] and then into
//! [`dispatch`]. Everything above this file is ordinary Rust.

use core::arch::global_asm;

use super::{exceptions, pic};
use crate::timer;

macro_rules! isr_stub {
    ($name:ident, $vector:expr) => {
        global_asm!(
            concat!(".global ", stringify!($name)),
            concat!(stringify!($name), ":"),
            "push 0",
            concat!("push ", stringify!($vector)),
            "jmp isr_common_stub",
        );
    };
}

macro_rules! isr_stub_with_code {
    ($name:ident, $vector:expr) => {
        global_asm!(
            concat!(".global ", stringify!($name)),
            concat!(stringify!($name), ":"),
            concat!("push ", stringify!($vector)),
            "jmp isr_common_stub",
        );
    };
}

// The common epilogue/prologue shared by every vector. Pushes the
// general registers the CPU doesn't save, loads vector/error_code
// (left on the stack below them by the per-vector stub above) into
// the System V argument registers, and calls `dispatch`. Same-ring
// interrupts (this kernel never drops to ring 3) leave no SS/RSP in
// the hardware frame, so the stub epilogue only ever pops RIP/CS/RFLAGS.
global_asm!(
    ".global isr_common_stub",
    "isr_common_stub:",
    "push rax",
    "push rbx",
    "push rcx",
    "push rdx",
    "push rsi",
    "push rdi",
    "push rbp",
    "push r8",
    "push r9",
    "push r10",
    "push r11",
    "push r12",
    "push r13",
    "push r14",
    "push r15",
    "mov rdi, [rsp + 120]", // vector
    "mov rsi, [rsp + 128]", // error_code
    "call {dispatch}",
    "pop r15",
    "pop r14",
    "pop r13",
    "pop r12",
    "pop r11",
    "pop r10",
    "pop r9",
    "pop r8",
    "pop rbp",
    "pop rdi",
    "pop rsi",
    "pop rdx",
    "pop rcx",
    "pop rbx",
    "pop rax",
    "add rsp, 16", // drop vector + error_code
    "iretq",
    dispatch = sym dispatch,
);

isr_stub!(isr_stub_0, 0);
isr_stub!(isr_stub_1, 1);
isr_stub!(isr_stub_2, 2);
isr_stub!(isr_stub_3, 3);
isr_stub!(isr_stub_4, 4);
isr_stub!(isr_stub_5, 5);
isr_stub!(isr_stub_6, 6);
isr_stub!(isr_stub_7, 7);
isr_stub_with_code!(isr_stub_8, 8);
isr_stub!(isr_stub_9, 9);
isr_stub_with_code!(isr_stub_10, 10);
isr_stub_with_code!(isr_stub_11, 11);
isr_stub_with_code!(isr_stub_12, 12);
isr_stub_with_code!(isr_stub_13, 13);
isr_stub_with_code!(isr_stub_14, 14);
isr_stub!(isr_stub_15, 15);
isr_stub!(isr_stub_16, 16);
isr_stub_with_code!(isr_stub_17, 17);
isr_stub!(isr_stub_18, 18);
isr_stub!(isr_stub_19, 19);
isr_stub!(isr_stub_20, 20);
isr_stub_with_code!(isr_stub_21, 21);
isr_stub!(isr_stub_22, 22);
isr_stub!(isr_stub_23, 23);
isr_stub!(isr_stub_24, 24);
isr_stub!(isr_stub_25, 25);
isr_stub!(isr_stub_26, 26);
isr_stub!(isr_stub_27, 27);
isr_stub!(isr_stub_28, 28);
isr_stub!(isr_stub_29, 29);
isr_stub!(isr_stub_30, 30);
isr_stub!(isr_stub_31, 31);

isr_stub!(irq_stub_0, 32);
isr_stub!(irq_stub_1, 33);
isr_stub!(irq_stub_2, 34);
isr_stub!(irq_stub_3, 35);
isr_stub!(irq_stub_4, 36);
isr_stub!(irq_stub_5, 37);
isr_stub!(irq_stub_6, 38);
isr_stub!(irq_stub_7, 39);
isr_stub!(irq_stub_8, 40);
isr_stub!(irq_stub_9, 41);
isr_stub!(irq_stub_10, 42);
isr_stub!(irq_stub_11, 43);
isr_stub!(irq_stub_12, 44);
isr_stub!(irq_stub_13, 45);
isr_stub!(irq_stub_14, 46);
isr_stub!(irq_stub_15, 47);

extern "C" {
    fn isr_stub_0();
    fn isr_stub_1();
    fn isr_stub_2();
    fn isr_stub_3();
    fn isr_stub_4();
    fn isr_stub_5();
    fn isr_stub_6();
    fn isr_stub_7();
    fn isr_stub_8();
    fn isr_stub_9();
    fn isr_stub_10();
    fn isr_stub_11();
    fn isr_stub_12();
    fn isr_stub_13();
    fn isr_stub_14();
    fn isr_stub_15();
    fn isr_stub_16();
    fn isr_stub_17();
    fn isr_stub_18();
    fn isr_stub_19();
    fn isr_stub_20();
    fn isr_stub_21();
    fn isr_stub_22();
    fn isr_stub_23();
    fn isr_stub_24();
    fn isr_stub_25();
    fn isr_stub_26();
    fn isr_stub_27();
    fn isr_stub_28();
    fn isr_stub_29();
    fn isr_stub_30();
    fn isr_stub_31();
    fn irq_stub_0();
    fn irq_stub_1();
    fn irq_stub_2();
    fn irq_stub_3();
    fn irq_stub_4();
    fn irq_stub_5();
    fn irq_stub_6();
    fn irq_stub_7();
    fn irq_stub_8();
    fn irq_stub_9();
    fn irq_stub_10();
    fn irq_stub_11();
    fn irq_stub_12();
    fn irq_stub_13();
    fn irq_stub_14();
    fn irq_stub_15();
}

/// Addresses of vectors 0-47's entry stubs, in order, for [`super::idt::init`]
/// to install. Index `v` is the trampoline for interrupt vector `v`.
pub fn stub_addresses() -> [u64; 48] {
    [
        isr_stub_0 as *const () as u64,
        isr_stub_1 as *const () as u64,
        isr_stub_2 as *const () as u64,
        isr_stub_3 as *const () as u64,
        isr_stub_4 as *const () as u64,
        isr_stub_5 as *const () as u64,
        isr_stub_6 as *const () as u64,
        isr_stub_7 as *const () as u64,
        isr_stub_8 as *const () as u64,
        isr_stub_9 as *const () as u64,
        isr_stub_10 as *const () as u64,
        isr_stub_11 as *const () as u64,
        isr_stub_12 as *const () as u64,
        isr_stub_13 as *const () as u64,
        isr_stub_14 as *const () as u64,
        isr_stub_15 as *const () as u64,
        isr_stub_16 as *const () as u64,
        isr_stub_17 as *const () as u64,
        isr_stub_18 as *const () as u64,
        isr_stub_19 as *const () as u64,
        isr_stub_20 as *const () as u64,
        isr_stub_21 as *const () as u64,
        isr_stub_22 as *const () as u64,
        isr_stub_23 as *const () as u64,
        isr_stub_24 as *const () as u64,
        isr_stub_25 as *const () as u64,
        isr_stub_26 as *const () as u64,
        isr_stub_27 as *const () as u64,
        isr_stub_28 as *const () as u64,
        isr_stub_29 as *const () as u64,
        isr_stub_30 as *const () as u64,
        isr_stub_31 as *const () as u64,
        irq_stub_0 as *const () as u64,
        irq_stub_1 as *const () as u64,
        irq_stub_2 as *const () as u64,
        irq_stub_3 as *const () as u64,
        irq_stub_4 as *const () as u64,
        irq_stub_5 as *const () as u64,
        irq_stub_6 as *const () as u64,
        irq_stub_7 as *const () as u64,
        irq_stub_8 as *const () as u64,
        irq_stub_9 as *const () as u64,
        irq_stub_10 as *const () as u64,
        irq_stub_11 as *const () as u64,
        irq_stub_12 as *const () as u64,
        irq_stub_13 as *const () as u64,
        irq_stub_14 as *const () as u64,
        irq_stub_15 as *const () as u64,
    ]
}

/// Routes every vector to the exception sink or an IRQ handler. Called
/// by `isr_common_stub` with the System V calling convention, so it
/// must preserve every register it touches beyond rdi/rsi per the ABI
/// (the compiler does this for us — this is an ordinary `extern "C" fn`).
extern "C" fn dispatch(vector: u64, error_code: u64) {
    if vector < 32 {
        exceptions::handle(vector as u8, error_code);
    } else {
        let irq = (vector - 32) as u8;
        match irq {
            0 => timer::tick(),
            _ => {}
        }
        unsafe { pic::send_eoi(irq) };
    }
}
