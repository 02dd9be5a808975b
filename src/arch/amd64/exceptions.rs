// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! The common CPU exception sink: vectors 0-31 all land here.
//!
//! There is nothing to recover from at this level — no fault is
//! resumable without a process model willing to kill the offending
//! process, which this core does not build. Every exception is fatal.

use crate::console::{self, Color};
use super::ops;

/// Vector-indexed mnemonics, carried forward verbatim from the
/// reference implementation's exception table.
const MNEMONICS: [&str; 32] = [
    "Divide by Zero",
    "Debug",
    "Non-Maskable Interrupt",
    "Breakpoint",
    "Overflow",
    "Bound Range Exceeded",
    "Invalid Opcode",
    "Device Not Available",
    "Double Fault",
    "Coprocessor Segment Overrun",
    "Invalid TSS",
    "Segment Not Present",
    "Stack-Segment Fault",
    "General Protection Fault",
    "Page Fault",
    "Reserved",
    "x87 Floating-Point Exception",
    "Alignment Check",
    "Machine Check",
    "SIMD Floating-Point Exception",
    "Virtualization Exception",
    "Control Protection Exception",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
];

pub fn mnemonic(vector: u8) -> &'static str {
    MNEMONICS.get(vector as usize).copied().unwrap_or("Unknown")
}

/// Print the exception banner and halt forever. Never returns.
pub fn handle(vector: u8, error_code: u64) -> ! {
    unsafe { ops::disable_interrupts() };
    console::clear();
    console::_print_colored(Color::LightRed, format_args!("\n*** CPU EXCEPTION ***\n\n"));
    console::_print_colored(Color::White, format_args!("Exception: "));
    console::_print_colored(Color::Yellow, format_args!("{}\n", mnemonic(vector)));
    console::_print_colored(Color::White, format_args!("Vector:     "));
    console::_print_colored(Color::LightCyan, format_args!("{}\n", vector));
    console::_print_colored(Color::White, format_args!("Error code: "));
    console::_print_colored(Color::LightCyan, format_args!("{:#x}\n", error_code));
    console::_print_colored(Color::LightGray, format_args!("\nSystem halted.\n"));

    loop {
        unsafe { ops::hlt() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_table_matches_reference_order() {
        assert_eq!(mnemonic(0), "Divide by Zero");
        assert_eq!(mnemonic(8), "Double Fault");
        assert_eq!(mnemonic(14), "Page Fault");
        assert_eq!(mnemonic(21), "Control Protection Exception");
    }

    #[test]
    fn mnemonic_out_of_range_is_unknown() {
        assert_eq!(mnemonic(200), "Unknown");
    }
}
