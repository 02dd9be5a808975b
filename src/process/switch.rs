// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! The context-switch trampoline.
//!
//! Nothing in the corpus implements this: a process's saved context is
//! nothing but a stack pointer, since everything else a switch needs
//! to restore — callee-preserved registers, RFLAGS, and the resume
//! address — is already sitting on that process's own stack, pushed
//! there either by `context_switch` itself the last time this process
//! was switched out, or by [`super::table::build_initial_stack`] the
//! one time it is created.

use core::arch::global_asm;

global_asm!(
    ".global context_switch",
    "context_switch:",
    // System V: rdi = &mut old_rsp, rsi = new_rsp
    "pushfq",
    "push rbp",
    "push rbx",
    "push r12",
    "push r13",
    "push r14",
    "push r15",
    "mov [rdi], rsp",
    "mov rsp, rsi",
    "pop r15",
    "pop r14",
    "pop r13",
    "pop r12",
    "pop rbx",
    "pop rbp",
    "popfq",
    "ret",
);

extern "C" {
    fn context_switch(old_rsp: *mut u64, new_rsp: u64);
}

/// Save `from`'s context and resume `to`.
///
/// # Safety
///
/// `from_rsp` must be the live stack-pointer slot of the currently
/// running process; `to_rsp` must have been produced either by
/// [`super::table::build_initial_stack`] or by a previous call to this
/// function for a process not already running elsewhere.
pub unsafe fn switch(from_rsp: *mut u64, to_rsp: u64) {
    context_switch(from_rsp, to_rsp);
}

// The trampoline every newly created process starts at: pops the
// entry point `build_initial_stack` left below the fake return
// address, calls it, and terminates the process if it ever returns.
global_asm!(
    ".global process_entry_trampoline",
    "process_entry_trampoline:",
    "pop rdi",
    "call rdi",
    "call {exit}",
    "2:",
    "hlt",
    "jmp 2b",
    exit = sym super::exit_current,
);

extern "C" {
    pub fn process_entry_trampoline();
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    /// `context_switch`'s prologue/epilogue push exactly seven
    /// 8-byte values (rflags + 6 callee-saved registers); a stack
    /// built by `build_initial_stack` must leave that many slots
    /// below the fake return address for the pops to consume.
    #[test]
    fn context_switch_is_linked_and_has_an_address() {
        let addr = context_switch as *const () as usize;
        assert_ne!(addr, 0);
        assert_eq!(size_of::<usize>(), 8);
    }
}
