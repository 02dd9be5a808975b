// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Process creation and the process table.
//!
//! There is one address space for the whole machine (see
//! [`crate::arch::amd64::paging`]) — every process runs with the same
//! CR3, so "process" here means a kernel-stack-backed thread of
//! control, not a full isolated address space.

pub mod switch;
pub mod table;

use crate::arch::amd64::ops::without_interrupts;
use crate::error::KernelResult;
use crate::sched;
use table::{Pid, ProcessState, PROCESS_TABLE};

/// Create a process running `entry` on a freshly allocated
/// `stack_bytes`-sized stack, and enqueue it Ready.
pub fn process_create(entry: fn(), stack_bytes: usize) -> KernelResult<Pid> {
    let cr3 = crate::arch::amd64::paging::read_cr3();
    let pid = without_interrupts(|| unsafe {
        PROCESS_TABLE.lock().create(entry as u64, stack_bytes, cr3)
    })?;
    sched::enqueue(pid);
    Ok(pid)
}

/// Called by [`switch::process_entry_trampoline`] if a process's entry
/// function ever returns. Never returns itself: it switches the stack
/// out from under its own call frame.
extern "C" fn exit_current() -> ! {
    unsafe { crate::arch::amd64::ops::disable_interrupts() };
    let pid = sched::current_pid().expect("process: exit with no current process");
    PROCESS_TABLE.lock().get_mut(pid).unwrap().state = ProcessState::Terminated;
    sched::reap_and_switch_away(pid)
}
