// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Preemptive round-robin scheduling.
//!
//! The ready queue ([`round_robin::Scheduler`]) only ever decides
//! *which* process runs next; the actual register save/restore is
//! [`crate::process::switch`]. The two halves meet in [`do_reschedule`],
//! which computes the old/new `rsp` pair under lock and hands them to
//! the raw switch once the locks are released — a switched-out process
//! must never leave the ready queue or process table locked for the
//! (possibly long) time it spends off the CPU.

pub mod round_robin;

use round_robin::Scheduler;
use spin::Mutex;

use crate::arch::amd64::ops::without_interrupts;
use crate::config::DEFAULT_TICK_BUDGET;
use crate::process::table::{Pid, ProcessState, ProcessTable, PROCESS_TABLE};

static SCHEDULER: Mutex<Scheduler> = Mutex::new(Scheduler::new());

/// Pid of a just-terminated process whose stack is still in use by the
/// switch that is unwinding it; reaped by the first process to resume
/// past an [`apply`] call afterward.
static REAP_PENDING: Mutex<Option<Pid>> = Mutex::new(None);

enum Transition {
    None,
    Switch { old_rsp: *mut u64, new_rsp: u64 },
}

/// Install the stack the kernel is already running on as the first
/// (idle/bootstrap) process. Must be called once, after the heap is
/// initialized and before interrupts are enabled.
pub fn init(cr3: u64) {
    without_interrupts(|| {
        let mut sched = SCHEDULER.lock();
        let mut table = PROCESS_TABLE.lock();
        let pid = unsafe { table.create_bootstrap(cr3) };
        sched.add(&mut table, pid);
        table.get_mut(pid).unwrap().state = ProcessState::Running;
    });
}

/// Enqueue a freshly created process as Ready.
pub fn enqueue(pid: Pid) {
    without_interrupts(|| {
        let mut sched = SCHEDULER.lock();
        let mut table = PROCESS_TABLE.lock();
        sched.add(&mut table, pid);
    });
}

/// The pid the scheduler currently considers current, if any.
pub fn current_pid() -> Option<Pid> {
    without_interrupts(|| SCHEDULER.lock().current())
}

/// Called from the IRQ0 handler on every timer tick: decrements the
/// running process's budget and preempts it if exhausted.
pub fn tick() {
    reschedule_if_needed(true);
}

/// Called by a process that wants to give up the CPU early: zeroes its
/// own budget and reschedules immediately.
pub fn yield_now() {
    without_interrupts(|| {
        if let Some(pid) = SCHEDULER.lock().current() {
            if let Some(p) = PROCESS_TABLE.lock().get_mut(pid) {
                p.tick_budget = 0;
            }
        }
    });
    reschedule_if_needed(false);
}

fn reschedule_if_needed(decrement: bool) {
    let transition = without_interrupts(|| {
        let mut sched = SCHEDULER.lock();
        let mut table = PROCESS_TABLE.lock();

        let Some(current) = sched.current() else {
            return Transition::None;
        };

        if decrement {
            if let Some(p) = table.get_mut(current) {
                if p.state == ProcessState::Running && p.tick_budget > 0 {
                    p.tick_budget -= 1;
                }
            }
        }

        let must_switch = match table.get(current) {
            Some(p) => p.state != ProcessState::Running || p.tick_budget == 0,
            None => true,
        };
        if !must_switch {
            return Transition::None;
        }

        do_reschedule(&mut sched, &mut table)
    });
    apply(transition);
}

/// Rotate the ring, re-queuing the outgoing process only along the
/// actual switch path — not unconditionally, unlike the source this
/// was adapted from, which re-queued before checking whether a switch
/// was even about to happen.
fn do_reschedule(sched: &mut Scheduler, table: &mut ProcessTable) -> Transition {
    let Some(outgoing) = sched.next(table) else {
        return Transition::None;
    };
    let Some(incoming) = sched.current() else {
        return Transition::None;
    };

    if incoming == outgoing {
        let p = table.get_mut(outgoing).unwrap();
        p.state = ProcessState::Running;
        p.tick_budget = DEFAULT_TICK_BUDGET;
        return Transition::None;
    }

    if let Some(p) = table.get_mut(outgoing) {
        if p.state == ProcessState::Running {
            p.state = ProcessState::Ready;
            p.tick_budget = DEFAULT_TICK_BUDGET;
        }
    }
    table.get_mut(incoming).unwrap().state = ProcessState::Running;

    let new_rsp = table.get(incoming).unwrap().rsp;
    let old_rsp = &mut table.get_mut(outgoing).unwrap().rsp as *mut u64;
    Transition::Switch { old_rsp, new_rsp }
}

fn apply(transition: Transition) {
    if let Transition::Switch { old_rsp, new_rsp } = transition {
        unsafe { crate::process::switch::switch(old_rsp, new_rsp) };
        reap_pending();
    }
}

fn reap_pending() {
    without_interrupts(|| {
        if let Some(pid) = REAP_PENDING.lock().take() {
            unsafe { PROCESS_TABLE.lock().destroy(pid) };
        }
    });
}

/// Called by [`crate::process::exit_current`]: unlinks the terminated
/// `pid` from the ready queue and switches into whatever is next,
/// never to return — `pid`'s stack is freed once some other process
/// resumes past the switch this performs.
pub fn reap_and_switch_away(pid: Pid) -> ! {
    loop {
        let next_rsp = without_interrupts(|| {
            let mut sched = SCHEDULER.lock();
            let mut table = PROCESS_TABLE.lock();
            sched.remove(&mut table, pid);
            *REAP_PENDING.lock() = Some(pid);
            sched.current().map(|next| {
                let p = table.get_mut(next).unwrap();
                p.state = ProcessState::Running;
                p.tick_budget = DEFAULT_TICK_BUDGET;
                p.rsp
            })
        });

        match next_rsp {
            Some(new_rsp) => {
                let mut discard: u64 = 0;
                unsafe { crate::process::switch::switch(&mut discard as *mut u64, new_rsp) };
                unreachable!("sched: resumed a terminated process's abandoned stack");
            }
            // No other process is runnable. This should not happen once
            // the bootstrap/idle process is installed by `init`, since
            // it is never terminated; fall back to halting and retrying
            // on the next interrupt rather than spinning the CPU hot.
            None => unsafe {
                crate::arch::amd64::ops::enable_interrupts();
                crate::arch::amd64::ops::hlt();
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::table::ProcessTable;

    #[test]
    fn do_reschedule_is_a_noop_with_one_ready_process() {
        let mut table = ProcessTable::new();
        let pid = unsafe { table.create_bootstrap(0) };
        let mut sched = Scheduler::new();
        sched.add(&mut table, pid);
        table.get_mut(pid).unwrap().state = ProcessState::Running;

        let transition = do_reschedule(&mut sched, &mut table);
        assert!(matches!(transition, Transition::None));
        assert_eq!(table.get(pid).unwrap().state, ProcessState::Running);
        assert_eq!(table.get(pid).unwrap().tick_budget, DEFAULT_TICK_BUDGET);
    }

    #[test]
    fn do_reschedule_switches_between_two_ready_processes() {
        let mut table = ProcessTable::new();
        let a = unsafe { table.create_bootstrap(0) };
        let b = unsafe { table.create_bootstrap(0) };
        let mut sched = Scheduler::new();
        sched.add(&mut table, a);
        sched.add(&mut table, b);
        table.get_mut(a).unwrap().state = ProcessState::Running;

        let transition = do_reschedule(&mut sched, &mut table);
        assert!(matches!(transition, Transition::Switch { .. }));
        assert_eq!(table.get(a).unwrap().state, ProcessState::Ready);
        assert_eq!(table.get(b).unwrap().state, ProcessState::Running);
        assert_eq!(sched.current(), Some(b));
    }
}
