// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! The ready queue: a circular singly-linked list of Ready/Running PCBs.
//!
//! A PCB is linked into the ring iff its state is Ready or Running — a
//! Terminated or Blocked PCB is unlinked. `head` is the process the
//! scheduler currently considers current; `next()` rotates the ring by
//! one without touching any `Process.next` pointer, since the ring is
//! genuinely circular (the tail's `next` always points back to the
//! head).

use crate::process::table::{Pid, ProcessState, ProcessTable};

pub struct Scheduler {
    head: Option<Pid>,
    tail: Option<Pid>,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self { head: None, tail: None }
    }

    pub fn current(&self) -> Option<Pid> {
        self.head
    }

    /// Append `pid` to the tail of the ring and mark it Ready.
    pub fn add(&mut self, table: &mut ProcessTable, pid: Pid) {
        table.get_mut(pid).unwrap().state = ProcessState::Ready;
        match (self.head, self.tail) {
            (None, None) => {
                table.get_mut(pid).unwrap().next = Some(pid);
                self.head = Some(pid);
                self.tail = Some(pid);
            }
            (Some(head), Some(tail)) => {
                table.get_mut(pid).unwrap().next = Some(head);
                table.get_mut(tail).unwrap().next = Some(pid);
                self.tail = Some(pid);
            }
            _ => unreachable!("scheduler: head/tail out of sync"),
        }
    }

    /// Unlink `pid` from the ring. O(n); handles the single-element case.
    /// A no-op if the ring is empty or `pid` is not linked.
    pub fn remove(&mut self, table: &mut ProcessTable, pid: Pid) {
        let Some(head) = self.head else { return };

        if head == pid {
            let next = table.get(pid).unwrap().next;
            if next == Some(pid) {
                self.head = None;
                self.tail = None;
            } else {
                if let Some(tail) = self.tail {
                    table.get_mut(tail).unwrap().next = next;
                }
                self.head = next;
            }
        } else {
            let mut cursor = head;
            loop {
                let next = table.get(cursor).unwrap().next;
                if next == Some(pid) {
                    let pid_next = table.get(pid).unwrap().next;
                    table.get_mut(cursor).unwrap().next = pid_next;
                    if self.tail == Some(pid) {
                        self.tail = Some(cursor);
                    }
                    break;
                }
                match next {
                    Some(n) => cursor = n,
                    None => return, // not linked
                }
            }
        }

        table.get_mut(pid).unwrap().next = None;
    }

    /// Return the current head and rotate the ring by one: the node
    /// after it becomes the new head, and it becomes the new tail.
    pub fn next(&mut self, table: &ProcessTable) -> Option<Pid> {
        let old_head = self.head?;
        self.head = table.get(old_head).unwrap().next;
        self.tail = Some(old_head);
        Some(old_head)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(n: usize) -> (ProcessTable, [Pid; 8]) {
        let mut table = ProcessTable::new();
        let mut pids = [0u32; 8];
        for i in 0..n {
            pids[i] = unsafe { table.create_bootstrap(0) };
        }
        (table, pids)
    }

    #[test]
    fn single_element_ring_rotates_to_itself() {
        let (mut table, pids) = table_with(1);
        let mut sched = Scheduler::new();
        sched.add(&mut table, pids[0]);

        assert_eq!(sched.next(&table), Some(pids[0]));
        assert_eq!(sched.current(), Some(pids[0]));
    }

    #[test]
    fn next_rotates_in_fifo_order() {
        let (mut table, pids) = table_with(3);
        let mut sched = Scheduler::new();
        for &pid in &pids[..3] {
            sched.add(&mut table, pid);
        }

        assert_eq!(sched.next(&table), Some(pids[0]));
        assert_eq!(sched.next(&table), Some(pids[1]));
        assert_eq!(sched.next(&table), Some(pids[2]));
        assert_eq!(sched.next(&table), Some(pids[0]));
    }

    #[test]
    fn remove_middle_element_preserves_ring() {
        let (mut table, pids) = table_with(3);
        let mut sched = Scheduler::new();
        for &pid in &pids[..3] {
            sched.add(&mut table, pid);
        }

        sched.remove(&mut table, pids[1]);

        assert_eq!(sched.next(&table), Some(pids[0]));
        assert_eq!(sched.next(&table), Some(pids[2]));
        assert_eq!(sched.next(&table), Some(pids[0]));
    }

    #[test]
    fn remove_sole_element_empties_the_ring() {
        let (mut table, pids) = table_with(1);
        let mut sched = Scheduler::new();
        sched.add(&mut table, pids[0]);

        sched.remove(&mut table, pids[0]);

        assert_eq!(sched.next(&table), None);
        assert_eq!(sched.current(), None);
    }

    #[test]
    fn remove_head_relinks_tail_to_new_head() {
        let (mut table, pids) = table_with(3);
        let mut sched = Scheduler::new();
        for &pid in &pids[..3] {
            sched.add(&mut table, pid);
        }

        sched.remove(&mut table, pids[0]);

        assert_eq!(sched.next(&table), Some(pids[1]));
        assert_eq!(sched.next(&table), Some(pids[2]));
        assert_eq!(sched.next(&table), Some(pids[1]));
    }
}
