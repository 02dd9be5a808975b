// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Programmable Interval Timer (8253/8254) channel 0 as the
//! scheduler's tick source.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::arch::amd64::ops::outb;
use crate::config::{PIT_BASE_FREQUENCY_HZ, PIT_CHANNEL0_DATA, PIT_COMMAND, TIMER_HZ};
use crate::sched;

/// Channel 0, access lobyte/hibyte, mode 3 (square wave rate generator).
const PIT_COMMAND_CHANNEL0_RATE_GENERATOR: u8 = 0x36;

static TICKS: AtomicU64 = AtomicU64::new(0);

fn divisor_for(hz: u32) -> u16 {
    (PIT_BASE_FREQUENCY_HZ / hz) as u16
}

/// Program PIT channel 0 to fire at [`TIMER_HZ`].
///
/// # Safety
///
/// Must run once, before IRQ0 is unmasked.
pub unsafe fn init() {
    let divisor = divisor_for(TIMER_HZ);
    outb(PIT_COMMAND, PIT_COMMAND_CHANNEL0_RATE_GENERATOR);
    outb(PIT_CHANNEL0_DATA, (divisor & 0xFF) as u8);
    outb(PIT_CHANNEL0_DATA, (divisor >> 8) as u8);
}

/// Number of timer interrupts serviced since boot.
pub fn ticks() -> u64 {
    TICKS.load(Ordering::Relaxed)
}

/// IRQ0 handler: advance the tick count and let the scheduler decide
/// whether the running process's time slice is up.
pub fn tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
    sched::tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_matches_default_timer_frequency() {
        assert_eq!(divisor_for(100), 11931);
    }

    #[test]
    fn divisor_is_exact_for_1000_hz() {
        assert_eq!(divisor_for(1000), 1193);
    }
}
