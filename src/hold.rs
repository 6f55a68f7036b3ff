//! Long-press detection against the shared tick counter.
//!
//! A press counts as held once the input has stayed asserted across
//! `seconds` wraps of the tick counter back to zero. Success is reported
//! only after the button is released, so the same press is never also
//! treated as a tap.

use core::sync::atomic::{AtomicU16, Ordering};

/// Sub-second tick published by the refresh handler.
///
/// Only the tick context stores; readers may see a value one tick old.
pub struct TickCounter(AtomicU16);

impl TickCounter {
    pub const fn new() -> Self {
        Self(AtomicU16::new(0))
    }

    pub fn load(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn store(&self, tick: u16) {
        self.0.store(tick, Ordering::Relaxed)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one [`HoldDetector::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// Not watching a press.
    Idle,
    /// Still undecided, or held long enough and waiting for release.
    Pending,
    /// Released too early.
    Aborted,
    /// Held long enough and now released.
    Held,
}

#[derive(Clone, Copy)]
enum State {
    Idle,
    Counting { wraps: u8, last: u16 },
    Latched,
}

/// Non-blocking long-press detector, polled once per main-loop pass.
pub struct HoldDetector {
    seconds: u8,
    state: State,
}

impl HoldDetector {
    pub const fn new(seconds: u8) -> Self {
        Self {
            seconds,
            state: State::Idle,
        }
    }

    /// Begins timing a press that was first seen at `tick`.
    pub fn start(&mut self, tick: u16) {
        self.state = State::Counting {
            wraps: 0,
            last: tick,
        };
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Feeds one sample of the input level taken at `tick`.
    pub fn poll(&mut self, asserted: bool, tick: u16) -> Hold {
        match self.state {
            State::Idle => Hold::Idle,
            State::Counting { wraps, last } => {
                if !asserted {
                    self.state = State::Idle;
                    return Hold::Aborted;
                }
                let wraps = if tick < last { wraps + 1 } else { wraps };
                self.state = if wraps >= self.seconds {
                    State::Latched
                } else {
                    State::Counting { wraps, last: tick }
                };
                Hold::Pending
            }
            State::Latched if asserted => Hold::Pending,
            State::Latched => {
                self.state = State::Idle;
                Hold::Held
            }
        }
    }
}

/// Blocking form: busy-polls `asserted` and `tick` until the press is
/// decided. The tick source must keep advancing from another context.
pub fn held_for(
    seconds: u8,
    mut asserted: impl FnMut() -> bool,
    mut tick: impl FnMut() -> u16,
) -> bool {
    let mut detector = HoldDetector::new(seconds);
    detector.start(tick());
    loop {
        match detector.poll(asserted(), tick()) {
            Hold::Held => return true,
            Hold::Aborted | Hold::Idle => return false,
            Hold::Pending => core::hint::spin_loop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    const TPS: u32 = 10;

    /// Polls a detector once per tick, starting at tick 4, with the input
    /// released after `release_after` ticks. Returns the final verdict.
    fn press(seconds: u8, release_after: u32) -> Hold {
        let start = 4;
        let mut detector = HoldDetector::new(seconds);
        detector.start(start);
        for n in 1..=release_after + 1 {
            let tick = ((start as u32 + n) % TPS) as u16;
            match detector.poll(n <= release_after, tick) {
                Hold::Pending => {}
                other => return other,
            }
        }
        Hold::Pending
    }

    #[test]
    fn released_one_tick_before_third_wrap_aborts() {
        // wraps land on n = 6, 16, 26
        assert_eq!(press(3, 25), Hold::Aborted);
    }

    #[test]
    fn released_one_tick_after_third_wrap_is_held() {
        assert_eq!(press(3, 27), Hold::Held);
    }

    #[test]
    fn one_second_hold_boundary() {
        // first wrap lands on n = 6
        assert_eq!(press(1, 5), Hold::Aborted);
        assert_eq!(press(1, 6), Hold::Held);
    }

    #[test]
    fn success_waits_for_release() {
        let mut detector = HoldDetector::new(1);
        detector.start(9);
        assert_eq!(detector.poll(true, 0), Hold::Pending);
        for tick in 1..20 {
            assert_eq!(detector.poll(true, tick % 10), Hold::Pending);
        }
        assert_eq!(detector.poll(false, 0), Hold::Held);
        assert!(detector.is_idle());
        assert_eq!(detector.poll(false, 1), Hold::Idle);
    }

    #[test]
    fn repeated_samples_of_the_same_tick_do_not_count() {
        let mut detector = HoldDetector::new(1);
        detector.start(3);
        for _ in 0..100 {
            assert_eq!(detector.poll(true, 3), Hold::Pending);
        }
        assert_eq!(detector.poll(false, 3), Hold::Aborted);
    }

    /// Simulated time: every read of the tick source advances one tick.
    fn blocking_press(seconds: u8, release_at: u32) -> bool {
        let now = Cell::new(4u32);
        held_for(
            seconds,
            || now.get() < release_at,
            || {
                now.set(now.get() + 1);
                (now.get() % TPS) as u16
            },
        )
    }

    #[test]
    fn blocking_form_matches_contract() {
        // third wrap at now = 30
        assert!(!blocking_press(3, 29));
        assert!(blocking_press(3, 31));
    }

    #[test]
    fn tick_counter_round_trips() {
        let ticks = TickCounter::new();
        ticks.store(599);
        assert_eq!(ticks.load(), 599);
    }
}
