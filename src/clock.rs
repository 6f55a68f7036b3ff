use crate::bcd::{self, HOURS, MINUTES, SECONDS};

/// Digits of the time of day as `[H, H, M, M, S, S]`.
pub type TimeDigits = [u8; 6];

/// Digits of an hour and minute as `[H, H, M, M]`.
pub type HourMinute = [u8; 4];

/// Time-keeping engine: counts ticks into a BCD time of day and watches
/// for the alarm.
pub struct Clock {
    ticks_per_second: u16,
    tick: u16,
    time: TimeDigits,
    valid: bool,
    alarm: HourMinute,
    armed: bool,
}

impl Clock {
    /// A stopped clock at 00:00:00 with no valid time and the alarm off.
    pub fn new(ticks_per_second: u16) -> Self {
        Self {
            ticks_per_second,
            tick: 0,
            time: [0; 6],
            valid: false,
            alarm: [0; 4],
            armed: false,
        }
    }

    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second
    }

    /// Advances one tick and returns the new sub-second tick value.
    ///
    /// `on_alarm` runs when this tick completes the alarm's minute while the
    /// alarm is armed.
    pub fn tick(&mut self, on_alarm: impl FnOnce()) -> u16 {
        self.tick += 1;
        if self.tick >= self.ticks_per_second {
            self.tick = 0;
            if self.valid && self.add_second() && self.armed && self.time[..4] == self.alarm {
                on_alarm();
            }
        }
        self.tick
    }

    /// Increments the second. Returns true if a new minute started.
    fn add_second(&mut self) -> bool {
        bcd::increment(&mut self.time[4..6], SECONDS);
        if self.time[4..6] != [0, 0] {
            return false;
        }
        self.add_minute();
        true
    }

    /// Increments the minute. Handles rollover to hours.
    fn add_minute(&mut self) {
        bcd::increment(&mut self.time[2..4], MINUTES);
        if self.time[2..4] == [0, 0] {
            bcd::increment(&mut self.time[0..2], HOURS);
        }
    }

    /// Copies the current time into `out`, as many digits as fit, and
    /// returns whether the time has ever been set.
    pub fn get_time(&self, out: &mut [u8]) -> bool {
        let n = out.len().min(self.time.len());
        out[..n].copy_from_slice(&self.time[..n]);
        self.valid
    }

    /// Sets hours and minutes; seconds restart at 00.
    pub fn set_time(&mut self, time: &HourMinute) {
        self.time[..4].copy_from_slice(time);
        self.time[4..6].copy_from_slice(&[0, 0]);
        self.valid = true;
    }

    pub fn has_valid_time(&self) -> bool {
        self.valid
    }

    pub fn get_alarm(&self, out: &mut HourMinute) {
        out.copy_from_slice(&self.alarm);
    }

    pub fn set_alarm(&mut self, alarm: &HourMinute) {
        self.alarm = *alarm;
    }

    /// Flips the armed flag and returns the new state.
    pub fn toggle_alarm(&mut self) -> bool {
        self.armed = !self.armed;
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TPS: u16 = 4;

    fn run_seconds(clock: &mut Clock, seconds: u32) -> u32 {
        let mut fired = 0;
        for _ in 0..seconds * TPS as u32 {
            clock.tick(|| fired += 1);
        }
        fired
    }

    #[test]
    fn tick_value_wraps_every_second() {
        let mut clock = Clock::new(TPS);
        let values: [u16; 5] = core::array::from_fn(|_| clock.tick(|| ()));
        assert_eq!(values, [1, 2, 3, 0, 1]);
    }

    #[test]
    fn stays_stopped_until_set() {
        let mut clock = Clock::new(TPS);
        run_seconds(&mut clock, 90);
        let mut now = [9; 6];
        assert!(!clock.get_time(&mut now));
        assert_eq!(now, [0; 6]);
    }

    #[test]
    fn carries_through_midnight() {
        let mut clock = Clock::new(TPS);
        clock.set_time(&[2, 3, 5, 9]);
        run_seconds(&mut clock, 59);
        let mut now = [0; 6];
        clock.get_time(&mut now);
        assert_eq!(now, [2, 3, 5, 9, 5, 9]);

        run_seconds(&mut clock, 1);
        assert!(clock.get_time(&mut now));
        assert_eq!(now, [0; 6]);
    }

    #[test]
    fn get_time_truncates_to_hours_and_minutes() {
        let mut clock = Clock::new(TPS);
        clock.set_time(&[1, 2, 3, 4]);
        let mut hm = [0; 4];
        assert!(clock.get_time(&mut hm));
        assert_eq!(hm, [1, 2, 3, 4]);
    }

    #[test]
    fn alarm_fires_once_at_target_minute_when_armed() {
        let mut clock = Clock::new(TPS);
        clock.set_time(&[0, 6, 5, 8]);
        clock.set_alarm(&[0, 6, 5, 9]);
        assert!(clock.toggle_alarm());

        assert_eq!(run_seconds(&mut clock, 59), 0);
        assert_eq!(run_seconds(&mut clock, 1), 1);
        assert_eq!(run_seconds(&mut clock, 120), 0);
    }

    #[test]
    fn disarmed_alarm_stays_silent() {
        let mut clock = Clock::new(TPS);
        clock.set_time(&[0, 6, 5, 9]);
        clock.set_alarm(&[0, 7, 0, 0]);
        assert_eq!(run_seconds(&mut clock, 60), 0);
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut clock = Clock::new(TPS);
        assert!(clock.toggle_alarm());
        assert!(clock.is_armed());
        assert!(!clock.toggle_alarm());
        assert!(!clock.is_armed());
    }
}
