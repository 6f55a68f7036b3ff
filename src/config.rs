//! Clock configuration.
//!
//! The firmware fixes these at compile time; tests build smaller values so
//! a simulated second is only a handful of ticks.

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick rate must be even and at least 2 so the half-second tick exists.
    TickRate(u16),
    /// A long press needs at least one whole second.
    HoldSeconds(u8),
}

/// Timing settings shared by the controller, the clock and the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Refresh handler invocations per second (range: 2-65534, even).
    pub ticks_per_second: u16,

    /// Full on/off cycle of blinking digits, in milliseconds.  0 disables.
    pub blink_period_ms: u16,

    /// Seconds a set-time / set-alarm button must be held.
    pub hold_seconds: u8,
}

// "Factory" defaults:
pub const TICKS_PER_SECOND_DEFAULT: u16 = 1000;
pub const BLINK_PERIOD_MS_DEFAULT: u16 = 400;
pub const HOLD_SECONDS_DEFAULT: u8 = 3;

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND_DEFAULT,
            blink_period_ms: BLINK_PERIOD_MS_DEFAULT,
            hold_seconds: HOLD_SECONDS_DEFAULT,
        }
    }
}

impl Config {
    /// Builds a validated configuration.
    pub fn new(
        ticks_per_second: u16,
        blink_period_ms: u16,
        hold_seconds: u8,
    ) -> Result<Self, ConfigError> {
        if ticks_per_second < 2 || ticks_per_second % 2 != 0 {
            return Err(ConfigError::TickRate(ticks_per_second));
        }
        if hold_seconds == 0 {
            return Err(ConfigError::HoldSeconds(hold_seconds));
        }
        Ok(Self {
            ticks_per_second,
            blink_period_ms,
            hold_seconds,
        })
    }

    /// Tick value at which the second half of each second starts.
    pub const fn half_second(&self) -> u16 {
        self.ticks_per_second / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let d = Config::default();
        assert_eq!(
            Config::new(d.ticks_per_second, d.blink_period_ms, d.hold_seconds),
            Ok(d)
        );
        assert_eq!(d.half_second(), 500);
    }

    #[test]
    fn rejects_odd_or_tiny_tick_rates() {
        assert_eq!(Config::new(0, 200, 3), Err(ConfigError::TickRate(0)));
        assert_eq!(Config::new(1, 200, 3), Err(ConfigError::TickRate(1)));
        assert_eq!(Config::new(601, 200, 3), Err(ConfigError::TickRate(601)));
        assert!(Config::new(600, 200, 3).is_ok());
    }

    #[test]
    fn rejects_zero_hold() {
        assert_eq!(Config::new(600, 200, 0), Err(ConfigError::HoldSeconds(0)));
    }
}
