//! Alarm arming and the buzzer output.
//!
//! The clock only offers a toggle for its armed flag, so [`arm`] and
//! [`disarm`] toggle, check the result, and toggle once more if the flag
//! ended up on the wrong side.

use embedded_hal::digital::v2::OutputPin;

use crate::clock::Clock;
use crate::display::ClockDisplay;

/// Dot position used as the alarm-armed indicator.
pub const ALARM_DOT: u8 = 3;

/// Active-high buzzer.
pub struct Buzzer<B> {
    pin: B,
    asserted: bool,
}

impl<B: OutputPin> Buzzer<B> {
    /// Wraps `pin`, which must start low.
    pub fn new(pin: B) -> Self {
        Self {
            pin,
            asserted: false,
        }
    }

    pub fn assert(&mut self) {
        if self.pin.set_high().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("buzzer pin write failed");
        }
        self.asserted = true;
    }

    pub fn deassert(&mut self) {
        if self.pin.set_low().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("buzzer pin write failed");
        }
        self.asserted = false;
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn release(self) -> B {
        self.pin
    }
}

/// Arms the alarm and lights the indicator dot.
pub fn arm(clock: &mut Clock, display: &mut impl ClockDisplay) {
    if !clock.toggle_alarm() {
        clock.toggle_alarm();
    }
    display.set_dot(ALARM_DOT, true);

    #[cfg(feature = "defmt")]
    defmt::info!("alarm armed");
}

/// Disarms the alarm, clears the indicator dot and silences the buzzer.
pub fn disarm<B: OutputPin>(
    clock: &mut Clock,
    display: &mut impl ClockDisplay,
    buzzer: &mut Buzzer<B>,
) {
    if clock.toggle_alarm() {
        clock.toggle_alarm();
    }
    display.set_dot(ALARM_DOT, false);
    buzzer.deassert();

    #[cfg(feature = "defmt")]
    defmt::info!("alarm disarmed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::NullPanel;
    use crate::display::SegmentDisplay;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    #[test]
    fn arm_is_idempotent() {
        let mut clock = Clock::new(10);
        let mut display = SegmentDisplay::new(NullPanel, 10);

        arm(&mut clock, &mut display);
        arm(&mut clock, &mut display);
        assert!(clock.is_armed());
        assert!(display.dots()[ALARM_DOT as usize]);

        let mut buzzer = Buzzer::new(PinMock::new(&[Transaction::set(State::Low)]));
        disarm(&mut clock, &mut display, &mut buzzer);
        assert!(!clock.is_armed());
        assert!(!display.dots()[ALARM_DOT as usize]);
        buzzer.release().done();
    }

    #[test]
    fn disarm_is_idempotent_and_silences_buzzer() {
        let mut clock = Clock::new(10);
        let mut display = SegmentDisplay::new(NullPanel, 10);
        let mut buzzer = Buzzer::new(PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::Low),
        ]));

        buzzer.assert();
        assert!(buzzer.is_asserted());
        disarm(&mut clock, &mut display, &mut buzzer);
        disarm(&mut clock, &mut display, &mut buzzer);
        assert!(!clock.is_armed());
        assert!(!buzzer.is_asserted());
        buzzer.release().done();
    }

    #[test]
    fn arm_recovers_from_an_out_of_sync_flag() {
        let mut clock = Clock::new(10);
        let mut display = SegmentDisplay::new(NullPanel, 10);
        clock.toggle_alarm();

        arm(&mut clock, &mut display);
        assert!(clock.is_armed());
    }
}
