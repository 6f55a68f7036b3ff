//! The clock controller.
//!
//! One [`Controller`] owns the mode, the edit buffer and every collaborator.
//! The main loop calls [`Controller::poll`] (or the `on_*` event methods
//! directly); the periodic tick context calls [`Controller::on_tick`].
//! Each field has a single writer: the main loop writes the mode and the
//! edit buffer, the tick context writes the tick counter.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::alarm::{self, Buzzer, ALARM_DOT};
use crate::bcd;
use crate::clock::{Clock, HourMinute};
use crate::config::Config;
use crate::display::{ClockDisplay, DIGITS};
use crate::hold::TickCounter;
use crate::input::{Buttons, Event};
use crate::mode::{Indicators, Mode};

/// Dot blinked once a second while the clock is showing.
pub const SECONDS_DOT: u8 = 1;

pub struct Controller<'a, D, P, B> {
    config: Config,
    mode: Mode,
    buffer: HourMinute,
    clock: Clock,
    display: D,
    buttons: Buttons<P>,
    buzzer: Buzzer<B>,
    ticks: &'a TickCounter,
}

impl<'a, D, P, B> Controller<'a, D, P, B>
where
    D: ClockDisplay,
    P: InputPin,
    B: OutputPin,
{
    /// Boots into [`Mode::Unconfigured`] with a stopped clock.
    pub fn new(
        config: Config,
        display: D,
        buttons: Buttons<P>,
        buzzer: Buzzer<B>,
        ticks: &'a TickCounter,
    ) -> Self {
        let mut controller = Self {
            config,
            mode: Mode::Unconfigured,
            buffer: [0; 4],
            clock: Clock::new(config.ticks_per_second),
            display,
            buttons,
            buzzer,
            ticks,
        };
        controller.change_mode(Mode::Unconfigured);
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Digits being edited, `[H, H, M, M]`.
    pub fn buffer(&self) -> &HourMinute {
        &self.buffer
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn buzzer(&self) -> &Buzzer<B> {
        &self.buzzer
    }

    /// Enters `mode` and shows its blink range and dots.
    fn change_mode(&mut self, mode: Mode) {
        self.mode = mode;

        let Indicators { blink, dots } = mode.indicators();
        match blink {
            Some((first, last)) => {
                self.display
                    .blink_digits(first, last, self.config.blink_period_ms)
            }
            None => self.display.blink_digits(0, DIGITS as u8 - 1, 0),
        }
        for (position, on) in (0u8..).zip(dots) {
            self.display.set_dot(position, on);
        }
        if !mode.edits_alarm() {
            self.display.set_dot(ALARM_DOT, self.clock.is_armed());
        }

        #[cfg(feature = "defmt")]
        defmt::info!("mode -> {}", mode);
    }

    /// Scans the buttons once and handles whatever they produced.
    pub fn poll(&mut self) {
        for event in self.buttons.scan(self.ticks.load()) {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: Event) {
        #[cfg(feature = "defmt")]
        defmt::debug!("{} in {}", event, self.mode);

        match event {
            Event::Accept => self.on_accept(),
            Event::Cancel => self.on_cancel(),
            Event::SetTimeHeld => self.on_set_time_held(),
            Event::SetAlarmHeld => self.on_set_alarm_held(),
            Event::Increment => self.on_increment(),
            Event::Decrement => self.on_decrement(),
        }
    }

    pub fn on_accept(&mut self) {
        match self.mode {
            Mode::Unconfigured => {}
            Mode::Showing => alarm::arm(&mut self.clock, &mut self.display),
            Mode::AdjustingMinutes => self.change_mode(Mode::AdjustingHours),
            Mode::AdjustingHours => {
                self.clock.set_time(&self.buffer);
                self.change_mode(Mode::Showing);
            }
            Mode::AdjustingAlarmMinutes => self.change_mode(Mode::AdjustingAlarmHours),
            Mode::AdjustingAlarmHours => {
                self.clock.set_alarm(&self.buffer);
                alarm::arm(&mut self.clock, &mut self.display);
                self.change_mode(Mode::Showing);
            }
        }
    }

    pub fn on_cancel(&mut self) {
        if self.clock.has_valid_time() && self.mode != Mode::Showing {
            self.change_mode(Mode::Showing);
        } else if self.mode == Mode::Showing {
            alarm::disarm(&mut self.clock, &mut self.display, &mut self.buzzer);
        } else {
            self.change_mode(Mode::Unconfigured);
        }
    }

    pub fn on_set_time_held(&mut self) {
        self.change_mode(Mode::AdjustingMinutes);
        self.clock.get_time(&mut self.buffer);
        self.display.write_bcd(&self.buffer);
    }

    /// Ignored until the time has been set.
    pub fn on_set_alarm_held(&mut self) {
        if !self.clock.has_valid_time() {
            return;
        }
        self.change_mode(Mode::AdjustingAlarmMinutes);
        self.clock.get_alarm(&mut self.buffer);
        self.display.write_bcd(&self.buffer);
    }

    pub fn on_increment(&mut self) {
        if let Some((digits, limit)) = self.mode.edited_pair() {
            bcd::increment(&mut self.buffer[digits], limit);
            self.display.write_bcd(&self.buffer);
        }
    }

    pub fn on_decrement(&mut self) {
        if let Some((digits, limit)) = self.mode.edited_pair() {
            bcd::decrement(&mut self.buffer[digits], limit);
            self.display.write_bcd(&self.buffer);
        }
    }

    /// Periodic refresh, `ticks_per_second` times a second. Never blocks.
    pub fn on_tick(&mut self) {
        self.display.refresh();

        let buzzer = &mut self.buzzer;
        let tick = self.clock.tick(|| {
            buzzer.assert();

            #[cfg(feature = "defmt")]
            defmt::info!("alarm fired");
        });
        self.ticks.store(tick);

        if (tick == 0 || tick == self.config.half_second()) && self.mode.shows_live_time() {
            let mut now = [0; 4];
            self.clock.get_time(&mut now);
            self.display.write_bcd(&now);
            if self.mode == Mode::Showing {
                self.display.toggle_dot(SECONDS_DOT);
            }
        }
    }
}
