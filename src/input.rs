//! Button inputs.
//!
//! This module provides:
//! - `DigitalInput`, a pin with polarity, level and edge queries
//! - `Buttons`, the six clock buttons scanned once per main-loop pass into
//!   a list of [`Event`]s
//!
//! Pin read errors count as "not pressed".

use embedded_hal::digital::v2::InputPin;
use heapless::Vec;

use crate::hold::{Hold, HoldDetector};

/// One button action for the mode state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Accept,
    Cancel,
    SetTimeHeld,
    SetAlarmHeld,
    Increment,
    Decrement,
}

/// Most events a single scan can produce.
pub const MAX_EVENTS: usize = 6;

pub type Events = Vec<Event, MAX_EVENTS>;

/// A button or switch on a GPIO pin.
pub struct DigitalInput<P> {
    pin: P,
    active_low: bool,
    last_active: bool,
}

impl<P: InputPin> DigitalInput<P> {
    /// Pressed pulls the pin to ground, as with a pull-up button.
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            last_active: false,
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            last_active: false,
        }
    }

    /// Current level.
    pub fn is_active(&self) -> bool {
        if self.active_low {
            self.pin.is_low().unwrap_or(false)
        } else {
            self.pin.is_high().unwrap_or(false)
        }
    }

    /// True once per press: the input is active now and was not at the
    /// previous call.
    pub fn has_activated(&mut self) -> bool {
        let active = self.is_active();
        let activated = active && !self.last_active;
        self.last_active = active;
        activated
    }
}

/// The six clock buttons.
pub struct Buttons<P> {
    pub accept: DigitalInput<P>,
    pub cancel: DigitalInput<P>,
    pub set_time: DigitalInput<P>,
    pub set_alarm: DigitalInput<P>,
    pub increment: DigitalInput<P>,
    pub decrement: DigitalInput<P>,
    set_time_hold: HoldDetector,
    set_alarm_hold: HoldDetector,
}

impl<P: InputPin> Buttons<P> {
    /// Set-time and set-alarm only report after being held `hold_seconds`.
    pub fn new(
        accept: DigitalInput<P>,
        cancel: DigitalInput<P>,
        set_time: DigitalInput<P>,
        set_alarm: DigitalInput<P>,
        increment: DigitalInput<P>,
        decrement: DigitalInput<P>,
        hold_seconds: u8,
    ) -> Self {
        Self {
            accept,
            cancel,
            set_time,
            set_alarm,
            increment,
            decrement,
            set_time_hold: HoldDetector::new(hold_seconds),
            set_alarm_hold: HoldDetector::new(hold_seconds),
        }
    }

    /// Samples every button once at sub-second `tick`.
    pub fn scan(&mut self, tick: u16) -> Events {
        let mut events = Events::new();
        // capacity equals the number of buttons, pushes cannot fail
        let mut push = |event| {
            let _ = events.push(event);
        };

        if self.accept.has_activated() {
            push(Event::Accept);
        }
        if self.cancel.has_activated() {
            push(Event::Cancel);
        }
        if held(&mut self.set_time, &mut self.set_time_hold, tick) {
            push(Event::SetTimeHeld);
        }
        if held(&mut self.set_alarm, &mut self.set_alarm_hold, tick) {
            push(Event::SetAlarmHeld);
        }
        if self.increment.has_activated() {
            push(Event::Increment);
        }
        if self.decrement.has_activated() {
            push(Event::Decrement);
        }
        events
    }
}

fn held<P: InputPin>(input: &mut DigitalInput<P>, hold: &mut HoldDetector, tick: u16) -> bool {
    if input.has_activated() && hold.is_idle() {
        hold.start(tick);
    }
    hold.poll(input.is_active(), tick) == Hold::Held
}
