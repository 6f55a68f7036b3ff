//! Four-digit 7-segment display with blinking digits and dot indicators.
//!
//! [`SegmentDisplay`] keeps the logical contents (digits, dots, blink range)
//! and on every [`ClockDisplay::refresh`] turns them into one byte per digit
//! for a [`SegmentPanel`]. Segment bytes use the MAX7219 no-decode layout:
//! bit 7 is the decimal point, bits 6..0 are segments A..G.

/// Number of digit positions on the display.
pub const DIGITS: usize = 4;

/// One segment byte per digit, leftmost first.
pub type Frame = [u8; DIGITS];

/// Decimal point segment.
pub const DP: u8 = 0b1000_0000;

const BLANK: u8 = 0;

/// Segment patterns for 0-9.
const FONT: [u8; 10] = [
    0b0111_1110, // 0
    0b0011_0000, // 1
    0b0110_1101, // 2
    0b0111_1001, // 3
    0b0011_0011, // 4
    0b0101_1011, // 5
    0b0101_1111, // 6
    0b0111_0000, // 7
    0b0111_1111, // 8
    0b0111_1011, // 9
];

/// Segments for a BCD digit; anything above 9 renders blank.
pub fn segments(digit: u8) -> u8 {
    FONT.get(digit as usize).copied().unwrap_or(BLANK)
}

/// Display operations the clock controller issues.
pub trait ClockDisplay {
    /// Blinks digits `first..=last` with a full cycle of `period_ms`.
    /// A period of 0 stops blinking.
    fn blink_digits(&mut self, first: u8, last: u8, period_ms: u16);

    /// Flips the dot at `position` and returns its new state.
    fn toggle_dot(&mut self, position: u8) -> bool;

    fn set_dot(&mut self, position: u8, on: bool);

    /// Replaces the shown digits with the leading digits of `digits`.
    fn write_bcd(&mut self, digits: &[u8]);

    /// Pushes the current contents to the hardware. Must be called on every
    /// tick; never blocks.
    fn refresh(&mut self);
}

/// Sink for finished frames, e.g. a MAX7219 or a directly multiplexed panel.
pub trait SegmentPanel {
    type Error;

    fn show(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

struct Blink {
    first: usize,
    last: usize,
    /// Refreshes per full on/off cycle.
    period: u32,
    phase: u32,
}

impl Blink {
    fn visible(&self) -> bool {
        self.phase < self.period.div_ceil(2)
    }

    fn covers(&self, position: usize) -> bool {
        (self.first..=self.last).contains(&position)
    }
}

/// Display driver over a [`SegmentPanel`].
pub struct SegmentDisplay<P> {
    panel: P,
    refresh_hz: u16,
    digits: [u8; DIGITS],
    dots: [bool; DIGITS],
    blink: Option<Blink>,
    shown: Option<Frame>,
}

impl<P: SegmentPanel> SegmentDisplay<P> {
    /// Creates a blank display refreshed `refresh_hz` times a second.
    pub fn new(panel: P, refresh_hz: u16) -> Self {
        Self {
            panel,
            refresh_hz,
            digits: [0; DIGITS],
            dots: [false; DIGITS],
            blink: None,
            shown: None,
        }
    }

    pub fn digits(&self) -> &[u8; DIGITS] {
        &self.digits
    }

    pub fn dots(&self) -> &[bool; DIGITS] {
        &self.dots
    }

    /// Currently blinking digit range, if any.
    pub fn blink_range(&self) -> Option<(u8, u8)> {
        self.blink
            .as_ref()
            .map(|b| (b.first as u8, b.last as u8))
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Frame for the current contents and blink phase.
    pub fn frame(&self) -> Frame {
        core::array::from_fn(|i| {
            let hidden = self
                .blink
                .as_ref()
                .is_some_and(|b| b.covers(i) && !b.visible());
            let digit = if hidden { BLANK } else { segments(self.digits[i]) };
            if self.dots[i] {
                digit | DP
            } else {
                digit
            }
        })
    }
}

impl<P: SegmentPanel> ClockDisplay for SegmentDisplay<P> {
    fn blink_digits(&mut self, first: u8, last: u8, period_ms: u16) {
        let first = (first as usize).min(DIGITS - 1);
        let last = (last as usize).clamp(first, DIGITS - 1);
        let period = period_ms as u32 * self.refresh_hz as u32 / 1000;
        self.blink = (period_ms > 0).then_some(Blink {
            first,
            last,
            period: period.max(2),
            phase: 0,
        });
    }

    fn toggle_dot(&mut self, position: u8) -> bool {
        match self.dots.get_mut(position as usize) {
            Some(dot) => {
                *dot = !*dot;
                *dot
            }
            None => false,
        }
    }

    fn set_dot(&mut self, position: u8, on: bool) {
        if let Some(dot) = self.dots.get_mut(position as usize) {
            *dot = on;
        }
    }

    fn write_bcd(&mut self, digits: &[u8]) {
        let n = digits.len().min(DIGITS);
        self.digits[..n].copy_from_slice(&digits[..n]);
    }

    fn refresh(&mut self) {
        if let Some(blink) = self.blink.as_mut() {
            blink.phase = (blink.phase + 1) % blink.period;
        }
        let frame = self.frame();
        if self.shown == Some(frame) {
            return;
        }
        match self.panel.show(&frame) {
            Ok(()) => self.shown = Some(frame),
            Err(_) => {
                // left unmarked so the next refresh sends it again
                #[cfg(feature = "defmt")]
                defmt::warn!("display panel rejected frame");
            }
        }
    }
}
