//! Clock operating modes and what the display shows in each.

use core::ops::Range;

use crate::bcd::{Limit, HOURS, MINUTES};
use crate::display::DIGITS;

/// Operating mode. The order matters: every mode up to and including
/// [`Mode::Showing`] lets the tick handler draw the live time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Time never set; the display blinks.
    Unconfigured,
    /// Running clock.
    Showing,
    AdjustingMinutes,
    AdjustingHours,
    AdjustingAlarmMinutes,
    AdjustingAlarmHours,
}

/// Blink range and dots a mode shows on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicators {
    /// Inclusive digit range, `None` for steady digits.
    pub blink: Option<(u8, u8)>,
    pub dots: [bool; DIGITS],
}

const NO_DOTS: [bool; DIGITS] = [false; DIGITS];
const DOT_1: [bool; DIGITS] = [false, true, false, false];
const ALL_DOTS: [bool; DIGITS] = [true; DIGITS];

const HOURS_DIGITS: Range<usize> = 0..2;
const MINUTES_DIGITS: Range<usize> = 2..4;

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Unconfigured,
        Mode::Showing,
        Mode::AdjustingMinutes,
        Mode::AdjustingHours,
        Mode::AdjustingAlarmMinutes,
        Mode::AdjustingAlarmHours,
    ];

    pub fn indicators(self) -> Indicators {
        let (blink, dots) = match self {
            Mode::Unconfigured => (Some((0, 3)), DOT_1),
            Mode::Showing => (None, NO_DOTS),
            Mode::AdjustingMinutes => (Some((2, 3)), DOT_1),
            Mode::AdjustingHours => (Some((0, 1)), DOT_1),
            Mode::AdjustingAlarmMinutes => (Some((2, 3)), ALL_DOTS),
            Mode::AdjustingAlarmHours => (Some((0, 1)), ALL_DOTS),
        };
        Indicators { blink, dots }
    }

    /// True while the tick handler may overwrite the digits.
    pub fn shows_live_time(self) -> bool {
        self <= Mode::Showing
    }

    pub fn edits_alarm(self) -> bool {
        matches!(self, Mode::AdjustingAlarmMinutes | Mode::AdjustingAlarmHours)
    }

    /// Edit buffer digits and limit that increment/decrement act on.
    pub fn edited_pair(self) -> Option<(Range<usize>, Limit)> {
        match self {
            Mode::AdjustingMinutes | Mode::AdjustingAlarmMinutes => Some((MINUTES_DIGITS, MINUTES)),
            Mode::AdjustingHours | Mode::AdjustingAlarmHours => Some((HOURS_DIGITS, HOURS)),
            Mode::Unconfigured | Mode::Showing => None,
        }
    }
}
