//! Two-digit BCD counters.
//!
//! A pair is `[tens, ones]`, each a decimal digit. Both operations work in
//! place and never fail: stepping past the limit wraps the whole pair to
//! `00`, stepping below `00` wraps it to the limit.

/// Highest value a digit pair may hold, as `(tens, ones)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Limit {
    pub tens: u8,
    pub ones: u8,
}

impl Limit {
    pub const fn new(tens: u8, ones: u8) -> Self {
        Self { tens, ones }
    }

    /// True if `[tens, ones]` is past this limit, comparing tens first.
    fn exceeded_by(self, tens: u8, ones: u8) -> bool {
        (tens, ones) > (self.tens, self.ones)
    }
}

/// 00..=59
pub const MINUTES: Limit = Limit::new(5, 9);
/// 00..=23
pub const HOURS: Limit = Limit::new(2, 3);
/// Seconds share the minutes range.
pub const SECONDS: Limit = MINUTES;

/// Steps `pair` up by one.
pub fn increment(pair: &mut [u8], limit: Limit) {
    pair[1] = pair[1].wrapping_add(1);
    if pair[1] > 9 {
        pair[1] = 0;
        pair[0] = pair[0].wrapping_add(1);
    }
    if limit.exceeded_by(pair[0], pair[1]) {
        pair[0] = 0;
        pair[1] = 0;
    }
}

/// Steps `pair` down by one.
pub fn decrement(pair: &mut [u8], limit: Limit) {
    // unsigned underflow shows up as a digit above 9
    pair[1] = pair[1].wrapping_sub(1);
    if pair[1] > 9 {
        pair[1] = 9;
        pair[0] = pair[0].wrapping_sub(1);
    }
    if pair[0] > 9 {
        pair[0] = limit.tens;
        pair[1] = limit.ones;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_pairs(limit: Limit) -> impl Iterator<Item = [u8; 2]> {
        (0..=limit.tens).flat_map(move |tens| {
            let top = if tens == limit.tens { limit.ones } else { 9 };
            (0..=top).map(move |ones| [tens, ones])
        })
    }

    #[test]
    fn minutes_wrap_at_59() {
        let mut pair = [5, 9];
        increment(&mut pair, MINUTES);
        assert_eq!(pair, [0, 0]);

        decrement(&mut pair, MINUTES);
        assert_eq!(pair, [5, 9]);
    }

    #[test]
    fn hours_wrap_at_23() {
        let mut pair = [2, 3];
        increment(&mut pair, HOURS);
        assert_eq!(pair, [0, 0]);

        decrement(&mut pair, HOURS);
        assert_eq!(pair, [2, 3]);
    }

    #[test]
    fn carry_and_borrow_between_digits() {
        let mut pair = [0, 9];
        increment(&mut pair, MINUTES);
        assert_eq!(pair, [1, 0]);

        let mut pair = [2, 0];
        decrement(&mut pair, HOURS);
        assert_eq!(pair, [1, 9]);

        let mut pair = [1, 9];
        increment(&mut pair, HOURS);
        assert_eq!(pair, [2, 0]);
    }

    #[test]
    fn decrement_undoes_increment() {
        for limit in [MINUTES, HOURS] {
            for start in valid_pairs(limit) {
                let mut pair = start;
                increment(&mut pair, limit);
                assert!(!limit.exceeded_by(pair[0], pair[1]));
                decrement(&mut pair, limit);
                assert_eq!(pair, start, "limit {:?}", limit);
            }
        }
    }

    #[test]
    fn operates_on_a_slice_of_a_larger_buffer() {
        let mut buffer = [1, 2, 5, 9];
        increment(&mut buffer[2..4], MINUTES);
        assert_eq!(buffer, [1, 2, 0, 0]);
        decrement(&mut buffer[0..2], HOURS);
        assert_eq!(buffer, [1, 1, 0, 0]);
    }
}
