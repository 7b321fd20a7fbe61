use std::time::Duration;

use constants::portfolio::{DELETE_INTERVAL_MS, HOLD_EMPTY_MS, HOLD_FULL_MS, TYPE_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    HoldingFull,
    Deleting,
    HoldingEmpty,
}

#[derive(Debug, Clone, Copy)]
pub struct TypewriterTiming {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub hold_full: Duration,
    pub hold_empty: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(TYPE_INTERVAL_MS),
            delete_interval: Duration::from_millis(DELETE_INTERVAL_MS),
            hold_full: Duration::from_millis(HOLD_FULL_MS),
            hold_empty: Duration::from_millis(HOLD_EMPTY_MS),
        }
    }
}

/// Types each phrase out, holds it, deletes it, holds empty, then moves to
/// the next phrase, wrapping forever. Works on chars, not bytes.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timing: TypewriterTiming,
    phrase: usize,
    shown: usize,
    phase: Phase,
    until_next: Duration,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_timing(phrases, TypewriterTiming::default())
    }

    pub fn with_timing<I, S>(phrases: I, timing: TypewriterTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|phrase| phrase.as_ref().chars().collect())
                .collect(),
            timing,
            phrase: 0,
            shown: 0,
            phase: Phase::Typing,
            until_next: timing.type_interval,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn text(&self) -> String {
        self.phrases
            .get(self.phrase)
            .map(|chars| chars[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    /// Advance by `dt`. Returns whether the visible text changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.phrases.is_empty() {
            return false;
        }

        let before = self.text();
        let mut budget = dt;
        while budget >= self.until_next {
            budget -= self.until_next;
            self.step();
        }
        self.until_next -= budget;

        before != self.text()
    }

    fn current_len(&self) -> usize {
        self.phrases.get(self.phrase).map_or(0, Vec::len)
    }

    fn step(&mut self) {
        match self.phase {
            Phase::Typing => {
                if self.shown < self.current_len() {
                    self.shown += 1;
                }
                if self.shown >= self.current_len() {
                    self.phase = Phase::HoldingFull;
                    self.until_next = self.timing.hold_full;
                } else {
                    self.until_next = self.timing.type_interval;
                }
            }
            Phase::HoldingFull => {
                self.phase = Phase::Deleting;
                self.until_next = self.timing.delete_interval;
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = Phase::HoldingEmpty;
                    self.until_next = self.timing.hold_empty;
                } else {
                    self.until_next = self.timing.delete_interval;
                }
            }
            Phase::HoldingEmpty => {
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.phase = Phase::Typing;
                self.until_next = self.timing.type_interval;
            }
        }

        // A zero interval would never let `advance` return.
        if self.until_next.is_zero() {
            self.until_next = Duration::from_millis(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// Every distinct text shown, stepping 10 ms at a time for `total_ms`.
    fn trace(writer: &mut Typewriter, total_ms: u64) -> Vec<String> {
        let mut seen = vec![writer.text()];
        for _ in 0..total_ms / 10 {
            if writer.advance(ms(10)) {
                seen.push(writer.text());
            }
        }
        seen
    }

    #[test]
    fn types_one_char_per_interval() {
        let mut writer = Typewriter::new(["AI & ML"]);
        assert_eq!(writer.text(), "");
        writer.advance(ms(69));
        assert_eq!(writer.text(), "");
        writer.advance(ms(1));
        assert_eq!(writer.text(), "A");
        writer.advance(ms(140));
        assert_eq!(writer.text(), "AI ");
    }

    #[test]
    fn holds_then_deletes_faster_than_it_types() {
        let mut writer = Typewriter::new(["abc"]);
        writer.advance(ms(210));
        assert_eq!(writer.text(), "abc");
        writer.advance(ms(1199));
        assert_eq!(writer.text(), "abc");
        writer.advance(ms(1));
        assert_eq!(writer.text(), "abc");
        writer.advance(ms(30));
        assert_eq!(writer.text(), "ab");
        writer.advance(ms(60));
        assert_eq!(writer.text(), "");
    }

    #[test]
    fn wraps_to_first_phrase_through_empty() {
        let phrases = ["ab", "xyz"];
        let mut writer = Typewriter::new(phrases);
        let seen = trace(&mut writer, 12_000);

        let expected_cycle = ["", "a", "ab", "a", "", "x", "xy", "xyz", "xy", "x"];
        assert!(seen.len() > expected_cycle.len());
        for (i, text) in seen.iter().enumerate() {
            assert_eq!(text, expected_cycle[i % expected_cycle.len()], "step {i}");
        }
        assert!(seen.iter().filter(|t| t.is_empty()).count() >= 3);
    }

    #[test]
    fn cycle_length_matches_timing_table() {
        // "ab": 2 * 70 type, 1200 hold, 2 * 30 delete, 400 hold = 1800 ms.
        let mut writer = Typewriter::new(["ab", "c"]);
        writer.advance(ms(1799));
        assert_eq!(writer.phrase_index(), 0);
        writer.advance(ms(1));
        assert_eq!(writer.phrase_index(), 1);
        assert_eq!(writer.text(), "");
    }

    #[test]
    fn multibyte_phrases_are_cut_on_char_boundaries() {
        let mut writer = Typewriter::new(["héllo wörld ✓"]);
        for _ in 0..13 {
            writer.advance(ms(70));
            assert!(writer.text().chars().count() <= 13);
        }
        assert_eq!(writer.text(), "héllo wörld ✓");
    }

    #[test]
    fn empty_phrase_list_shows_nothing() {
        let mut writer = Typewriter::new(Vec::<String>::new());
        assert!(!writer.advance(ms(10_000)));
        assert_eq!(writer.text(), "");
    }
}
