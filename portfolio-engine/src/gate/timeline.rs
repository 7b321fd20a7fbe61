use std::time::Duration;

use constants::gate::{BLACKOUT_ON_MS, FLICKER_SCHEDULE_MS, REVEAL_AT_MS, STRIPS_ON_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCue {
    /// Black strips start falling in and stay; loading dots show.
    StripsOn,
    FlickerOn,
    FlickerOff,
    BlackoutOn,
    /// The gate hands off to the portfolio.
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: Duration,
    pub cue: OverlayCue,
}

/// Which overlays are showing at a given moment of the transition.
/// Drawing order is fixed: strips below flicker below blackout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayFlags {
    pub strips: bool,
    pub loading: bool,
    pub flicker: bool,
    pub blackout: bool,
}

impl OverlayFlags {
    pub fn apply(&mut self, cue: OverlayCue) {
        match cue {
            OverlayCue::StripsOn => {
                self.strips = true;
                self.loading = true;
            }
            OverlayCue::FlickerOn => self.flicker = true,
            OverlayCue::FlickerOff => self.flicker = false,
            OverlayCue::BlackoutOn => self.blackout = true,
            OverlayCue::Reveal => {}
        }
    }
}

/// The single table of transition cues, sorted by offset.
#[derive(Debug, Clone)]
pub struct TransitionTimeline {
    entries: Vec<TimelineEntry>,
}

impl Default for TransitionTimeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransitionTimeline {
    pub fn standard() -> Self {
        let mut entries = vec![
            TimelineEntry {
                at: Duration::from_millis(STRIPS_ON_MS),
                cue: OverlayCue::StripsOn,
            },
            TimelineEntry {
                at: Duration::from_millis(BLACKOUT_ON_MS),
                cue: OverlayCue::BlackoutOn,
            },
            TimelineEntry {
                at: Duration::from_millis(REVEAL_AT_MS),
                cue: OverlayCue::Reveal,
            },
        ];
        entries.extend(FLICKER_SCHEDULE_MS.iter().map(|&(at, on)| TimelineEntry {
            at: Duration::from_millis(at),
            cue: if on {
                OverlayCue::FlickerOn
            } else {
                OverlayCue::FlickerOff
            },
        }));

        Self::from_entries(entries)
    }

    /// Entries sharing an offset keep their given relative order.
    pub fn from_entries(mut entries: Vec<TimelineEntry>) -> Self {
        entries.sort_by_key(|entry| entry.at);
        Self { entries }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Offset of the reveal cue, or of the last cue when there is none.
    pub fn reveal_at(&self) -> Duration {
        self.entries
            .iter()
            .find(|entry| entry.cue == OverlayCue::Reveal)
            .or(self.entries.last())
            .map(|entry| entry.at)
            .unwrap_or_default()
    }

    /// Cues with `after < at <= until`; `after = None` includes offset zero.
    pub fn cues_between(
        &self,
        after: Option<Duration>,
        until: Duration,
    ) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter().filter(move |entry| {
            after.is_none_or(|after| entry.at > after) && entry.at <= until
        })
    }

    pub fn flags_at(&self, elapsed: Duration) -> OverlayFlags {
        let mut flags = OverlayFlags::default();
        for entry in self.cues_between(None, elapsed) {
            flags.apply(entry.cue);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn standard_table_is_sorted_and_ends_with_reveal() {
        let timeline = TransitionTimeline::standard();
        let offsets: Vec<Duration> = timeline.entries().iter().map(|e| e.at).collect();
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(timeline.entries().len(), 9);
        assert_eq!(
            timeline.entries().last().map(|e| e.cue),
            Some(OverlayCue::Reveal)
        );
        assert_eq!(timeline.reveal_at(), ms(2100));
    }

    #[test]
    fn flags_follow_the_cue_table() {
        let timeline = TransitionTimeline::standard();

        let start = timeline.flags_at(ms(0));
        assert!(start.strips && start.loading);
        assert!(!start.flicker && !start.blackout);

        assert!(!timeline.flags_at(ms(499)).flicker);
        assert!(timeline.flags_at(ms(500)).flicker);
        assert!(!timeline.flags_at(ms(800)).flicker);
        assert!(timeline.flags_at(ms(1000)).flicker);
        assert!(!timeline.flags_at(ms(1300)).flicker);
        assert!(timeline.flags_at(ms(1500)).flicker);

        let late = timeline.flags_at(ms(1750));
        assert!(late.flicker && late.blackout && late.strips);
        let final_flags = timeline.flags_at(ms(1800));
        assert!(!final_flags.flicker && final_flags.blackout);
    }

    #[test]
    fn cue_windows_do_not_overlap() {
        let timeline = TransitionTimeline::standard();
        let mut fired = Vec::new();
        let mut previous = None;
        let mut elapsed = Duration::ZERO;
        while elapsed <= ms(2200) {
            fired.extend(timeline.cues_between(previous, elapsed).map(|e| e.cue));
            previous = Some(elapsed);
            elapsed += ms(33);
        }
        let expected: Vec<OverlayCue> = timeline.entries().iter().map(|e| e.cue).collect();
        assert_eq!(fired, expected);
    }

    #[test]
    fn equal_offsets_keep_insertion_order() {
        let timeline = TransitionTimeline::from_entries(vec![
            TimelineEntry {
                at: ms(10),
                cue: OverlayCue::BlackoutOn,
            },
            TimelineEntry {
                at: ms(0),
                cue: OverlayCue::FlickerOn,
            },
            TimelineEntry {
                at: ms(10),
                cue: OverlayCue::FlickerOff,
            },
        ]);
        let cues: Vec<OverlayCue> = timeline.entries().iter().map(|e| e.cue).collect();
        assert_eq!(
            cues,
            vec![
                OverlayCue::FlickerOn,
                OverlayCue::BlackoutOn,
                OverlayCue::FlickerOff
            ]
        );
        // No explicit reveal: the last cue's offset stands in.
        assert_eq!(timeline.reveal_at(), ms(10));
    }
}
