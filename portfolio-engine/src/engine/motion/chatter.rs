use constants::scene::{CHATTER_GAP_SPREAD_MS, CHATTER_MIN_GAP_MS, CHATTER_VISIBLE_MS};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatterChange {
    /// Show the line at this index.
    Show(usize),
    Hide,
}

/// Speech bubble scheduler: a random line every few seconds, shown briefly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatterSchedule {
    line_count: usize,
    next_in: f32,
    hide_in: Option<f32>,
}

impl ChatterSchedule {
    pub fn new(line_count: usize, rng: &mut impl Rng) -> Self {
        Self {
            line_count,
            next_in: gap_secs(rng),
            hide_in: None,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.hide_in.is_some()
    }

    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<ChatterChange> {
        let mut changes = Vec::new();

        if let Some(hide_in) = self.hide_in.as_mut() {
            *hide_in -= dt;
            if *hide_in <= 0.0 {
                self.hide_in = None;
                changes.push(ChatterChange::Hide);
            }
        }

        self.next_in -= dt;
        if self.next_in <= 0.0 {
            self.next_in = gap_secs(rng);
            if self.line_count > 0 {
                let line = rng.random_range(0..self.line_count);
                self.hide_in = Some(CHATTER_VISIBLE_MS as f32 / 1000.0);
                changes.push(ChatterChange::Show(line));
            }
        }

        changes
    }
}

fn gap_secs(rng: &mut impl Rng) -> f32 {
    (CHATTER_MIN_GAP_MS as f32 + rng.random::<f32>() * CHATTER_GAP_SPREAD_MS as f32) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn bubbles_alternate_show_and_hide() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut chatter = ChatterSchedule::new(8, &mut rng);
        let mut changes = Vec::new();
        for _ in 0..60 * 60 {
            changes.extend(chatter.step(1.0 / 60.0, &mut rng));
        }

        assert!(changes.len() >= 15);
        assert!(matches!(changes.first(), Some(ChatterChange::Show(_))));
        for pair in changes.windows(2) {
            let alternates = matches!(
                pair,
                [ChatterChange::Show(_), ChatterChange::Hide]
                    | [ChatterChange::Hide, ChatterChange::Show(_)]
            );
            assert!(alternates, "unexpected sequence {pair:?}");
        }
        assert!(changes.iter().all(|c| match c {
            ChatterChange::Show(line) => *line < 8,
            ChatterChange::Hide => true,
        }));
    }

    #[test]
    fn nothing_to_say_without_lines() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut chatter = ChatterSchedule::new(0, &mut rng);
        for _ in 0..600 {
            assert!(chatter.step(0.05, &mut rng).is_empty());
        }
        assert!(!chatter.is_showing());
    }
}
