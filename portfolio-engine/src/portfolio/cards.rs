use bevy::prelude::*;
use constants::portfolio::VISIBLE_TAG_COUNT;

/// Trailing chip after a card's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagChip {
    None,
    /// `+N` hidden tags; clicking expands the card.
    More(usize),
    ShowLess,
}

/// How many of `total` tags to show and which chip follows them.
pub fn tag_layout(total: usize, expanded: bool) -> (usize, TagChip) {
    if total <= VISIBLE_TAG_COUNT {
        (total, TagChip::None)
    } else if expanded {
        (total, TagChip::ShowLess)
    } else {
        (VISIBLE_TAG_COUNT, TagChip::More(total - VISIBLE_TAG_COUNT))
    }
}

/// Index of the one extracurricular card whose tags are expanded.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedCard(pub Option<usize>);

impl ExpandedCard {
    pub fn is_expanded(&self, card: usize) -> bool {
        self.0 == Some(card)
    }

    pub fn toggle(&mut self, card: usize) {
        self.0 = if self.is_expanded(card) {
            None
        } else {
            Some(card)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tag_lists_have_no_chip() {
        assert_eq!(tag_layout(0, false), (0, TagChip::None));
        assert_eq!(tag_layout(5, false), (5, TagChip::None));
        assert_eq!(tag_layout(5, true), (5, TagChip::None));
    }

    #[test]
    fn long_tag_lists_collapse_behind_a_counter() {
        assert_eq!(tag_layout(8, false), (5, TagChip::More(3)));
        assert_eq!(tag_layout(8, true), (8, TagChip::ShowLess));
    }

    #[test]
    fn one_card_expanded_at_a_time() {
        let mut expanded = ExpandedCard::default();
        expanded.toggle(0);
        assert!(expanded.is_expanded(0));
        expanded.toggle(1);
        assert!(expanded.is_expanded(1));
        assert!(!expanded.is_expanded(0));
        expanded.toggle(1);
        assert_eq!(expanded, ExpandedCard(None));
    }
}
