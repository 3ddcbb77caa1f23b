//! Match-pairs board: up to four random words, one source card and one
//! target card each. A match needs the same pair identity on differing card
//! sides; the round is won when every pair is matched.

use rand::seq::index;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::words::WordEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Source,
    Target,
}

#[derive(Debug, Clone)]
pub struct MatchCard {
    pub text: String,
    pub pair_id: String,
    pub side: CardSide,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First card of an attempt picked up.
    Selected,
    /// Two cards matched; pairs remain.
    Matched,
    /// Two cards matched and the board is cleared.
    Completed,
    /// The cards do not pair up; selection cleared.
    Mismatch,
    /// Out-of-range, already-matched, or re-clicked card.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MatchBoard {
    cards: Vec<MatchCard>,
    selected: Option<usize>,
    matched_pairs: usize,
    target_pairs: usize,
    attempts: u32,
}

impl MatchBoard {
    pub fn new<R: Rng + ?Sized>(words: &[WordEntry], pair_count: usize, rng: &mut R) -> Self {
        let target_pairs = pair_count.min(words.len());
        let mut cards = Vec::with_capacity(target_pairs * 2);

        for idx in index::sample(rng, words.len(), target_pairs) {
            let word = &words[idx];
            cards.push(MatchCard {
                text: word.german.clone(),
                pair_id: word.id.clone(),
                side: CardSide::Source,
                matched: false,
            });
            cards.push(MatchCard {
                text: word.dutch.clone(),
                pair_id: word.id.clone(),
                side: CardSide::Target,
                matched: false,
            });
        }
        cards.shuffle(rng);

        Self {
            cards,
            selected: None,
            matched_pairs: 0,
            target_pairs,
            attempts: 0,
        }
    }

    pub fn select(&mut self, idx: usize) -> SelectOutcome {
        let Some(card) = self.cards.get(idx) else {
            return SelectOutcome::Ignored;
        };
        if card.matched || self.selected == Some(idx) {
            return SelectOutcome::Ignored;
        }

        let Some(prev_idx) = self.selected.take() else {
            self.selected = Some(idx);
            return SelectOutcome::Selected;
        };

        self.attempts += 1;
        let prev = &self.cards[prev_idx];
        let cur = &self.cards[idx];
        if prev.pair_id == cur.pair_id && prev.side != cur.side {
            self.cards[prev_idx].matched = true;
            self.cards[idx].matched = true;
            self.matched_pairs += 1;
            if self.matched_pairs == self.target_pairs {
                SelectOutcome::Completed
            } else {
                SelectOutcome::Matched
            }
        } else {
            SelectOutcome::Mismatch
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.target_pairs
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn target_pairs(&self) -> usize {
        self.target_pairs
    }
}
