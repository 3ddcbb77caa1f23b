//! Letter-guessing state machine.
//!
//! The guessable key set is a-z plus any non-ASCII letters the answer
//! contains. Non-letter positions (spaces, punctuation) count as revealed
//! from the start. Six wrong guesses lose the round.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    Won,
    Lost,
    AlreadyGuessed,
}

#[derive(Debug, Clone)]
pub struct HangmanGame {
    answer: String,
    answer_lower: Vec<char>,
    guessed: BTreeSet<char>,
    wrong: u8,
    max_wrong: u8,
}

impl HangmanGame {
    pub fn new(answer: &str, max_wrong: u8) -> Self {
        Self {
            answer: answer.to_string(),
            answer_lower: answer.to_lowercase().chars().collect(),
            guessed: BTreeSet::new(),
            wrong: 0,
            max_wrong,
        }
    }

    /// The on-screen keyboard: the latin alphabet, then any further letters
    /// of the answer (umlauts, ß, accented vowels) in answer order.
    pub fn keyboard(&self) -> Vec<char> {
        let mut keys: Vec<char> = ('a'..='z').collect();
        for ch in &self.answer_lower {
            if ch.is_alphabetic() && !keys.contains(ch) {
                keys.push(*ch);
            }
        }
        keys
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter
            .to_lowercase()
            .next()
            .unwrap_or(letter);
        if self.is_over() || !self.guessed.insert(letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        if !self.answer_lower.contains(&letter) {
            self.wrong += 1;
            if self.wrong >= self.max_wrong {
                return GuessOutcome::Lost;
            }
            return GuessOutcome::Miss;
        }

        if self.is_won() {
            GuessOutcome::Won
        } else {
            GuessOutcome::Hit
        }
    }

    /// Every letter position covered by a guess; non-letters are always
    /// considered revealed.
    pub fn is_won(&self) -> bool {
        self.answer_lower
            .iter()
            .all(|ch| !ch.is_alphabetic() || self.guessed.contains(ch))
    }

    pub fn is_lost(&self) -> bool {
        self.wrong >= self.max_wrong
    }

    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Space-separated display, original casing, unguessed letters masked.
    pub fn masked(&self) -> String {
        self.answer
            .chars()
            .map(|ch| {
                let lower = ch.to_lowercase().next().unwrap_or(ch);
                if !ch.is_alphabetic() || self.guessed.contains(&lower) {
                    ch.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn wrong_count(&self) -> u8 {
        self.wrong
    }

    pub fn lives_left(&self) -> u8 {
        self.max_wrong.saturating_sub(self.wrong)
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}
