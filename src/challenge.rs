//! Challenge construction: one quiz or mini-game instance for a selected
//! word.
//!
//! Invariants:
//! - a challenge accepts exactly one answer; the `answered` flag guards
//!   against duplicate submissions from racing UI events
//! - timer-driven mutation (hint reveal, speed-round countdown) must present
//!   the generation number observed at challenge start

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::config::EngineConfig;
use crate::games::hangman::HangmanGame;
use crate::games::matchpairs::MatchBoard;
use crate::games::scramble::scramble_word;
use crate::scoring::{level_multiplier, GameType};
use crate::state::Direction;
use crate::words::{WordEntry, WordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizLevel {
    MultipleChoice,
    TypeWithHints,
    Reverse,
    SpeedRound,
}

impl QuizLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(QuizLevel::MultipleChoice),
            2 => Some(QuizLevel::TypeWithHints),
            3 => Some(QuizLevel::Reverse),
            4 => Some(QuizLevel::SpeedRound),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            QuizLevel::MultipleChoice => 1,
            QuizLevel::TypeWithHints => 2,
            QuizLevel::Reverse => 3,
            QuizLevel::SpeedRound => 4,
        }
    }

    pub fn multiplier(self) -> u64 {
        level_multiplier(self.number())
    }
}

/// Progressive reveal of the answer for the type-with-hints level. Reveals
/// stop once the configured ratio of characters is exposed.
#[derive(Debug, Clone)]
pub struct HintState {
    chars: Vec<char>,
    revealed: Vec<bool>,
    max_reveals: usize,
}

impl HintState {
    pub fn new(answer: &str, reveal_ratio: f64) -> Self {
        let chars: Vec<char> = answer.chars().collect();
        let max_reveals = (chars.len() as f64 * reveal_ratio).floor() as usize;
        let revealed = vec![false; chars.len()];
        Self {
            chars,
            revealed,
            max_reveals,
        }
    }

    pub fn reveals_left(&self) -> usize {
        self.max_reveals
            .saturating_sub(self.revealed.iter().filter(|r| **r).count())
    }

    /// Exposes one more character position, chosen at random among those
    /// still hidden. Returns `None` once the reveal budget is spent.
    pub fn reveal_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.reveals_left() == 0 {
            return None;
        }
        let hidden: Vec<usize> = self
            .revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| !**r)
            .map(|(i, _)| i)
            .collect();
        let pos = *hidden.choose(rng)?;
        self.revealed[pos] = true;
        Some(self.masked())
    }

    pub fn masked(&self) -> String {
        self.chars
            .iter()
            .zip(&self.revealed)
            .map(|(ch, shown)| if *shown { *ch } else { '_' })
            .collect()
    }
}

/// Speed-round countdown, decremented once per second by the presentation
/// timer. At zero the challenge is auto-scored as incorrect.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    remaining: u8,
}

impl Countdown {
    pub fn new(seconds: u8) -> Self {
        Self { remaining: seconds }
    }

    pub fn tick(&mut self) -> u8 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone)]
pub enum ChallengePayload {
    MultipleChoice { options: Vec<String> },
    TypeWithHints { hints: HintState },
    Reverse,
    SpeedRound { countdown: Countdown },
    Scramble { scrambled: String },
    Hangman(HangmanGame),
    MatchPairs(MatchBoard),
}

/// One quiz instance. Created by the generator, consumed by answer
/// submission, and torn down when superseded.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Absent only for match-pairs, which exercises several words at once.
    pub word: Option<WordEntry>,
    pub word_index: Option<usize>,
    pub direction: Direction,
    pub question: String,
    pub answer: String,
    pub game_type: GameType,
    pub quiz_level: Option<QuizLevel>,
    pub multiplier: u64,
    pub payload: ChallengePayload,
    pub(crate) answered: bool,
    pub(crate) generation: u64,
}

impl Challenge {
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn word_id(&self) -> Option<&str> {
        self.word.as_ref().map(|w| w.id.as_str())
    }
}

/// Trim + case-insensitive comparison, as every typed game checks input.
pub fn check_answer(input: &str, answer: &str) -> bool {
    input.trim().to_lowercase() == answer.to_lowercase()
}

/// Distractor options for multiple choice: target-language texts of other
/// words, excluding the answer case-insensitively. Words of the same kind
/// are preferred; when that pool is thin (< 4 candidates) the full list is
/// used instead.
pub fn generate_distractors<R: Rng + ?Sized>(
    words: &[WordEntry],
    answer: &str,
    direction: Direction,
    kind: WordKind,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let answer_lower = answer.to_lowercase();
    let candidates = |same_kind_only: bool| -> Vec<String> {
        words
            .iter()
            .filter(|w| !same_kind_only || w.kind == kind)
            .map(|w| w.target_text(direction).to_string())
            .filter(|text| text.to_lowercase() != answer_lower)
            .collect()
    };

    let mut pool = candidates(true);
    if pool.len() < 4 {
        pool = candidates(false);
    }
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

pub(crate) fn build_quiz<R: Rng + ?Sized>(
    words: &[WordEntry],
    word: &WordEntry,
    word_index: usize,
    direction: Direction,
    level: QuizLevel,
    config: &EngineConfig,
    generation: u64,
    rng: &mut R,
) -> Challenge {
    // The reverse level flips the practiced direction outright; it exists to
    // force production in the untrained direction.
    let effective = match level {
        QuizLevel::Reverse => direction.flipped(),
        _ => direction,
    };
    let question = word.source_text(effective).to_string();
    let answer = word.target_text(effective).to_string();

    let payload = match level {
        QuizLevel::MultipleChoice => {
            let distractors = generate_distractors(
                words,
                &answer,
                effective,
                word.kind,
                config.games.distractor_count,
                rng,
            );
            let mut options = distractors;
            options.push(answer.clone());
            options.shuffle(rng);
            ChallengePayload::MultipleChoice { options }
        }
        QuizLevel::TypeWithHints => ChallengePayload::TypeWithHints {
            hints: HintState::new(&answer, config.timers.hint_reveal_ratio),
        },
        QuizLevel::Reverse => ChallengePayload::Reverse,
        QuizLevel::SpeedRound => ChallengePayload::SpeedRound {
            countdown: Countdown::new(config.timers.speed_round_seconds),
        },
    };

    Challenge {
        word: Some(word.clone()),
        word_index: Some(word_index),
        direction: effective,
        question,
        answer,
        game_type: GameType::Quiz,
        quiz_level: Some(level),
        multiplier: level.multiplier(),
        payload,
        answered: false,
        generation,
    }
}

pub(crate) fn build_scramble<R: Rng + ?Sized>(
    word: &WordEntry,
    word_index: usize,
    direction: Direction,
    config: &EngineConfig,
    generation: u64,
    rng: &mut R,
) -> Challenge {
    let question = word.source_text(direction).to_string();
    let answer = word.target_text(direction).to_string();
    let scrambled = scramble_word(&answer, config.games.scramble_max_attempts, rng);

    Challenge {
        word: Some(word.clone()),
        word_index: Some(word_index),
        direction,
        question,
        answer,
        game_type: GameType::Scramble,
        quiz_level: None,
        multiplier: GameType::Scramble.multiplier(),
        payload: ChallengePayload::Scramble { scrambled },
        answered: false,
        generation,
    }
}

pub(crate) fn build_hangman(
    word: &WordEntry,
    word_index: usize,
    direction: Direction,
    config: &EngineConfig,
    generation: u64,
) -> Challenge {
    let question = word.source_text(direction).to_string();
    let answer = word.target_text(direction).to_string();
    let game = HangmanGame::new(&answer, config.games.hangman_max_wrong);

    Challenge {
        word: Some(word.clone()),
        word_index: Some(word_index),
        direction,
        question,
        answer,
        game_type: GameType::Hangman,
        quiz_level: None,
        multiplier: GameType::Hangman.multiplier(),
        payload: ChallengePayload::Hangman(game),
        answered: false,
        generation,
    }
}

pub(crate) fn build_match<R: Rng + ?Sized>(
    words: &[WordEntry],
    direction: Direction,
    config: &EngineConfig,
    generation: u64,
    rng: &mut R,
) -> Challenge {
    let board = MatchBoard::new(words, config.games.match_pair_count, rng);

    Challenge {
        word: None,
        word_index: None,
        direction,
        question: "Match the pairs".to_string(),
        answer: "All matched!".to_string(),
        game_type: GameType::Match,
        quiz_level: None,
        multiplier: GameType::Match.multiplier(),
        payload: ChallengePayload::MatchPairs(board),
        answered: false,
        generation,
    }
}
