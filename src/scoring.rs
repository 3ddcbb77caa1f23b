//! Credit and streak arithmetic for answer scoring.
//!
//! Pure transforms over (credits, streak); the engine composes these with
//! progress updates and session accounting.

use serde::{Deserialize, Serialize};

/// Streak milestones and their bonus payouts. Intermediate values pay
/// nothing.
const STREAK_BONUSES: &[(u32, u64)] = &[(3, 2), (5, 3), (7, 5), (10, 10)];

pub fn streak_bonus(streak: u32) -> u64 {
    STREAK_BONUSES
        .iter()
        .find(|(milestone, _)| *milestone == streak)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Quiz,
    Scramble,
    Hangman,
    Match,
}

impl GameType {
    pub fn multiplier(self) -> u64 {
        match self {
            GameType::Quiz => 1,
            GameType::Scramble => 2,
            GameType::Hangman => 3,
            GameType::Match => 2,
        }
    }
}

/// Quiz difficulty levels 1-4; higher levels pay more per correct answer.
pub fn level_multiplier(level: u8) -> u64 {
    match level {
        1 => 1,
        2 => 2,
        3 => 3,
        4 => 5,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreInput {
    pub correct: bool,
    pub multiplier: u64,
    pub double_or_nothing: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    pub credits: u64,
    pub streak: u32,
    /// Amount reported to the learner; for a won wager this is the stake.
    pub earned: u64,
    /// Milestone bonus included in `earned`, for the bonus popup.
    pub streak_bonus: u64,
}

/// Applies one answer to the credit/streak state.
///
/// Wager answers double or zero the balance and bypass the streak bonus;
/// normal correct answers earn the multiplier plus any milestone bonus. Any
/// wrong answer resets the streak.
pub fn apply_score(credits: u64, streak: u32, input: ScoreInput) -> ScoreOutcome {
    if !input.correct {
        return ScoreOutcome {
            credits: if input.double_or_nothing { 0 } else { credits },
            streak: 0,
            earned: 0,
            streak_bonus: 0,
        };
    }

    let new_streak = streak + 1;

    if input.double_or_nothing {
        return ScoreOutcome {
            credits: credits * 2,
            streak: new_streak,
            earned: credits,
            streak_bonus: 0,
        };
    }

    let bonus = streak_bonus(new_streak);
    ScoreOutcome {
        credits: credits + input.multiplier + bonus,
        streak: new_streak,
        earned: input.multiplier + bonus,
        streak_bonus: bonus,
    }
}
