use rand::Rng;
use serde::{Deserialize, Serialize};

/// A concrete quiz direction: which language is shown and which is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    GermanToDutch,
    DutchToGerman,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::GermanToDutch => Direction::DutchToGerman,
            Direction::DutchToGerman => Direction::GermanToDutch,
        }
    }
}

/// The configured direction, which may defer the choice to a per-challenge
/// coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionSetting {
    GermanToDutch,
    DutchToGerman,
    Mixed,
}

impl Default for DirectionSetting {
    fn default() -> Self {
        DirectionSetting::GermanToDutch
    }
}

impl DirectionSetting {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            DirectionSetting::GermanToDutch => Direction::GermanToDutch,
            DirectionSetting::DutchToGerman => Direction::DutchToGerman,
            DirectionSetting::Mixed => {
                if rng.random::<bool>() {
                    Direction::GermanToDutch
                } else {
                    Direction::DutchToGerman
                }
            }
        }
    }
}

/// What happens after a correct answer: advance to the next challenge
/// automatically, or stay on the feedback screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectAction {
    Next,
    Stay,
}

impl Default for CorrectAction {
    fn default() -> Self {
        CorrectAction::Next
    }
}

/// Process-wide learner state, loaded once at engine construction and
/// flushed back to the synced namespace on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalState {
    pub credits: u64,
    pub streak: u32,
    pub direction: DirectionSetting,
    pub correct_action: CorrectAction,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            credits: 0,
            streak: 0,
            direction: DirectionSetting::default(),
            correct_action: CorrectAction::default(),
        }
    }
}
