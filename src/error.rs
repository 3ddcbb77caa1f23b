#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no words available")]
    NoWordsAvailable,
    #[error("no active challenge")]
    NoActiveChallenge,
    #[error("the active challenge is a different game type")]
    GameTypeMismatch,
}
