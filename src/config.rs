use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    pub hint_interval_ms: u64,
    pub hint_reveal_ratio: f64,
    pub speed_round_seconds: u8,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            hint_interval_ms: 2000,
            hint_reveal_ratio: 0.6,
            speed_round_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub scramble_max_attempts: u32,
    pub hangman_max_wrong: u8,
    pub match_pair_count: usize,
    pub distractor_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scramble_max_attempts: 10,
            hangman_max_wrong: 6,
            match_pair_count: 4,
            distractor_count: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub decrement_level_on_wrong: bool,
    pub session_log_cap: usize,
    pub timers: TimerConfig,
    pub games: GameConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decrement_level_on_wrong: true,
            session_log_cap: 50,
            timers: TimerConfig::default(),
            games: GameConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("INSTALEARN_DECREMENT_ON_WRONG") {
            config.decrement_level_on_wrong = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("INSTALEARN_SESSION_LOG_CAP") {
            config.session_log_cap = val.parse().unwrap_or(50);
        }
        if let Ok(val) = std::env::var("INSTALEARN_SPEED_ROUND_SECONDS") {
            config.timers.speed_round_seconds = val.parse().unwrap_or(5);
        }

        config
    }
}
