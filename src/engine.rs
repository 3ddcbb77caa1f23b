//! The learning engine: glue between word store, selector, challenge
//! generator, scoring, progress and session accounting, over a key-value
//! storage pair.
//!
//! All methods run synchronously to completion. Persistence writes are
//! fire-and-forget: a failed write is logged and the in-memory state stays
//! authoritative — the learner is never blocked by a storage hiccup.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use serde_json::json;

use crate::challenge::{
    build_hangman, build_match, build_quiz, build_scramble, check_answer, Challenge,
    ChallengePayload, QuizLevel,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::games::hangman::GuessOutcome;
use crate::games::matchpairs::SelectOutcome;
use crate::import::{import_words, ImportError, ImportReport};
use crate::progress::{self, ProgressMap, ProgressSummary};
use crate::scoring::{apply_score, ScoreInput};
use crate::selector::pick_word;
use crate::session::{self, SessionRecord, SessionStats, SessionTotals};
use crate::state::{CorrectAction, DirectionSetting, GlobalState};
use crate::storage::{keys, KvMap, StoragePair};
use crate::words::{WordEntry, WordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSelection {
    Quiz(QuizLevel),
    Scramble,
    Hangman,
    Match,
}

/// Outcome of one answered challenge, handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub correct: bool,
    pub answer: String,
    pub earned_credits: u64,
    pub was_double_or_nothing: bool,
    pub credits: u64,
    pub streak: u32,
    pub leveled_up: bool,
    pub new_level: u8,
}

/// Capability to drive the active challenge's timers. Minted at challenge
/// start; a token from a superseded challenge no longer matches the
/// generation counter and every tick through it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeToken {
    generation: u64,
}

#[derive(Debug, Clone)]
pub enum CountdownTick {
    /// Timer no longer belongs to the active challenge.
    Stale,
    Remaining(u8),
    /// The countdown hit zero; the challenge was auto-scored as incorrect.
    Expired(AnswerResult),
}

#[derive(Debug, Clone)]
pub enum HangmanTurn {
    Ongoing { outcome: GuessOutcome, masked: String, lives_left: u8 },
    Finished(AnswerResult),
}

#[derive(Debug, Clone)]
pub enum MatchTurn {
    Ongoing(SelectOutcome),
    Finished(AnswerResult),
}

pub struct LearningEngine {
    config: EngineConfig,
    storage: StoragePair,
    words: WordStore,
    progress: ProgressMap,
    state: GlobalState,
    session: SessionStats,
    active: Option<Challenge>,
    double_or_nothing: bool,
    generation: u64,
}

impl LearningEngine {
    /// Loads persisted state from both namespaces, falling back to defaults
    /// per key. A broken store never prevents startup.
    pub fn load(config: EngineConfig, storage: StoragePair) -> Self {
        let synced = storage
            .synced
            .get(&[keys::DIRECTION, keys::CORRECT_ACTION, keys::CREDITS, keys::STREAK])
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to read synced state, using defaults");
                KvMap::new()
            });
        let local = storage
            .local
            .get(&[keys::WORD_PROGRESS, keys::CUSTOM_WORDS])
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to read local state, using defaults");
                KvMap::new()
            });

        let state = GlobalState {
            credits: synced
                .get(keys::CREDITS)
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            streak: synced
                .get(keys::STREAK)
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            direction: synced
                .get(keys::DIRECTION)
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
            correct_action: synced
                .get(keys::CORRECT_ACTION)
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        };

        let custom: Vec<WordEntry> = local
            .get(keys::CUSTOM_WORDS)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let words = if custom.is_empty() {
            WordStore::defaults()
        } else {
            WordStore::from_entries(custom)
        };

        let raw_progress: ProgressMap = local
            .get(keys::WORD_PROGRESS)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let progress = progress::migrate_index_keys(raw_progress, &words);

        tracing::info!(
            words = words.len(),
            credits = state.credits,
            streak = state.streak,
            "learning engine loaded"
        );

        Self {
            config,
            storage,
            words,
            progress,
            state,
            session: SessionStats::start(Utc::now()),
            active: None,
            double_or_nothing: false,
            generation: 0,
        }
    }

    // ---- challenge lifecycle ----

    /// Starts a new challenge, superseding any active one (stale timer
    /// tokens die with it).
    pub fn start_challenge<R: Rng + ?Sized>(
        &mut self,
        selection: GameSelection,
        rng: &mut R,
    ) -> Result<&Challenge, EngineError> {
        if self.words.is_empty() {
            return Err(EngineError::NoWordsAvailable);
        }

        self.generation += 1;
        let generation = self.generation;
        let direction = self.state.direction.resolve(rng);

        let challenge = match selection {
            GameSelection::Quiz(level) => {
                let (word, index) = pick_word(self.words.entries(), &self.progress, rng)
                    .ok_or(EngineError::NoWordsAvailable)?;
                let word = word.clone();
                build_quiz(
                    self.words.entries(),
                    &word,
                    index,
                    direction,
                    level,
                    &self.config,
                    generation,
                    rng,
                )
            }
            GameSelection::Scramble => {
                let (word, index) = pick_word(self.words.entries(), &self.progress, rng)
                    .ok_or(EngineError::NoWordsAvailable)?;
                let word = word.clone();
                build_scramble(&word, index, direction, &self.config, generation, rng)
            }
            GameSelection::Hangman => {
                let (word, index) = pick_word(self.words.entries(), &self.progress, rng)
                    .ok_or(EngineError::NoWordsAvailable)?;
                let word = word.clone();
                build_hangman(&word, index, direction, &self.config, generation)
            }
            GameSelection::Match => build_match(
                self.words.entries(),
                direction,
                &self.config,
                generation,
                rng,
            ),
        };

        Ok(self.active.insert(challenge))
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.active.as_ref()
    }

    pub fn abandon_challenge(&mut self) {
        self.active = None;
        self.generation += 1;
    }

    /// Checks a typed answer against the active challenge. Returns `None`
    /// when the challenge was already answered (duplicate submissions are a
    /// guarded no-op).
    pub fn submit_text(&mut self, input: &str) -> Result<Option<AnswerResult>, EngineError> {
        let challenge = self.active.as_ref().ok_or(EngineError::NoActiveChallenge)?;
        let correct = check_answer(input, &challenge.answer);
        Ok(self.complete(correct))
    }

    /// Scores a multiple-choice pick.
    pub fn submit_option(&mut self, option: &str) -> Result<Option<AnswerResult>, EngineError> {
        self.submit_text(option)
    }

    /// Plays one hangman letter; the round resolves itself on win or loss.
    pub fn hangman_guess(&mut self, letter: char) -> Result<HangmanTurn, EngineError> {
        let (outcome, masked, lives_left) = {
            let challenge = self.active.as_mut().ok_or(EngineError::NoActiveChallenge)?;
            let ChallengePayload::Hangman(game) = &mut challenge.payload else {
                return Err(EngineError::GameTypeMismatch);
            };
            let outcome = game.guess(letter);
            (outcome, game.masked(), game.lives_left())
        };

        match outcome {
            GuessOutcome::Won => self
                .complete(true)
                .map(HangmanTurn::Finished)
                .ok_or(EngineError::NoActiveChallenge),
            GuessOutcome::Lost => self
                .complete(false)
                .map(HangmanTurn::Finished)
                .ok_or(EngineError::NoActiveChallenge),
            outcome => Ok(HangmanTurn::Ongoing { outcome, masked, lives_left }),
        }
    }

    /// Flips one match-pairs card; the round resolves when the board clears.
    pub fn match_select(&mut self, card_index: usize) -> Result<MatchTurn, EngineError> {
        let outcome = {
            let challenge = self.active.as_mut().ok_or(EngineError::NoActiveChallenge)?;
            let ChallengePayload::MatchPairs(board) = &mut challenge.payload else {
                return Err(EngineError::GameTypeMismatch);
            };
            board.select(card_index)
        };

        match outcome {
            SelectOutcome::Completed => self
                .complete(true)
                .map(MatchTurn::Finished)
                .ok_or(EngineError::NoActiveChallenge),
            outcome => Ok(MatchTurn::Ongoing(outcome)),
        }
    }

    // ---- timers ----

    pub fn timer_token(&self) -> Option<ChallengeToken> {
        self.active.as_ref().map(|c| ChallengeToken {
            generation: c.generation,
        })
    }

    /// Reveals one more hint character. `None` when the token is stale, the
    /// active game has no hints, or the reveal budget is spent.
    pub fn hint_tick<R: Rng + ?Sized>(
        &mut self,
        token: ChallengeToken,
        rng: &mut R,
    ) -> Option<String> {
        let challenge = self.active.as_mut()?;
        if challenge.generation != token.generation || challenge.answered {
            return None;
        }
        let ChallengePayload::TypeWithHints { hints } = &mut challenge.payload else {
            return None;
        };
        hints.reveal_one(rng)
    }

    /// Advances the speed-round countdown; at zero the challenge is
    /// auto-scored as incorrect with the correct answer for display.
    pub fn countdown_tick(&mut self, token: ChallengeToken) -> CountdownTick {
        {
            let Some(challenge) = self.active.as_mut() else {
                return CountdownTick::Stale;
            };
            if challenge.generation != token.generation || challenge.answered {
                return CountdownTick::Stale;
            }
            let ChallengePayload::SpeedRound { countdown } = &mut challenge.payload else {
                return CountdownTick::Stale;
            };
            let remaining = countdown.tick();
            if remaining > 0 {
                return CountdownTick::Remaining(remaining);
            }
        }

        match self.complete(false) {
            Some(result) => CountdownTick::Expired(result),
            None => CountdownTick::Stale,
        }
    }

    // ---- scoring core ----

    fn complete(&mut self, correct: bool) -> Option<AnswerResult> {
        let challenge = self.active.as_mut()?;
        if challenge.answered {
            return None;
        }
        challenge.answered = true;

        let answer = challenge.answer.clone();
        let multiplier = challenge.multiplier;
        let word_id = challenge.word_id().map(str::to_string);

        // One-shot: the wager flag is consumed whatever the outcome.
        let wager = std::mem::replace(&mut self.double_or_nothing, false);

        let outcome = apply_score(
            self.state.credits,
            self.state.streak,
            ScoreInput {
                correct,
                multiplier,
                double_or_nothing: wager,
            },
        );
        self.state.credits = outcome.credits;
        self.state.streak = outcome.streak;
        self.session.record_answer(correct, outcome.earned, outcome.streak);

        let (leveled_up, new_level) = match word_id.as_deref() {
            Some(id) => {
                let update = progress::apply_answer(
                    &mut self.progress,
                    id,
                    correct,
                    self.config.decrement_level_on_wrong,
                );
                (update.leveled_up, update.new_level)
            }
            // Match-pairs exercises several words at once; no single word
            // gets the credit.
            None => (false, 0),
        };

        self.flush_progress();
        self.flush_state();

        Some(AnswerResult {
            correct,
            answer,
            earned_credits: outcome.earned,
            was_double_or_nothing: wager,
            credits: outcome.credits,
            streak: outcome.streak,
            leveled_up,
            new_level,
        })
    }

    // ---- credits & wager ----

    pub fn credits(&self) -> u64 {
        self.state.credits
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    /// Arms the double-or-nothing wager for the next answer. Only offerable
    /// with at least 2 credits at stake.
    pub fn arm_double_or_nothing(&mut self) -> bool {
        if self.state.credits >= 2 {
            self.double_or_nothing = true;
        }
        self.double_or_nothing
    }

    pub fn double_or_nothing_armed(&self) -> bool {
        self.double_or_nothing
    }

    /// Spends one credit to keep browsing. Returns false on an empty
    /// balance, which the caller treats as "time for a quiz".
    pub fn spend_credit(&mut self) -> bool {
        if self.state.credits == 0 {
            return false;
        }
        self.state.credits -= 1;
        self.flush_state();
        true
    }

    // ---- settings ----

    pub fn direction(&self) -> DirectionSetting {
        self.state.direction
    }

    pub fn correct_action(&self) -> CorrectAction {
        self.state.correct_action
    }

    pub fn set_direction(&mut self, direction: DirectionSetting) {
        self.state.direction = direction;
        self.flush_settings();
    }

    pub fn set_correct_action(&mut self, action: CorrectAction) {
        self.state.correct_action = action;
        self.flush_settings();
    }

    // ---- word management ----

    pub fn words(&self) -> &WordStore {
        &self.words
    }

    pub fn progress_fraction(&self, word_id: &str) -> f64 {
        progress::progress_fraction(self.progress.get(word_id))
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        progress::summarize(&self.words, &self.progress)
    }

    /// Replaces the word list and resets all learning progress, as a custom
    /// import does.
    pub fn set_custom_words(&mut self, entries: Vec<WordEntry>) {
        self.words = WordStore::from_entries(entries);
        self.progress.clear();
        self.abandon_challenge();
        self.flush_words();
        self.flush_progress();
        tracing::info!(words = self.words.len(), "custom word list installed");
    }

    /// Clears the custom list, returning to the built-in vocabulary.
    pub fn reset_words(&mut self) {
        self.words = WordStore::defaults();
        self.progress.clear();
        self.abandon_challenge();
        self.set_local(json!([]), json!({}));
        tracing::info!("word list reset to defaults");
    }

    pub fn reset_progress(&mut self) {
        self.progress.clear();
        self.flush_progress();
    }

    /// Imports a CSV document. The list is only replaced when at least one
    /// row was accepted.
    pub fn import_csv(&mut self, text: &str) -> Result<ImportReport, ImportError> {
        let (entries, report) = import_words(text)?;
        if report.accepted > 0 {
            self.set_custom_words(entries);
        }
        Ok(report)
    }

    // ---- session ----

    pub fn session_stats(&self) -> &SessionStats {
        &self.session
    }

    /// Finalizes the running session: when any answers were recorded, a
    /// record is appended to the capped history and the counters restart.
    /// With nothing recorded this is a silent no-op.
    pub fn end_session(&mut self) -> Option<SessionRecord> {
        let now = Utc::now();
        let record = self.session.finish(now)?;

        let mut log = self.session_log();
        session::push_record(&mut log, record.clone(), self.config.session_log_cap);
        match serde_json::to_value(&log) {
            Ok(value) => self.write_local(keys::SESSIONS, value),
            Err(err) => tracing::warn!(error = %err, "failed to serialize session log"),
        }

        self.session = SessionStats::start(now);
        Some(record)
    }

    pub fn session_log(&self) -> Vec<SessionRecord> {
        self.storage
            .local
            .get(&[keys::SESSIONS])
            .ok()
            .and_then(|mut map| map.remove(keys::SESSIONS))
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn session_totals(&self) -> SessionTotals {
        session::totals(&self.session_log())
    }

    // ---- persistence (best-effort) ----

    fn flush_state(&self) {
        let entries = KvMap::from([
            (keys::CREDITS.to_string(), json!(self.state.credits)),
            (keys::STREAK.to_string(), json!(self.state.streak)),
        ]);
        if let Err(err) = self.storage.synced.set(entries) {
            tracing::warn!(error = %err, "failed to persist credits/streak");
        }
    }

    fn flush_settings(&self) {
        let entries = KvMap::from([
            (
                keys::DIRECTION.to_string(),
                serde_json::to_value(self.state.direction).unwrap_or(json!(null)),
            ),
            (
                keys::CORRECT_ACTION.to_string(),
                serde_json::to_value(self.state.correct_action).unwrap_or(json!(null)),
            ),
        ]);
        if let Err(err) = self.storage.synced.set(entries) {
            tracing::warn!(error = %err, "failed to persist settings");
        }
    }

    fn flush_progress(&self) {
        match serde_json::to_value(&self.progress) {
            Ok(value) => self.write_local(keys::WORD_PROGRESS, value),
            Err(err) => tracing::warn!(error = %err, "failed to serialize progress"),
        }
    }

    fn flush_words(&self) {
        match serde_json::to_value(self.words.entries()) {
            Ok(value) => self.write_local(keys::CUSTOM_WORDS, value),
            Err(err) => tracing::warn!(error = %err, "failed to serialize word list"),
        }
    }

    fn set_local(&self, custom_words: serde_json::Value, word_progress: serde_json::Value) {
        let entries = KvMap::from([
            (keys::CUSTOM_WORDS.to_string(), custom_words),
            (keys::WORD_PROGRESS.to_string(), word_progress),
        ]);
        if let Err(err) = self.storage.local.set(entries) {
            tracing::warn!(error = %err, "failed to persist local state");
        }
    }

    fn write_local(&self, key: &str, value: serde_json::Value) {
        let entries = KvMap::from([(key.to_string(), value)]);
        if let Err(err) = self.storage.local.set(entries) {
            tracing::warn!(error = %err, key, "failed to persist local key");
        }
    }
}
