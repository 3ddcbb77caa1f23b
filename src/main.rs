//! Self-play simulation: drives the engine through a full practice session
//! without a UI. Useful for eyeballing selection bias, credit flow, and the
//! session summary in the logs.

use std::sync::Arc;

use rand::Rng;

use instalearn::challenge::{ChallengePayload, QuizLevel};
use instalearn::config::EngineConfig;
use instalearn::engine::{GameSelection, HangmanTurn, MatchTurn};
use instalearn::games::matchpairs::CardSide;
use instalearn::logging;
use instalearn::storage::{JsonFileStore, StoragePair};
use instalearn::LearningEngine;

fn main() {
    let _guard = logging::init_tracing(
        &std::env::var("INSTALEARN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
    );

    let config = EngineConfig::from_env();
    let storage = if std::env::var("INSTALEARN_PERSIST").as_deref() == Ok("1") {
        StoragePair {
            synced: Arc::new(JsonFileStore::in_data_dir("synced")),
            local: Arc::new(JsonFileStore::in_data_dir("local")),
        }
    } else {
        StoragePair::in_memory()
    };

    let mut engine = LearningEngine::load(config, storage);
    let mut rng = rand::rng();

    let rounds = [
        GameSelection::Quiz(QuizLevel::MultipleChoice),
        GameSelection::Quiz(QuizLevel::TypeWithHints),
        GameSelection::Quiz(QuizLevel::Reverse),
        GameSelection::Quiz(QuizLevel::SpeedRound),
        GameSelection::Scramble,
        GameSelection::Hangman,
        GameSelection::Match,
    ];

    for round in 0..21 {
        let selection = rounds[round % rounds.len()];
        let result = play_round(&mut engine, selection, &mut rng);
        match result {
            Some(result) => tracing::info!(
                round,
                correct = result.correct,
                earned = result.earned_credits,
                credits = result.credits,
                streak = result.streak,
                leveled_up = result.leveled_up,
                "round finished"
            ),
            None => tracing::warn!(round, "round produced no result"),
        }
    }

    if let Some(record) = engine.end_session() {
        tracing::info!(
            correct = record.correct,
            wrong = record.wrong,
            accuracy = record.accuracy,
            credits_earned = record.credits_earned,
            best_streak = record.best_streak,
            "session saved"
        );
    }

    let summary = engine.progress_summary();
    tracing::info!(
        fresh = summary.fresh,
        in_progress = summary.in_progress,
        mastered = summary.mastered,
        "mastery breakdown"
    );
}

fn play_round<R: Rng>(
    engine: &mut LearningEngine,
    selection: GameSelection,
    rng: &mut R,
) -> Option<instalearn::AnswerResult> {
    let challenge = match engine.start_challenge(selection, rng) {
        Ok(c) => c,
        Err(err) => {
            tracing::error!(error = %err, "could not start challenge");
            return None;
        }
    };
    let answer = challenge.answer.clone();
    let is_hangman = matches!(challenge.payload, ChallengePayload::Hangman(_));
    let is_match = matches!(challenge.payload, ChallengePayload::MatchPairs(_));

    if is_hangman {
        return play_hangman(engine, &answer);
    }
    if is_match {
        return play_match(engine);
    }

    // Answer correctly three times out of four.
    let input = if rng.random::<f64>() < 0.75 {
        answer
    } else {
        "???".to_string()
    };
    engine.submit_text(&input).ok().flatten()
}

fn play_hangman(engine: &mut LearningEngine, answer: &str) -> Option<instalearn::AnswerResult> {
    let mut letters: Vec<char> = answer.to_lowercase().chars().filter(|c| c.is_alphabetic()).collect();
    letters.dedup();
    for letter in letters {
        match engine.hangman_guess(letter) {
            Ok(HangmanTurn::Finished(result)) => return Some(result),
            Ok(HangmanTurn::Ongoing { .. }) => {}
            Err(err) => {
                tracing::error!(error = %err, "hangman guess failed");
                return None;
            }
        }
    }
    None
}

fn play_match(engine: &mut LearningEngine) -> Option<instalearn::AnswerResult> {
    loop {
        let (first, second) = {
            let challenge = engine.active_challenge()?;
            let ChallengePayload::MatchPairs(board) = &challenge.payload else {
                return None;
            };
            let card = board
                .cards()
                .iter()
                .enumerate()
                .find(|(_, c)| !c.matched && c.side == CardSide::Source)?;
            let partner = board
                .cards()
                .iter()
                .position(|c| !c.matched && c.side == CardSide::Target && c.pair_id == card.1.pair_id)?;
            (card.0, partner)
        };

        engine.match_select(first).ok()?;
        match engine.match_select(second).ok()? {
            MatchTurn::Finished(result) => return Some(result),
            MatchTurn::Ongoing(_) => {}
        }
    }
}
