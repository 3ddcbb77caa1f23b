//! Per-word mastery state and its transition rules.
//!
//! Invariants:
//! - `1 <= level <= 4`
//! - `correct` counts consecutive correct answers at the current level and
//!   resets to 0 whenever `level` changes or an answer is wrong.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::words::WordStore;

pub const MAX_LEVEL: u8 = 4;
pub const CORRECT_PER_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProgress {
    pub level: u8,
    pub correct: u8,
}

impl Default for WordProgress {
    fn default() -> Self {
        Self { level: 1, correct: 0 }
    }
}

pub type ProgressMap = HashMap<String, WordProgress>;

#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub leveled_up: bool,
    pub new_level: u8,
}

/// Applies one answer to a word's mastery state, creating the entry lazily.
///
/// Three consecutive correct answers advance the level (capped at
/// [`MAX_LEVEL`]). A wrong answer clears the streak within the level and,
/// when `decrement_on_wrong` is set, drops the level one step (floor 1).
pub fn apply_answer(
    progress: &mut ProgressMap,
    word_id: &str,
    correct: bool,
    decrement_on_wrong: bool,
) -> ProgressUpdate {
    let entry = progress.entry(word_id.to_string()).or_default();
    let old_level = entry.level;

    if correct {
        entry.correct += 1;
        if entry.correct >= CORRECT_PER_LEVEL && entry.level < MAX_LEVEL {
            entry.level += 1;
            entry.correct = 0;
        }
    } else {
        if decrement_on_wrong && entry.level > 1 {
            entry.level -= 1;
        }
        entry.correct = 0;
    }

    ProgressUpdate {
        leveled_up: entry.level > old_level,
        new_level: entry.level,
    }
}

/// Fraction of the full mastery track completed, for the progress bar:
/// `((level - 1) + correct / 3) / 4`.
pub fn progress_fraction(progress: Option<&WordProgress>) -> f64 {
    let p = progress.copied().unwrap_or_default();
    let raw = ((p.level - 1) as f64 + p.correct as f64 / CORRECT_PER_LEVEL as f64)
        / MAX_LEVEL as f64;
    // At the level cap the in-level count keeps accumulating, so clamp.
    raw.min(1.0)
}

/// Rewrites positional-index progress keys (the legacy identity scheme) to
/// stable word ids. Index keys with no matching word are dropped.
pub fn migrate_index_keys(raw: ProgressMap, words: &WordStore) -> ProgressMap {
    let mut migrated = ProgressMap::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (key, value) in raw {
        if words.by_id(&key).is_some() {
            migrated.insert(key, value);
        } else if let Some(word) = key.parse::<usize>().ok().and_then(|idx| words.get(idx)) {
            migrated.entry(word.id.clone()).or_insert(value);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped unmatched progress keys during migration");
    }
    migrated
}

/// Mastery breakdown over the whole word list, as shown in statistics.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_words: usize,
    pub fresh: usize,
    pub in_progress: usize,
    pub mastered: usize,
    pub level_counts: [usize; MAX_LEVEL as usize],
}

pub fn summarize(words: &WordStore, progress: &ProgressMap) -> ProgressSummary {
    let mut summary = ProgressSummary {
        total_words: words.len(),
        ..Default::default()
    };

    for word in words.entries() {
        let level = progress.get(&word.id).map(|p| p.level).unwrap_or(1);
        summary.level_counts[(level - 1) as usize] += 1;
        match level {
            1 => summary.fresh += 1,
            MAX_LEVEL => summary.mastered += 1,
            _ => summary.in_progress += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordEntry;

    #[test]
    fn three_correct_answers_level_up_and_reset() {
        let mut map = ProgressMap::new();
        for _ in 0..2 {
            let update = apply_answer(&mut map, "w1", true, true);
            assert!(!update.leveled_up);
        }
        let update = apply_answer(&mut map, "w1", true, true);
        assert!(update.leveled_up);
        assert_eq!(update.new_level, 2);
        assert_eq!(map["w1"], WordProgress { level: 2, correct: 0 });
    }

    #[test]
    fn level_never_exceeds_max() {
        let mut map = ProgressMap::new();
        map.insert("w1".to_string(), WordProgress { level: 4, correct: 2 });
        let update = apply_answer(&mut map, "w1", true, true);
        assert!(!update.leveled_up);
        assert_eq!(map["w1"].level, 4);
        assert_eq!(
            map["w1"].correct, 3,
            "at the cap the in-level count keeps accumulating"
        );
    }

    #[test]
    fn wrong_answer_decrements_when_configured() {
        let mut map = ProgressMap::new();
        map.insert("w1".to_string(), WordProgress { level: 3, correct: 2 });
        apply_answer(&mut map, "w1", false, true);
        assert_eq!(map["w1"], WordProgress { level: 2, correct: 0 });

        // Floor at level 1.
        map.insert("w2".to_string(), WordProgress { level: 1, correct: 1 });
        apply_answer(&mut map, "w2", false, true);
        assert_eq!(map["w2"], WordProgress { level: 1, correct: 0 });
    }

    #[test]
    fn wrong_answer_keeps_level_when_not_configured() {
        let mut map = ProgressMap::new();
        map.insert("w1".to_string(), WordProgress { level: 3, correct: 2 });
        apply_answer(&mut map, "w1", false, false);
        assert_eq!(map["w1"], WordProgress { level: 3, correct: 0 });
    }

    #[test]
    fn fraction_spans_zero_to_one() {
        assert_eq!(progress_fraction(None), 0.0);
        let done = WordProgress { level: 4, correct: 0 };
        assert!((progress_fraction(Some(&done)) - 0.75).abs() < 1e-9);
        let mid = WordProgress { level: 2, correct: 1 };
        let expected = (1.0 + 1.0 / 3.0) / 4.0;
        assert!((progress_fraction(Some(&mid)) - expected).abs() < 1e-9);
    }

    #[test]
    fn index_keys_migrate_to_ids() {
        let words = WordStore::from_entries(vec![
            WordEntry::new("Hund", "Hond"),
            WordEntry::new("Katze", "Kat"),
        ]);
        let mut raw = ProgressMap::new();
        raw.insert("0".to_string(), WordProgress { level: 3, correct: 1 });
        raw.insert("1".to_string(), WordProgress { level: 2, correct: 0 });
        raw.insert("99".to_string(), WordProgress { level: 4, correct: 0 });

        let migrated = migrate_index_keys(raw, &words);
        assert_eq!(migrated.len(), 2);
        assert_eq!(
            migrated[&words.get(0).unwrap().id],
            WordProgress { level: 3, correct: 1 }
        );
        assert_eq!(
            migrated[&words.get(1).unwrap().id],
            WordProgress { level: 2, correct: 0 }
        );
    }

    #[test]
    fn id_keys_survive_migration_unchanged() {
        let words = WordStore::from_entries(vec![WordEntry::new("Hund", "Hond")]);
        let id = words.get(0).unwrap().id.clone();
        let mut raw = ProgressMap::new();
        raw.insert(id.clone(), WordProgress { level: 2, correct: 2 });
        let migrated = migrate_index_keys(raw, &words);
        assert_eq!(migrated[&id], WordProgress { level: 2, correct: 2 });
    }

    #[test]
    fn summary_counts_levels() {
        let words = WordStore::from_entries(vec![
            WordEntry::new("a", "a"),
            WordEntry::new("b", "b"),
            WordEntry::new("c", "c"),
        ]);
        let mut progress = ProgressMap::new();
        progress.insert(words.get(0).unwrap().id.clone(), WordProgress { level: 4, correct: 0 });
        progress.insert(words.get(1).unwrap().id.clone(), WordProgress { level: 2, correct: 1 });

        let summary = summarize(&words, &progress);
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.mastered, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.fresh, 1);
        assert_eq!(summary.level_counts, [1, 1, 0, 1]);
    }
}
