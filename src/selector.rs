//! Weighted-random choice of the next word to quiz.
//!
//! Bias rules:
//! - lower mastery levels weigh more: `max(5 - level, 1)`
//! - a word mid-way through a level (`0 < correct < 3`) gets +10, so a
//!   near-complete streak is reinforced before new material is drawn

use rand::Rng;

use crate::progress::{ProgressMap, CORRECT_PER_LEVEL};
use crate::words::WordEntry;

fn weight(progress: &ProgressMap, word: &WordEntry) -> f64 {
    let entry = progress.get(&word.id).copied().unwrap_or_default();
    let mut weight = 5i32 - entry.level as i32;
    if entry.correct > 0 && entry.correct < CORRECT_PER_LEVEL {
        weight += 10;
    }
    weight.max(1) as f64
}

/// Cumulative-weight roulette over the word list. Returns `None` only for an
/// empty list; a draw that runs past the end (floating-point rounding) falls
/// back to the first word.
pub fn pick_word<'a, R: Rng + ?Sized>(
    words: &'a [WordEntry],
    progress: &ProgressMap,
    rng: &mut R,
) -> Option<(&'a WordEntry, usize)> {
    if words.is_empty() {
        return None;
    }

    let weights: Vec<f64> = words.iter().map(|w| weight(progress, w)).collect();
    let total: f64 = weights.iter().sum();

    let mut remaining = rng.random_range(0.0..total);
    for (index, word) in words.iter().enumerate() {
        remaining -= weights[index];
        if remaining <= 0.0 {
            return Some((word, index));
        }
    }

    Some((&words[0], 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::WordProgress;
    use crate::words::WordEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn word_list(n: usize) -> Vec<WordEntry> {
        (0..n)
            .map(|i| {
                let mut w = WordEntry::new(format!("de{i}"), format!("nl{i}"));
                w.id = format!("w{i}");
                w
            })
            .collect()
    }

    fn draw_counts(
        words: &[WordEntry],
        progress: &ProgressMap,
        draws: usize,
    ) -> HashMap<String, usize> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..draws {
            let (word, _) = pick_word(words, progress, &mut rng).unwrap();
            *counts.entry(word.id.clone()).or_default() += 1;
        }
        counts
    }

    #[test]
    fn empty_list_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_word(&[], &ProgressMap::new(), &mut rng).is_none());
    }

    #[test]
    fn single_word_always_selected() {
        let words = word_list(1);
        let mut rng = StdRng::seed_from_u64(1);
        let (word, index) = pick_word(&words, &ProgressMap::new(), &mut rng).unwrap();
        assert_eq!(word.id, "w0");
        assert_eq!(index, 0);
    }

    #[test]
    fn low_level_words_drawn_more_often_than_mastered() {
        let words = word_list(2);
        let mut progress = ProgressMap::new();
        progress.insert("w0".to_string(), WordProgress { level: 1, correct: 0 });
        progress.insert("w1".to_string(), WordProgress { level: 4, correct: 0 });

        let counts = draw_counts(&words, &progress, 10_000);
        assert!(
            counts["w0"] > counts["w1"],
            "level-1 word should be drawn more often: {} vs {}",
            counts["w0"],
            counts["w1"]
        );
    }

    #[test]
    fn mid_level_streak_outdraws_fresh_word_at_same_level() {
        let words = word_list(2);
        let mut progress = ProgressMap::new();
        progress.insert("w0".to_string(), WordProgress { level: 2, correct: 1 });
        progress.insert("w1".to_string(), WordProgress { level: 2, correct: 0 });

        let counts = draw_counts(&words, &progress, 10_000);
        assert!(
            counts["w0"] > counts["w1"],
            "in-streak word should be drawn more often: {} vs {}",
            counts["w0"],
            counts["w1"]
        );
    }

    #[test]
    fn weight_floors_at_one() {
        let words = word_list(1);
        let mut progress = ProgressMap::new();
        progress.insert("w0".to_string(), WordProgress { level: 4, correct: 0 });
        // weight = max(5 - 4, 1) = 1; the draw must still succeed
        let mut rng = StdRng::seed_from_u64(9);
        assert!(pick_word(&words, &progress, &mut rng).is_some());
    }
}
