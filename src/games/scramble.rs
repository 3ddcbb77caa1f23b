use rand::seq::SliceRandom;
use rand::Rng;

/// Permutes the answer's characters, retrying until the result differs from
/// the original. The retry count is bounded; after `max_attempts` shuffles
/// the possibly-identical permutation is accepted. Single-character answers
/// are returned as-is.
pub fn scramble_word<R: Rng + ?Sized>(answer: &str, max_attempts: u32, rng: &mut R) -> String {
    let mut chars: Vec<char> = answer.chars().collect();
    if chars.len() <= 1 {
        return answer.to_string();
    }

    let mut attempts = 0;
    loop {
        chars.shuffle(rng);
        let candidate: String = chars.iter().collect();
        attempts += 1;
        if candidate != answer || attempts >= max_attempts {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scrambled_word_differs_from_the_answer() {
        let mut rng = StdRng::seed_from_u64(11);
        for answer in ["Hond", "Fiets", "Slaapkamer"] {
            for _ in 0..200 {
                let scrambled = scramble_word(answer, 10, &mut rng);
                assert_ne!(scrambled, answer, "scramble of {answer:?} matched the original");
            }
        }
    }

    #[test]
    fn two_letter_answers_swap() {
        // Only two permutations exist; a generous retry budget makes the
        // non-identical one a certainty for test purposes.
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(scramble_word("ab", 64, &mut rng), "ba");
        }
    }

    #[test]
    fn scramble_preserves_the_character_multiset() {
        let mut rng = StdRng::seed_from_u64(3);
        let scrambled = scramble_word("Straße", 10, &mut rng);
        let mut expected: Vec<char> = "Straße".chars().collect();
        let mut got: Vec<char> = scrambled.chars().collect();
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(expected, got);
    }

    #[test]
    fn single_letter_answers_pass_through() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(scramble_word("a", 10, &mut rng), "a");
        assert_eq!(scramble_word("", 10, &mut rng), "");
    }
}
