use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// Picks the words shown in the typing rows
pub trait WordSelector {
    fn select_words(&mut self, words: &[String], count: usize) -> Result<Vec<String>>;
}

/// Uniform selection with replacement: every slot is an independent draw,
/// so words may repeat within and across rows.
pub struct RandomSelector<R: Rng> {
    rng: R,
}

impl RandomSelector<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomSelector<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WordSelector for RandomSelector<R> {
    fn select_words(&mut self, words: &[String], count: usize) -> Result<Vec<String>> {
        check_args(words, count)?;
        Ok((0..count)
            .filter_map(|_| words.choose(&mut self.rng).cloned())
            .collect())
    }
}

/// Sample `count` random words from `words` using the thread rng.
pub fn generate_random_words(words: &[String], count: usize) -> Result<Vec<String>> {
    RandomSelector::new().select_words(words, count)
}

fn check_args(words: &[String], count: usize) -> Result<()> {
    if words.is_empty() {
        return Err(Error::invalid("words", "word list must not be empty"));
    }
    if count == 0 {
        return Err(Error::invalid("count", "must be a positive number of words"));
    }
    Ok(())
}

/// Hands out words in list order, wrapping around. Deterministic rows for tests.
#[derive(Debug, Default)]
pub struct SequentialSelector {
    next: usize,
}

impl WordSelector for SequentialSelector {
    fn select_words(&mut self, words: &[String], count: usize) -> Result<Vec<String>> {
        check_args(words, count)?;
        let picked = (0..count)
            .map(|i| words[(self.next + i) % words.len()].clone())
            .collect();
        self.next = (self.next + count) % words.len();
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_generate_random_words_count_and_membership() {
        let source = abc();
        for _ in 0..50 {
            let picked = generate_random_words(&source, 2).unwrap();
            assert_eq!(picked.len(), 2);
            assert!(picked.iter().all(|w| source.contains(w)));
        }
    }

    #[test]
    fn test_count_may_exceed_list_length() {
        let source = abc();
        let picked = generate_random_words(&source, 12).unwrap();
        assert_eq!(picked.len(), 12);
    }

    #[test]
    fn test_single_word_list_repeats() {
        let source = vec!["only".to_string()];
        let picked = generate_random_words(&source, 6).unwrap();
        assert!(picked.iter().all(|w| w == "only"));
    }

    #[test]
    fn test_empty_list_is_invalid() {
        let err = generate_random_words(&[], 3).unwrap_err();
        assert_matches!(err, Error::InvalidArgument { name: "words", .. });
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let err = generate_random_words(&abc(), 0).unwrap_err();
        assert_matches!(err, Error::InvalidArgument { name: "count", .. });
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let source = abc();
        let mut first = RandomSelector::with_rng(StdRng::seed_from_u64(7));
        let mut second = RandomSelector::with_rng(StdRng::seed_from_u64(7));
        assert_eq!(
            first.select_words(&source, 6).unwrap(),
            second.select_words(&source, 6).unwrap()
        );
    }

    #[test]
    fn test_sequential_selector_wraps() {
        let source = abc();
        let mut selector = SequentialSelector::default();
        assert_eq!(selector.select_words(&source, 2).unwrap(), vec!["a", "b"]);
        assert_eq!(selector.select_words(&source, 2).unwrap(), vec!["c", "a"]);
    }
}
