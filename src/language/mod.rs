pub mod core;
pub mod loader;
pub mod selector;

// Re-export the main types for convenience
pub use self::core::{list_file_name, Difficulty, Language, WordBank, ALL_LISTS};
pub use loader::{load_words_from_file, parse_words};
pub use selector::{generate_random_words, RandomSelector, SequentialSelector, WordSelector};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lists_feed_the_sampler() {
        let bank = WordBank::builtin().unwrap();
        for (language, difficulty) in ALL_LISTS {
            let words = bank.words(language, difficulty);
            let row = generate_random_words(&words, 6).unwrap();
            assert_eq!(row.len(), 6);
            assert!(row.iter().all(|w| words.contains(w)));
        }
    }
}
