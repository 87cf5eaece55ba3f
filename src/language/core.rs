use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};

use super::loader::{load_words_from_file, parse_words};
use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Russian,
            Language::Russian => Language::English,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

pub const ALL_LISTS: [(Language, Difficulty); 4] = [
    (Language::English, Difficulty::Easy),
    (Language::English, Difficulty::Hard),
    (Language::Russian, Difficulty::Easy),
    (Language::Russian, Difficulty::Hard),
];

/// e.g. `english_easy_words.txt`
pub fn list_file_name(language: Language, difficulty: Difficulty) -> String {
    format!("{language}_{difficulty}_words.txt")
}

/// The four word lists, loaded once and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    lists: HashMap<(Language, Difficulty), Arc<[String]>>,
}

impl WordBank {
    /// Load every list from `dir`. A missing directory, a missing list or a
    /// list without a single word is fatal.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::missing(dir));
        }

        let mut bank = WordBank::default();
        for (language, difficulty) in ALL_LISTS {
            let name = list_file_name(language, difficulty);
            let words = load_words_from_file(dir.join(&name))?;
            bank.insert(language, difficulty, non_empty(&name, words)?);
        }
        tracing::info!(dir = %dir.display(), "word bank loaded from directory");
        Ok(bank)
    }

    /// Lists compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut bank = WordBank::default();
        for (language, difficulty) in ALL_LISTS {
            let name = list_file_name(language, difficulty);
            let file = LANG_DIR
                .get_file(&name)
                .ok_or_else(|| Error::missing(&name))?;
            let text = file
                .contents_utf8()
                .ok_or_else(|| Error::invalid("word list", format!("{name} is not valid UTF-8")))?;
            bank.insert(language, difficulty, non_empty(&name, parse_words(text))?);
        }
        tracing::debug!("using built-in word bank");
        Ok(bank)
    }

    pub fn from_lists<I>(lists: I) -> Self
    where
        I: IntoIterator<Item = (Language, Difficulty, Vec<String>)>,
    {
        let mut bank = WordBank::default();
        for (language, difficulty, words) in lists {
            bank.insert(language, difficulty, words);
        }
        bank
    }

    fn insert(&mut self, language: Language, difficulty: Difficulty, words: Vec<String>) {
        self.lists.insert((language, difficulty), words.into());
    }

    /// Words for the given list; empty when the bank has no such list.
    pub fn words(&self, language: Language, difficulty: Difficulty) -> Arc<[String]> {
        self.lists
            .get(&(language, difficulty))
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }
}

// every list must be able to fill a row, otherwise switching to it fails mid-session
fn non_empty(name: &str, words: Vec<String>) -> Result<Vec<String>> {
    if words.is_empty() {
        return Err(Error::invalid("word list", format!("{name} contains no words")));
    }
    Ok(words)
}
