use std::mem;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::countdown::{Countdown, TickOutcome, DEFAULT_DURATION_SECS};
use crate::error::{Error, Result};
use crate::language::{Difficulty, Language, RandomSelector, WordSelector};
use crate::stats::SessionResults;
use crate::typing_policy::{outcome_for, slot_feedback, Outcome, SlotFeedback};

/// Words per displayed row
pub const ROW_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub language: Language,
    pub difficulty: Difficulty,
    pub duration_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::Russian,
            difficulty: Difficulty::Easy,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// rows shown, countdown not started
    Ready,
    Running,
    /// countdown expired, input disabled
    Finished,
}

/// How a slot of the first row should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Done(Outcome),
    Active(SlotFeedback),
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Ignored,
    Feedback(SlotFeedback),
    Submitted { outcome: Outcome, rotated: bool },
}

/// One typing test: two rows of words, the slot being typed and the countdown.
pub struct Session {
    config: SessionConfig,
    words: Arc<[String]>,
    selector: Box<dyn WordSelector>,
    first_row: Vec<String>,
    second_row: Vec<String>,
    marks: [Option<Outcome>; ROW_LEN],
    feedback: SlotFeedback,
    position: usize,
    input: String,
    correct_words: u32,
    attempted_words: u32,
    countdown: Countdown,
    phase: Phase,
    results: Option<SessionResults>,
}

impl Session {
    pub fn new(config: SessionConfig, words: Arc<[String]>) -> Result<Self> {
        Self::with_selector(config, words, Box::new(RandomSelector::new()))
    }

    pub fn with_selector(
        config: SessionConfig,
        words: Arc<[String]>,
        mut selector: Box<dyn WordSelector>,
    ) -> Result<Self> {
        let countdown = Countdown::new(config.duration_secs)?;
        let first_row = draw_row(&mut selector, &words)?;
        let second_row = draw_row(&mut selector, &words)?;

        debug!(
            language = %config.language,
            difficulty = %config.difficulty,
            words = words.len(),
            "new session"
        );

        Ok(Self {
            config,
            words,
            selector,
            first_row,
            second_row,
            marks: [None; ROW_LEN],
            feedback: SlotFeedback::Partial,
            position: 0,
            input: String::new(),
            correct_words: 0,
            attempted_words: 0,
            countdown,
            phase: Phase::Ready,
            results: None,
        })
    }

    /// Fresh rows, counters cleared, countdown back to its full duration.
    pub fn restart(&mut self) -> Result<()> {
        self.first_row = draw_row(&mut self.selector, &self.words)?;
        self.second_row = draw_row(&mut self.selector, &self.words)?;
        self.marks = [None; ROW_LEN];
        self.feedback = SlotFeedback::Partial;
        self.position = 0;
        self.input.clear();
        self.correct_words = 0;
        self.attempted_words = 0;
        self.countdown.cancel();
        self.phase = Phase::Ready;
        self.results = None;
        Ok(())
    }

    /// React to the whole content of the input line changing to `text`.
    ///
    /// A space submits the current word; anything else updates the feedback
    /// for the active slot. The first change of a session starts the countdown.
    pub fn set_input(&mut self, text: &str, now: Instant) -> Result<InputEvent> {
        if self.phase == Phase::Finished {
            return Ok(InputEvent::Ignored);
        }

        if self.phase == Phase::Ready {
            self.countdown.start(now);
            self.phase = Phase::Running;
            info!(language = %self.config.language, difficulty = %self.config.difficulty, "session started");
        }

        if !text.contains(' ') {
            self.input = text.to_string();
            self.feedback = slot_feedback(text, self.expected_word());
            return Ok(InputEvent::Feedback(self.feedback));
        }

        if text.trim().is_empty() {
            self.input.clear();
            self.feedback = SlotFeedback::Partial;
            return Ok(InputEvent::Ignored);
        }

        self.submit(text)
    }

    pub fn type_char(&mut self, c: char, now: Instant) -> Result<InputEvent> {
        let mut text = self.input.clone();
        text.push(c);
        self.set_input(&text, now)
    }

    pub fn backspace(&mut self, now: Instant) -> Result<InputEvent> {
        if self.phase == Phase::Finished || self.input.is_empty() {
            return Ok(InputEvent::Ignored);
        }
        let mut text = self.input.clone();
        text.pop();
        self.set_input(&text, now)
    }

    fn submit(&mut self, text: &str) -> Result<InputEvent> {
        let outcome = outcome_for(text, self.expected_word());
        debug!(slot = self.position, ?outcome, "word submitted");

        // draw before touching any state so a failed draw leaves the slot as it was
        let rotated = self.position + 1 == ROW_LEN;
        let fresh = if rotated {
            Some(draw_row(&mut self.selector, &self.words)?)
        } else {
            None
        };

        self.marks[self.position] = Some(outcome);
        self.attempted_words += 1;
        if outcome == Outcome::Correct {
            self.correct_words += 1;
        }
        self.position += 1;
        self.input.clear();
        self.feedback = SlotFeedback::Partial;

        if let Some(fresh) = fresh {
            self.rotate_rows(fresh);
        }
        Ok(InputEvent::Submitted { outcome, rotated })
    }

    fn rotate_rows(&mut self, fresh: Vec<String>) {
        self.first_row = mem::replace(&mut self.second_row, fresh);
        self.marks = [None; ROW_LEN];
        self.position = 0;
    }

    /// Advance the countdown; finishes the session when it expires.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.countdown.tick(now);
        if outcome == TickOutcome::Expired {
            self.finish();
        }
        outcome
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.input.clear();
        match SessionResults::compute(
            self.correct_words,
            self.attempted_words,
            self.countdown.duration_secs(),
        ) {
            Ok(results) => {
                info!(
                    wpm = results.wpm,
                    correct = results.correct_words,
                    attempted = results.attempted_words,
                    "session finished"
                );
                self.results = Some(results);
            }
            Err(err) => warn!(%err, "session finished without results"),
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn accepts_input(&self) -> bool {
        self.phase != Phase::Finished
    }

    pub fn first_row(&self) -> &[String] {
        &self.first_row
    }

    pub fn second_row(&self) -> &[String] {
        &self.second_row
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expected_word(&self) -> &str {
        &self.first_row[self.position]
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn correct_words(&self) -> u32 {
        self.correct_words
    }

    pub fn attempted_words(&self) -> u32 {
        self.attempted_words
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn results(&self) -> Option<&SessionResults> {
        self.results.as_ref()
    }

    pub fn slot_state(&self, slot: usize) -> SlotState {
        if slot < self.position {
            self.marks[slot].map_or(SlotState::Pending, SlotState::Done)
        } else if slot == self.position && self.phase != Phase::Finished {
            SlotState::Active(self.feedback)
        } else {
            SlotState::Pending
        }
    }
}

/// A full row from `selector`; anything shorter would leave slots without a word.
fn draw_row(selector: &mut Box<dyn WordSelector>, words: &[String]) -> Result<Vec<String>> {
    let row = selector.select_words(words, ROW_LEN)?;
    if row.len() != ROW_LEN {
        return Err(Error::invalid(
            "selector",
            format!("returned {} words for a row of {ROW_LEN}", row.len()),
        ));
    }
    Ok(row)
}
