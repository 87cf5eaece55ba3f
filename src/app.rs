use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::countdown::TickOutcome;
use crate::error::Result;
use crate::language::WordBank;
use crate::session::{Session, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// UI-side state: the loaded word bank and the session being typed.
pub struct App {
    bank: WordBank,
    pub session: Session,
}

impl App {
    pub fn new(bank: WordBank, config: SessionConfig) -> Result<Self> {
        let session = Session::new(config, bank.words(config.language, config.difficulty))?;
        Ok(Self { bank, session })
    }

    pub fn with_session(bank: WordBank, session: Session) -> Self {
        Self { bank, session }
    }

    pub fn config(&self) -> SessionConfig {
        self.session.config()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<KeyAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(KeyAction::Quit),
            KeyCode::Char('c') if ctrl => return Ok(KeyAction::Quit),
            KeyCode::Char('l') if ctrl => {
                if let Err(err) = self.switch_language() {
                    warn!(%err, "language switch failed, keeping current session");
                }
            }
            KeyCode::Char('d') if ctrl => {
                if let Err(err) = self.switch_difficulty() {
                    warn!(%err, "difficulty switch failed, keeping current session");
                }
            }
            KeyCode::Tab => self.restart()?,
            KeyCode::Backspace => {
                self.session.backspace(now)?;
            }
            KeyCode::Char(c) if !ctrl => {
                self.session.type_char(c, now)?;
            }
            _ => {}
        }
        Ok(KeyAction::Continue)
    }

    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        self.session.tick(now)
    }

    pub fn restart(&mut self) -> Result<()> {
        self.session.restart()
    }

    pub fn switch_language(&mut self) -> Result<()> {
        let mut config = self.config();
        config.language = config.language.toggled();
        info!(language = %config.language, "switching language");
        self.rebuild(config)
    }

    pub fn switch_difficulty(&mut self) -> Result<()> {
        let mut config = self.config();
        config.difficulty = config.difficulty.toggled();
        info!(difficulty = %config.difficulty, "switching difficulty");
        self.rebuild(config)
    }

    fn rebuild(&mut self, config: SessionConfig) -> Result<()> {
        let words = self.bank.words(config.language, config.difficulty);
        self.session = Session::new(config, words)?;
        Ok(())
    }
}
