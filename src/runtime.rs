use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::app::{App, KeyAction};
use crate::error::Result;

/// What the terminal reader forwards: key presses and size changes.
#[derive(Clone, Debug)]
pub enum TermEvent {
    Key(KeyEvent),
    Resize,
}

/// One step of the main loop. `Tick` carries the instant the countdown is read at.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick(Instant),
}

impl From<TermEvent> for AppEvent {
    fn from(event: TermEvent) -> Self {
        match event {
            TermEvent::Key(key) => AppEvent::Key(key),
            TermEvent::Resize => AppEvent::Resize,
        }
    }
}

/// What the caller should do after a step was applied to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Redraw,
    Idle,
    Quit,
}

/// Spawn a thread reading crossterm events. The channel closes when reading fails.
pub fn terminal_events() -> Receiver<TermEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        let evt = match event::read() {
            // windows reports releases too; a release must not type a second character
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => TermEvent::Key(key),
            Ok(Event::Resize(_, _)) => TermEvent::Resize,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(%err, "terminal event reader stopped");
                break;
            }
        };
        if tx.send(evt).is_err() {
            break;
        }
    });

    rx
}

/// Interleaves terminal events with countdown ticks.
///
/// Ticks are due every `tick_rate` measured from the previous tick, so a
/// steady stream of keystrokes cannot hold the countdown back.
pub struct Runner {
    events: Receiver<TermEvent>,
    tick_rate: Duration,
    last_tick: Instant,
}

impl Runner {
    pub fn new(events: Receiver<TermEvent>, tick_rate: Duration) -> Self {
        Self {
            events,
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    /// Next event, or a tick once the interval since the last tick has passed.
    pub fn step(&mut self) -> AppEvent {
        let wait = self.tick_rate.saturating_sub(self.last_tick.elapsed());
        if !wait.is_zero() {
            if let Ok(event) = self.events.recv_timeout(wait) {
                return event.into();
            }
            // disconnected returns early; don't spin
            let left = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if !left.is_zero() {
                thread::sleep(left);
            }
        }

        let now = Instant::now();
        self.last_tick = now;
        AppEvent::Tick(now)
    }

    /// Take one step and apply it to `app`.
    pub fn dispatch(&mut self, app: &mut App) -> Result<Dispatch> {
        match self.step() {
            AppEvent::Tick(now) => {
                if !app.session.countdown().is_running() {
                    return Ok(Dispatch::Idle);
                }
                app.on_tick(now);
                Ok(Dispatch::Redraw)
            }
            AppEvent::Resize => Ok(Dispatch::Redraw),
            AppEvent::Key(key) => match app.handle_key(key, Instant::now())? {
                KeyAction::Quit => Ok(Dispatch::Quit),
                KeyAction::Continue => Ok(Dispatch::Redraw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{Difficulty, Language, WordBank};
    use crate::session::SessionConfig;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(c: char) -> TermEvent {
        TermEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn app() -> App {
        let words = vec!["cat".to_string()];
        let bank = WordBank::from_lists([(Language::English, Difficulty::Easy, words)]);
        let config = SessionConfig {
            language: Language::English,
            difficulty: Difficulty::Easy,
            duration_secs: 60,
        };
        App::new(bank, config).unwrap()
    }

    #[test]
    fn tick_after_quiet_interval() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = Runner::new(rx, Duration::from_millis(5));

        assert!(matches!(runner.step(), AppEvent::Tick(_)));
    }

    #[test]
    fn closed_channel_still_paces_ticks() {
        let (tx, rx) = mpsc::channel::<TermEvent>();
        drop(tx);
        let tick_rate = Duration::from_millis(20);
        let mut runner = Runner::new(rx, tick_rate);

        let start = Instant::now();
        assert!(matches!(runner.step(), AppEvent::Tick(_)));
        assert!(matches!(runner.step(), AppEvent::Tick(_)));
        assert!(start.elapsed() >= tick_rate * 2);
    }

    #[test]
    fn pending_events_come_before_the_tick() {
        let (tx, rx) = mpsc::channel();
        tx.send(TermEvent::Resize).unwrap();
        tx.send(press('a')).unwrap();
        let mut runner = Runner::new(rx, Duration::from_millis(50));

        assert!(matches!(runner.step(), AppEvent::Resize));
        match runner.step() {
            AppEvent::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("expected key, got {other:?}"),
        }
    }

    #[test]
    fn overdue_tick_preempts_typing() {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(10);
        let mut runner = Runner::new(rx, tick_rate);
        thread::sleep(tick_rate * 2);
        tx.send(press('a')).unwrap();

        assert!(matches!(runner.step(), AppEvent::Tick(_)));
        assert!(matches!(runner.step(), AppEvent::Key(_)));
    }

    #[test]
    fn dispatch_types_redraws_and_quits() {
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new(rx, Duration::from_millis(50));
        let mut app = app();

        tx.send(press('c')).unwrap();
        assert_eq!(runner.dispatch(&mut app).unwrap(), Dispatch::Redraw);
        assert_eq!(app.session.input(), "c");
        assert!(app.session.countdown().is_running());

        tx.send(TermEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        assert_eq!(runner.dispatch(&mut app).unwrap(), Dispatch::Quit);
    }

    #[test]
    fn idle_ticks_before_first_keystroke() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = Runner::new(rx, Duration::from_millis(1));
        let mut app = app();

        assert_eq!(runner.dispatch(&mut app).unwrap(), Dispatch::Idle);
        assert!(app.session.countdown().is_idle());
    }
}
