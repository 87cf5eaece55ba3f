use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wpmtest::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::{Difficulty, Language, WordBank},
    runtime::{terminal_events, Dispatch, Runner},
    TICK_RATE_MS,
};

/// two-row typing speed test with english and russian word lists
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the highlighted word and press space. Six words per row; when a row is done the next one moves up. The countdown starts with your first keystroke and words-per-minute is shown when it runs out."
)]
pub struct Cli {
    /// language to pull words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// word list difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// number of seconds to run test
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// directory with english_easy_words.txt, english_hard_words.txt,
    /// russian_easy_words.txt and russian_hard_words.txt (built-in lists when omitted)
    #[clap(long)]
    words_dir: Option<PathBuf>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(language) = self.language {
            cfg.language = language;
        }
        if let Some(difficulty) = self.difficulty {
            cfg.difficulty = difficulty;
        }
        if let Some(seconds) = self.seconds {
            cfg.duration_secs = seconds;
        }
        if let Some(dir) = &self.words_dir {
            cfg.words_dir = Some(dir.clone());
        }
        cfg
    }
}

fn load_bank(cfg: &Config) -> wpmtest::Result<WordBank> {
    match &cfg.words_dir {
        Some(dir) => WordBank::load_dir(dir),
        None => WordBank::builtin(),
    }
}

fn init_logging() -> Option<WorkerGuard> {
    let dir = AppDirs::log_dir();
    std::fs::create_dir_all(&dir).ok()?;

    let file_appender = tracing_appender::rolling::never(dir, "wpmtest.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wpmtest=info")),
        )
        .with_writer(file_writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let store = cli
        .config
        .as_ref()
        .map_or_else(FileConfigStore::new, FileConfigStore::with_path);
    let config = cli.apply(store.load());

    // missing word lists are fatal before the terminal is touched
    let app = load_bank(&config).and_then(|bank| App::new(bank, config.session_config()));
    let mut app = match app {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(%err, "startup failed");
            Cli::command().error(ErrorKind::Io, err).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(terminal_events(), Duration::from_millis(TICK_RATE_MS));

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.dispatch(app)? {
            Dispatch::Quit => break,
            Dispatch::Redraw => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            Dispatch::Idle => {}
        }
    }

    Ok(())
}
