use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use jumbl::{
    config::{Config, ConfigStore, FileConfigStore},
    hint::hint,
    journal::Journal,
    profile::Difficulty,
    round::{GameObserver, GameSession, GuessOutcome, Phase},
    runtime::{FixedTicker, GameEvent, Runner, TerminalEventSource},
    ui::{Feedback, GameScreen, Hud},
    words::Lexicon,
};

/// terminal word-scramble game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Unscramble one word per round before the countdown runs out. Difficulty profiles control word length, time limit, and how aggressively letters are shuffled."
)]
pub struct Cli {
    /// difficulty level (easy, medium, hard)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// number of candidate words sampled per round
    #[clap(short = 'n', long)]
    pool_size: Option<usize>,

    /// external word file (JSON array of [word, _, category?] rows)
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// show a hint line for the current word
    #[clap(long)]
    hints: bool,

    /// don't append played rounds to the history log
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Overlay command-line flags on the persisted config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(d) = self.difficulty {
            config.difficulty = d.to_string();
        }
        if let Some(n) = self.pool_size {
            config.pool_size = n.max(1);
        }
        if let Some(path) = &self.words {
            config.words_file = Some(path.display().to_string());
        }
        if self.hints {
            config.hints = true;
        }
    }
}

pub struct App {
    pub session: GameSession<Lexicon>,
    pub hud: Hud,
    pub input: String,
    pub show_hint: bool,
}

/// Observer handed to the session for every command: forwards to the Hud
/// and clears the guess buffer whenever a new round begins.
struct RoundFeed<'a> {
    hud: &'a mut Hud,
    input: &'a mut String,
}

impl GameObserver for RoundFeed<'_> {
    fn on_round_start(&mut self, scrambled: &[char]) {
        self.input.clear();
        self.hud.on_round_start(scrambled);
    }
    fn on_tick(&mut self, time_left: u32) {
        self.hud.on_tick(time_left);
    }
    fn on_timeout(&mut self, correct_word: &str) {
        self.hud.on_timeout(correct_word);
    }
    fn on_correct(&mut self, new_score: u32) {
        self.hud.on_correct(new_score);
    }
    fn on_incorrect(&mut self) {
        self.hud.on_incorrect();
    }
    fn on_error(&mut self, message: &str) {
        self.hud.on_error(message);
    }
}

impl App {
    pub fn new(config: &Config, no_save: bool) -> Self {
        let source = match &config.words_file {
            Some(path) => Lexicon::with_file(path),
            None => Lexicon::new(),
        };
        let journal = if no_save { None } else { Journal::new() };
        let session = GameSession::new(source, config.difficulty_level(), config.pool_size)
            .with_journal(journal);

        let mut app = Self {
            session,
            hud: Hud::default(),
            input: String::new(),
            show_hint: config.hints,
        };
        let mut obs = RoundFeed {
            hud: &mut app.hud,
            input: &mut app.input,
        };
        app.session.start(&mut obs);
        app
    }

    fn on_tick(&mut self) {
        let mut obs = RoundFeed {
            hud: &mut self.hud,
            input: &mut self.input,
        };
        self.session.on_tick(&mut obs);
    }

    fn submit(&mut self) {
        let guess = self.input.clone();
        let mut obs = RoundFeed {
            hud: &mut self.hud,
            input: &mut self.input,
        };
        let outcome = self.session.submit_guess(&guess, &mut obs);
        match outcome {
            GuessOutcome::Empty => self.hud.feedback = Some(Feedback::EmptyGuess),
            GuessOutcome::Incorrect => self.input.clear(),
            GuessOutcome::Correct | GuessOutcome::NotActive => {}
        }
    }

    fn new_round(&mut self) {
        let mut obs = RoundFeed {
            hud: &mut self.hud,
            input: &mut self.input,
        };
        self.session.start(&mut obs);
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return true,
                KeyCode::Char('p') => self.session.toggle_pause(),
                KeyCode::Char('n') => self.new_round(),
                KeyCode::Char('h') => self.show_hint = !self.show_hint,
                KeyCode::Char('d') => {
                    // Changing difficulty restarts the round so the new
                    // bounds apply immediately (the session itself only
                    // targets the next round).
                    let next = self.session.difficulty().next();
                    self.session.change_difficulty(next);
                    self.new_round();
                }
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if self.can_type() {
                    self.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if self.can_type() && (c.is_alphabetic() || c == ' ') {
                    self.input.push(c);
                }
            }
            _ => {}
        }
        false
    }

    /// Guess editing is gated on an active, unpaused round.
    fn can_type(&self) -> bool {
        self.session.phase() == Phase::Active && !self.session.is_paused()
    }

    fn draw(&self, f: &mut Frame) {
        let hint_text = if self.show_hint {
            self.session.current_word().map(hint)
        } else {
            None
        };
        let screen = GameScreen {
            hud: &self.hud,
            input: &self.input,
            time_left: self.session.time_left(),
            score: self.session.score(),
            difficulty: self.session.difficulty().to_string(),
            paused: self.session.is_paused(),
            failed: self.session.phase() == Phase::Failed,
            hint: hint_text.as_deref(),
            category: self.session.current_category(),
        };
        f.render_widget(screen, f.area());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply_to(&mut config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, cli.no_save);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist the effective settings for the next launch.
    let _ = store.save(&config);

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    // One tick per second, matching the countdown granularity.
    let runner = Runner::new(
        TerminalEventSource::new(),
        FixedTicker::new(Duration::from_secs(1)),
    );

    loop {
        terminal.draw(|f| app.draw(f))?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
