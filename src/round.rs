use crate::journal::{Journal, RoundRecord};
use crate::profile::{Difficulty, DifficultyProfile};
use crate::sampler::sample;
use crate::scramble::scramble;
use crate::timer::{Tick, Timer};
use crate::words::{WordEntry, WordSource};
use rand::seq::SliceRandom;

pub const DEFAULT_POOL_SIZE: usize = 10;

/// Lifecycle of a play round. `Solved` and `TimedOut` are transient:
/// resolving a round immediately loads the next one. `Failed` is terminal
/// until the player manually refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Active,
    Solved,
    TimedOut,
    Failed,
}

/// Result of a guess submission, for the caller's own messaging on top
/// of the observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// Trimmed input was empty; re-prompt, no state change.
    Empty,
    /// Guessing is not possible right now (paused, loading, or failed).
    NotActive,
}

/// Callbacks from the session to its presentation layer. All methods have
/// empty defaults so observers implement only what they render.
pub trait GameObserver {
    fn on_round_start(&mut self, _scrambled: &[char]) {}
    fn on_tick(&mut self, _time_left: u32) {}
    fn on_timeout(&mut self, _correct_word: &str) {}
    fn on_correct(&mut self, _new_score: u32) {}
    fn on_incorrect(&mut self) {}
    fn on_error(&mut self, _message: &str) {}
}

/// The word in play and its scrambled presentation.
#[derive(Debug, Clone)]
pub struct Round {
    pub entry: WordEntry,
    pub scrambled: Vec<char>,
}

/// One game session: difficulty, word source, score, and the round state
/// machine. All commands and timer ticks are serialized by the caller's
/// event loop; nothing here is shared across threads.
pub struct GameSession<S: WordSource> {
    source: S,
    difficulty: Difficulty,
    pool_size: usize,
    phase: Phase,
    round: Option<Round>,
    timer: Timer,
    score: u32,
    journal: Option<Journal>,
}

impl<S: WordSource> GameSession<S> {
    pub fn new(source: S, difficulty: Difficulty, pool_size: usize) -> Self {
        Self {
            source,
            difficulty,
            pool_size,
            phase: Phase::Loading,
            round: None,
            timer: Timer::new(),
            score: 0,
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: Option<Journal>) -> Self {
        self.journal = journal;
        self
    }

    /// Begin a new round: build a working pool, pick one word, scramble
    /// it, and arm the countdown. Cancels any round in flight, so a
    /// superseded round's timer can never fire afterwards.
    pub fn start(&mut self, obs: &mut impl GameObserver) {
        self.timer.cancel();
        self.phase = Phase::Loading;
        self.round = None;

        let profile = self.profile();
        let candidates = self
            .source
            .fetch_words(profile.min_word_length, profile.max_word_length);

        let mut rng = rand::thread_rng();
        let pool = sample(&candidates, self.pool_size, &mut rng);

        let Some(entry) = pool.choose(&mut rng).cloned() else {
            self.phase = Phase::Failed;
            obs.on_error("could not load any words; press ctrl-n to retry");
            return;
        };

        let scrambled = scramble(&entry.word, profile, &mut rng);
        self.timer.start(profile.time_limit_secs);
        self.round = Some(Round { entry, scrambled });
        self.phase = Phase::Active;

        // Fires exactly once per round, before any tick.
        obs.on_round_start(self.scrambled().unwrap_or_default());
    }

    /// Advance the countdown by one second. Ignored while paused or
    /// outside an active round; expiry resolves the round and starts the
    /// next one.
    pub fn on_tick(&mut self, obs: &mut impl GameObserver) {
        if self.phase != Phase::Active {
            return;
        }
        match self.timer.tick() {
            Tick::Idle => {}
            Tick::Running(remaining) => obs.on_tick(remaining),
            Tick::Expired => {
                self.phase = Phase::TimedOut;
                self.log_round(false);
                let word = self
                    .round
                    .as_ref()
                    .map(|r| r.entry.word.clone())
                    .unwrap_or_default();
                obs.on_timeout(&word);
                self.start(obs);
            }
        }
    }

    /// Evaluate a guess against the round's word, case-insensitively.
    /// A correct guess scores and rolls straight into the next round.
    pub fn submit_guess(&mut self, text: &str, obs: &mut impl GameObserver) -> GuessOutcome {
        if self.phase != Phase::Active || self.is_paused() {
            return GuessOutcome::NotActive;
        }
        let guess = text.trim();
        if guess.is_empty() {
            return GuessOutcome::Empty;
        }

        let word = match &self.round {
            Some(r) => r.entry.word.clone(),
            None => return GuessOutcome::NotActive,
        };

        if guess.eq_ignore_ascii_case(&word) {
            self.score += 1;
            self.phase = Phase::Solved;
            self.log_round(true);
            obs.on_correct(self.score);
            self.start(obs);
            GuessOutcome::Correct
        } else {
            obs.on_incorrect();
            GuessOutcome::Incorrect
        }
    }

    /// Flip the pause flag. Pausing freezes the countdown; guesses are
    /// rejected until resumed. Only meaningful mid-round.
    pub fn toggle_pause(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        if self.timer.is_paused() {
            self.timer.resume();
        } else {
            self.timer.pause();
        }
    }

    /// Switch difficulty for the *next* round. The current round keeps
    /// its word and remaining time; the word cache is dropped so the new
    /// length bounds take effect on the next load (last write wins).
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.source.invalidate();
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The underlying word source, mainly for inspection in tests.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn scrambled(&self) -> Option<&[char]> {
        self.round.as_ref().map(|r| r.scrambled.as_slice())
    }

    /// The word behind the current puzzle, for hinting and end-of-round
    /// reveals. Not rendered while the round is live.
    pub fn current_word(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.entry.word.as_str())
    }

    pub fn current_category(&self) -> Option<&str> {
        self.round.as_ref()?.entry.category.as_deref()
    }

    fn log_round(&self, solved: bool) {
        let (Some(journal), Some(round)) = (&self.journal, &self.round) else {
            return;
        };
        let record = RoundRecord {
            difficulty: self.difficulty.to_string(),
            word: round.entry.word.clone(),
            solved,
            seconds_used: self
                .profile()
                .time_limit_secs
                .saturating_sub(self.timer.remaining()),
            score: self.score,
        };
        // History is best-effort; never let a full disk end the game.
        let _ = journal.append(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Scripted source serving a fixed list, ignoring bounds.
    struct FixedSource {
        words: Vec<&'static str>,
        invalidated: usize,
    }

    impl FixedSource {
        fn of(words: &[&'static str]) -> Self {
            Self {
                words: words.to_vec(),
                invalidated: 0,
            }
        }
    }

    impl WordSource for FixedSource {
        fn fetch_words(&mut self, _min: usize, _max: usize) -> Vec<WordEntry> {
            self.words.iter().map(|w| WordEntry::new(*w)).collect()
        }

        fn invalidate(&mut self) {
            self.invalidated += 1;
        }
    }

    #[derive(Default)]
    struct Recorder {
        round_starts: Vec<String>,
        ticks: Vec<u32>,
        timeouts: Vec<String>,
        corrects: Vec<u32>,
        incorrects: usize,
        errors: Vec<String>,
    }

    impl GameObserver for Recorder {
        fn on_round_start(&mut self, scrambled: &[char]) {
            self.round_starts.push(scrambled.iter().collect());
        }
        fn on_tick(&mut self, time_left: u32) {
            self.ticks.push(time_left);
        }
        fn on_timeout(&mut self, correct_word: &str) {
            self.timeouts.push(correct_word.to_string());
        }
        fn on_correct(&mut self, new_score: u32) {
            self.corrects.push(new_score);
        }
        fn on_incorrect(&mut self) {
            self.incorrects += 1;
        }
        fn on_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn session(words: &[&'static str]) -> GameSession<FixedSource> {
        GameSession::new(FixedSource::of(words), Difficulty::Medium, DEFAULT_POOL_SIZE)
    }

    #[test]
    fn test_start_activates_round() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.current_word(), Some("puzzle"));
        assert_eq!(s.time_left(), 45);
        assert_eq!(obs.round_starts.len(), 1);
        assert!(obs.ticks.is_empty(), "no tick may precede round start");
    }

    #[test]
    fn test_scrambled_differs_from_word() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);
        assert_ne!(obs.round_starts[0], "puzzle");
        let mut sorted: Vec<char> = obs.round_starts[0].chars().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!['e', 'l', 'p', 'u', 'z', 'z']);
    }

    #[test]
    fn test_empty_pool_fails_terminally() {
        let mut s = session(&[]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        assert_eq!(s.phase(), Phase::Failed);
        assert_eq!(obs.errors.len(), 1);
        assert!(obs.round_starts.is_empty());

        // Not retried automatically: ticks and guesses are inert.
        s.on_tick(&mut obs);
        assert_matches!(s.submit_guess("word", &mut obs), GuessOutcome::NotActive);
        assert_eq!(s.phase(), Phase::Failed);
    }

    #[test]
    fn test_correct_guess_scores_and_restarts() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        assert_matches!(s.submit_guess("PuZzLe", &mut obs), GuessOutcome::Correct);
        assert_eq!(s.score(), 1);
        assert_eq!(obs.corrects, vec![1]);
        // A new round began right away.
        assert_eq!(obs.round_starts.len(), 2);
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.time_left(), 45);
    }

    #[test]
    fn test_incorrect_guess_keeps_round() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        assert_matches!(s.submit_guess("wrong", &mut obs), GuessOutcome::Incorrect);
        assert_eq!(s.score(), 0);
        assert_eq!(obs.incorrects, 1);
        assert_eq!(obs.round_starts.len(), 1);
        assert_eq!(s.current_word(), Some("puzzle"));
        assert_eq!(s.phase(), Phase::Active);
    }

    #[test]
    fn test_empty_guess_is_rejected_without_side_effects() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        assert_matches!(s.submit_guess("   ", &mut obs), GuessOutcome::Empty);
        assert_eq!(obs.incorrects, 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_timeout_reveals_word_and_restarts() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        for _ in 0..45 {
            s.on_tick(&mut obs);
        }

        assert_eq!(obs.timeouts, vec!["puzzle".to_string()]);
        assert_eq!(obs.ticks.len(), 44, "every non-final tick reports time");
        assert_eq!(obs.round_starts.len(), 2);
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_pause_blocks_ticks_and_guesses() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        s.on_tick(&mut obs);
        let frozen = s.time_left();

        s.toggle_pause();
        assert!(s.is_paused());
        s.on_tick(&mut obs);
        s.on_tick(&mut obs);
        assert_eq!(s.time_left(), frozen);
        assert_matches!(s.submit_guess("puzzle", &mut obs), GuessOutcome::NotActive);
        assert_eq!(s.score(), 0);

        s.toggle_pause();
        assert!(!s.is_paused());
        s.on_tick(&mut obs);
        assert_eq!(s.time_left(), frozen - 1);
        assert_matches!(s.submit_guess("puzzle", &mut obs), GuessOutcome::Correct);
    }

    #[test]
    fn test_change_difficulty_leaves_current_round_untouched() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);
        s.on_tick(&mut obs);
        let remaining = s.time_left();

        s.change_difficulty(Difficulty::Hard);

        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert_eq!(s.current_word(), Some("puzzle"));
        assert_eq!(s.time_left(), remaining);
        // The cache was invalidated for the new bounds.
        assert_eq!(s.source.invalidated, 1);

        // The new limit applies from the next round on.
        s.start(&mut obs);
        assert_eq!(s.time_left(), 30);
    }

    #[test]
    fn test_restart_supersedes_previous_round() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);
        for _ in 0..40 {
            s.on_tick(&mut obs);
        }

        // Manual refresh: the old countdown is gone, the new one is full.
        s.start(&mut obs);
        assert_eq!(s.time_left(), 45);
        for _ in 0..10 {
            s.on_tick(&mut obs);
        }
        assert!(obs.timeouts.is_empty(), "stale countdown fired after restart");
    }

    #[test]
    fn test_guess_before_start_is_not_active() {
        let mut s = session(&["puzzle"]);
        let mut obs = Recorder::default();
        assert_matches!(s.submit_guess("puzzle", &mut obs), GuessOutcome::NotActive);
    }

    #[test]
    fn test_pause_outside_active_round_is_inert() {
        let mut s = session(&[]);
        let mut obs = Recorder::default();
        s.start(&mut obs);
        assert_eq!(s.phase(), Phase::Failed);
        s.toggle_pause();
        assert!(!s.is_paused());
    }

    #[test]
    fn test_score_accumulates_across_rounds() {
        let mut s = session(&["echo"]);
        let mut obs = Recorder::default();
        s.start(&mut obs);

        for expected in 1..=3 {
            assert_matches!(s.submit_guess("echo", &mut obs), GuessOutcome::Correct);
            assert_eq!(s.score(), expected);
        }
        assert_eq!(obs.corrects, vec![1, 2, 3]);
    }

    #[test]
    fn test_journal_records_resolved_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.csv");
        let mut s = GameSession::new(FixedSource::of(&["echo"]), Difficulty::Easy, 5)
            .with_journal(Some(Journal::with_path(&path)));
        let mut obs = Recorder::default();

        s.start(&mut obs);
        s.on_tick(&mut obs);
        s.submit_guess("echo", &mut obs);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("easy,echo,solved,1,1"));
    }
}
