use clap::ValueEnum;

/// Named difficulty level, fixed set selectable on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The level that follows this one, wrapping around. Used by the
    /// in-game difficulty cycling key.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}

/// Parameter bundle behind a difficulty level. Immutable; every level maps
/// to exactly one of the three static profiles below.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyProfile {
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub time_limit_secs: u32,
    /// Shuffle intensity multiplier, ≥ 0. Scales the number of shuffle
    /// passes (or middle swaps in preserve mode) with the word length.
    pub scramble_complexity: f64,
    /// Keep the first and last letter in place (only when length > 3).
    pub preserve_first_last: bool,
    /// Apply a final burst of random pairwise swaps on top of the shuffle.
    pub extra_scrambling: bool,
}

static EASY: DifficultyProfile = DifficultyProfile {
    min_word_length: 3,
    max_word_length: 5,
    time_limit_secs: 60,
    scramble_complexity: 0.5,
    preserve_first_last: true,
    extra_scrambling: false,
};

static MEDIUM: DifficultyProfile = DifficultyProfile {
    min_word_length: 4,
    max_word_length: 7,
    time_limit_secs: 45,
    scramble_complexity: 1.0,
    preserve_first_last: false,
    extra_scrambling: false,
};

static HARD: DifficultyProfile = DifficultyProfile {
    min_word_length: 6,
    max_word_length: 12,
    time_limit_secs: 30,
    scramble_complexity: 2.0,
    preserve_first_last: false,
    extra_scrambling: true,
};
