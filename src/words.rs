use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

static WORDLIST_DIR: Dir = include_dir!("src/wordlists");

const DEFAULT_LIST: &str = "english.json";

/// Last-resort word list, used when both the external file and the
/// embedded list come up empty after filtering.
const FALLBACK_WORDS: &[&str] = &[
    "cat", "dog", "sun", "map", "ice", "tree", "fish", "bird", "star", "moon", "lake", "apple",
    "bread", "chair", "cloud", "house", "light", "music", "paper", "plant", "river", "stone",
    "table", "water", "basket", "bridge", "camera", "flower", "garden", "island", "jungle",
    "kitten", "letter", "market", "orange", "pillow", "rocket", "silver", "window", "blanket",
    "caravan", "diamond", "evening", "factory", "harvest", "lantern", "monsoon", "orchard",
    "painter", "rainbow", "thunder", "village", "whistle", "mountain", "sandwich", "starlight",
    "telescope", "adventure", "chocolate", "waterfall",
];

/// One playable word plus its optional category tag.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub word: String,
    pub category: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            category: None,
        }
    }
}

/// Supplier of candidate words filtered by length bounds.
///
/// Implementations never fail: network/parse/file problems degrade to a
/// fallback list, and the worst case is an empty Vec, which the round
/// machine treats as fatal for the round.
pub trait WordSource {
    fn fetch_words(&mut self, min_len: usize, max_len: usize) -> Vec<WordEntry>;

    /// Drop any cached result. Called when the difficulty (and thus the
    /// length bounds) changes, so no stale cross-difficulty entries leak
    /// into the next round.
    fn invalidate(&mut self) {}
}

/// Production word source: an optional external word file, the embedded
/// default list, and a static fallback, tried in that order. Caches the
/// last successful filtered result keyed by the length bounds.
#[derive(Debug, Default)]
pub struct Lexicon {
    path: Option<PathBuf>,
    cache: Option<((usize, usize), Vec<WordEntry>)>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an external word file instead of the embedded list.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            cache: None,
        }
    }

    fn load_external(&self, min_len: usize, max_len: usize) -> Option<Vec<WordEntry>> {
        let path = self.path.as_ref()?;
        let raw = fs::read_to_string(path).ok()?;
        let entries = parse_word_records(&raw, min_len, max_len)?;
        if entries.is_empty() {
            None
        } else {
            Some(entries)
        }
    }

    fn load_embedded(min_len: usize, max_len: usize) -> Option<Vec<WordEntry>> {
        let file = WORDLIST_DIR.get_file(DEFAULT_LIST)?;
        let raw = file.contents_utf8()?;
        let entries = parse_word_records(raw, min_len, max_len)?;
        if entries.is_empty() {
            None
        } else {
            Some(entries)
        }
    }

    fn load_fallback(min_len: usize, max_len: usize) -> Vec<WordEntry> {
        filter_entries(
            FALLBACK_WORDS.iter().map(|w| WordEntry::new(*w)),
            min_len,
            max_len,
        )
    }
}

impl WordSource for Lexicon {
    fn fetch_words(&mut self, min_len: usize, max_len: usize) -> Vec<WordEntry> {
        if let Some(((lo, hi), entries)) = &self.cache {
            if (*lo, *hi) == (min_len, max_len) {
                return entries.clone();
            }
        }

        let entries = self
            .load_external(min_len, max_len)
            .or_else(|| Self::load_embedded(min_len, max_len))
            .unwrap_or_else(|| Self::load_fallback(min_len, max_len));

        if !entries.is_empty() {
            self.cache = Some(((min_len, max_len), entries.clone()));
        }
        entries
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }
}

/// Parse the positional word-record format: a JSON array of
/// `[word, _unused, category?]` rows. Only indices 0 and 2 are consumed.
/// Returns None on a malformed document (callers fall through to the
/// next tier); individual malformed rows are skipped.
fn parse_word_records(raw: &str, min_len: usize, max_len: usize) -> Option<Vec<WordEntry>> {
    let rows: Vec<Value> = serde_json::from_str(raw).ok()?;
    let entries = rows.iter().filter_map(|row| {
        let fields = row.as_array()?;
        let word = fields.first()?.as_str()?;
        let category = fields
            .get(2)
            .and_then(Value::as_str)
            .map(|c| c.to_string());
        Some(WordEntry {
            word: word.to_string(),
            category,
        })
    });
    Some(filter_entries(entries, min_len, max_len))
}

/// Keep letters-only words within the length bounds, dropping duplicates
/// case-insensitively (first occurrence wins, order preserved).
fn filter_entries(
    entries: impl Iterator<Item = WordEntry>,
    min_len: usize,
    max_len: usize,
) -> Vec<WordEntry> {
    entries
        .filter(|e| {
            let len = e.word.chars().count();
            len >= min_len && len <= max_len && is_letters_only(&e.word)
        })
        .unique_by(|e| e.word.to_lowercase())
        .collect()
}

fn is_letters_only(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}
