use chrono::prelude::*;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// One resolved round, as written to the history log.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub difficulty: String,
    pub word: String,
    pub solved: bool,
    pub seconds_used: u32,
    pub score: u32,
}

/// Append-only CSV history of played rounds.
///
/// Strictly best-effort: the session swallows journaling errors so a
/// read-only home directory never breaks gameplay.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Journal at the default per-user location, or None when no home
    /// directory can be resolved.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("", "", "jumbl")?;
        Some(Self {
            path: proj_dirs.config_dir().join("rounds.csv"),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, record: &RoundRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let mut log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        if needs_header {
            writeln!(log_file, "date,difficulty,word,outcome,seconds_used,score")?;
        }

        writeln!(
            log_file,
            "{},{},{},{},{},{}",
            Local::now().format("%c"),
            record.difficulty,
            record.word,
            if record.solved { "solved" } else { "timeout" },
            record.seconds_used,
            record.score,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(word: &str, solved: bool) -> RoundRecord {
        RoundRecord {
            difficulty: "medium".into(),
            word: word.into(),
            solved,
            seconds_used: 12,
            score: 3,
        }
    }

    #[test]
    fn test_first_append_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.csv");
        let journal = Journal::with_path(&path);

        journal.append(&record("apple", true)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,difficulty,word,outcome,seconds_used,score"
        );
        let row = lines.next().unwrap();
        assert!(row.contains(",medium,apple,solved,12,3"));
    }

    #[test]
    fn test_subsequent_appends_skip_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.csv");
        let journal = Journal::with_path(&path);

        journal.append(&record("apple", true)).unwrap();
        journal.append(&record("mango", false)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("mango,timeout"));
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("rounds.csv");
        let journal = Journal::with_path(&path);
        journal.append(&record("pear", true)).unwrap();
        assert!(path.exists());
    }
}
