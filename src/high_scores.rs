use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

const APP_DIR_NAME: &str = "torus-snake";
const SCORE_FILE_NAME: &str = "high_scores.txt";

/// Number of entries kept in the table.
pub const MAX_ENTRIES: usize = 10;

/// Maximum length of the initials field.
pub const MAX_INITIALS: usize = 3;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// One ranked result.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HighScoreEntry {
    pub score: u32,
    pub initials: String,
}

impl HighScoreEntry {
    #[must_use]
    pub fn new(score: u32, initials: &str) -> Self {
        Self {
            score,
            initials: sanitize_initials(initials),
        }
    }

    fn placeholder() -> Self {
        Self::new(0, "")
    }
}

/// Keeps uppercase ASCII letters and digits, at most three of them.
#[must_use]
pub fn sanitize_initials(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_INITIALS)
        .collect()
}

/// Top-10 table, sorted by descending score.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::placeholders()
    }
}

impl HighScores {
    /// Ten zero-score rows, the state of a fresh install.
    #[must_use]
    pub fn placeholders() -> Self {
        Self {
            entries: vec![HighScoreEntry::placeholder(); MAX_ENTRIES],
        }
    }

    /// Builds a table from arbitrary entries, sorting and truncating them.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Returns true when `score` would earn a place in the table.
    #[must_use]
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_ENTRIES
            || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Inserts a result, re-sorts and drops everything past the tenth entry.
    ///
    /// A new entry ranks below existing entries with the same score.
    pub fn submit(&mut self, score: u32, initials: &str) -> &[HighScoreEntry] {
        self.entries.push(HighScoreEntry::new(score, initials));
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        &self.entries
    }

    /// Best score in the table, zero when empty.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    /// One `score,initials` line per entry.
    #[must_use]
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("{},{}\n", entry.score, entry.initials));
        }
        out
    }

    /// Parses the line format. Lines holding only a score are accepted with
    /// empty initials; malformed lines are skipped with a warning. Returns
    /// `None` when no valid line remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut entries = Vec::new();
        for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (score, initials) = line.split_once(',').unwrap_or((line, ""));
            match score.trim().parse::<u32>() {
                Ok(score) => entries.push(HighScoreEntry::new(score, initials.trim())),
                Err(_) => warn!("skipping malformed high score line {line:?}"),
            }
        }

        if entries.is_empty() {
            return None;
        }

        Some(Self::from_entries(entries))
    }
}

/// File-backed high-score table.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform data directory.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the table.
    ///
    /// A missing file is created with placeholder rows; a malformed one is
    /// logged and overwritten with placeholders. Only I/O failures are errors.
    pub fn load(&self) -> Result<HighScores, HighScoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let scores = HighScores::placeholders();
                self.save(&scores)?;
                return Ok(scores);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => String::new(),
            Err(e) => return Err(e.into()),
        };

        match HighScores::parse(&raw) {
            Some(scores) => Ok(scores),
            None => {
                warn!(
                    "malformed high score file {}, resetting it",
                    self.path.display()
                );
                let scores = HighScores::placeholders();
                self.save(&scores)?;
                Ok(scores)
            }
        }
    }

    /// Writes the table, creating parent directories when needed.
    pub fn save(&self, scores: &HighScores) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, scores.to_lines())?;
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreEntry, HighScoreStore, HighScores, MAX_ENTRIES, sanitize_initials};

    fn full_table() -> HighScores {
        HighScores::from_entries(
            (0..10)
                .map(|i| HighScoreEntry::new(40 + i * 10, "ZZZ"))
                .collect(),
        )
    }

    #[test]
    fn submit_into_full_table_drops_lowest() {
        let mut scores = full_table();
        assert_eq!(scores.entries().last().map(|e| e.score), Some(40));
        assert!(scores.qualifies(50));

        scores.submit(50, "AAA");

        let entries = scores.entries();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert!(entries.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(entries.iter().all(|e| e.score != 40));
        // Ties rank the newcomer below the existing 50.
        assert_eq!(entries[8], HighScoreEntry::new(50, "ZZZ"));
        assert_eq!(entries[9], HighScoreEntry::new(50, "AAA"));
    }

    #[test]
    fn score_not_above_lowest_does_not_qualify() {
        let scores = full_table();

        assert!(!scores.qualifies(40));
        assert!(!HighScores::placeholders().qualifies(0));
        assert!(HighScores::placeholders().qualifies(1));
    }

    #[test]
    fn initials_are_sanitized() {
        assert_eq!(sanitize_initials("ab,cd"), "ABC");
        assert_eq!(sanitize_initials(" x "), "X");
        assert_eq!(sanitize_initials(""), "");
    }

    #[test]
    fn legacy_score_only_lines_parse() {
        let scores = HighScores::parse("12\n40\n0\n").expect("legacy format should parse");

        assert_eq!(scores.best(), 40);
        assert_eq!(scores.entries()[1], HighScoreEntry::new(12, ""));
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!(HighScores::parse("abc,DEF\n").is_none());
        assert!(HighScores::parse("").is_none());
    }

    #[test]
    fn one_bad_line_keeps_the_rest() {
        let scores =
            HighScores::parse("90,ANN\n??,BOB\n70,CAT\n").expect("valid lines should survive");

        assert_eq!(
            scores.entries(),
            [HighScoreEntry::new(90, "ANN"), HighScoreEntry::new(70, "CAT")]
        );
    }

    #[test]
    fn partly_damaged_file_keeps_valid_entries() {
        let store = HighScoreStore::new(unique_test_path("partly_damaged"));
        if let Some(parent) = store.path().parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        let mut raw = full_table().to_lines();
        raw.push_str("garbage\n");
        fs::write(store.path(), raw).expect("test file write should succeed");

        let loaded = store.load().expect("partly damaged file is not fatal");

        assert_eq!(loaded, full_table());
        cleanup_test_path(store.path());
    }

    #[test]
    fn save_then_load_is_identical() {
        let store = HighScoreStore::new(unique_test_path("round_trip"));
        let mut scores = full_table();
        scores.submit(55, "JOE");
        scores.submit(120, "");

        store.save(&scores).expect("save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, scores);
        cleanup_test_path(store.path());
    }

    #[test]
    fn missing_file_is_created_with_placeholders() {
        let store = HighScoreStore::new(unique_test_path("missing"));

        let loaded = store.load().expect("missing file should be created");

        assert_eq!(loaded, HighScores::placeholders());
        let raw = fs::read_to_string(store.path()).expect("file should exist now");
        assert_eq!(raw.lines().count(), MAX_ENTRIES);
        assert!(raw.lines().all(|line| line == "0,"));
        cleanup_test_path(store.path());
    }

    #[test]
    fn malformed_file_is_reset() {
        let store = HighScoreStore::new(unique_test_path("malformed"));
        if let Some(parent) = store.path().parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(store.path(), "not,a\nscore file").expect("test file write should succeed");

        let loaded = store.load().expect("malformed file is not fatal");

        assert_eq!(loaded, HighScores::placeholders());
        cleanup_test_path(store.path());
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("torus-snake-score-tests")
            .join(format!("{label}-{nanos}.txt"))
    }

    fn cleanup_test_path(path: &std::path::Path) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
