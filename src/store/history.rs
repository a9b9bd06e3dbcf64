//! File-backed history storage

use super::traits::HistoryStore;
use std::io::ErrorKind;
use std::path::PathBuf;

/// History persisted as one JSON file
///
/// The file plays the role the browser's local storage plays for a web
/// client: one key, overwritten wholesale on every save.
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.banter/history.json`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".banter").join("history.json")
    }
}

impl HistoryStore for FileHistory {
    fn load(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.to_string()),
        }
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        std::fs::write(&self.path, raw).map_err(|e| e.to_string())
    }

    fn clear(&self) -> Result<(), String> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let history = FileHistory::new(dir.path().join("history.json"));
        assert_eq!(history.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let history = FileHistory::new(dir.path().join("nested").join("history.json"));

        history.save(r#"[{"text":"hi","sender":"user"}]"#).unwrap();
        assert_eq!(
            history.load().unwrap().as_deref(),
            Some(r#"[{"text":"hi","sender":"user"}]"#)
        );

        history.save("[]").unwrap();
        assert_eq!(history.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_clear_removes_value() {
        let dir = tempfile::tempdir().unwrap();
        let history = FileHistory::new(dir.path().join("history.json"));

        history.save("[]").unwrap();
        history.clear().unwrap();
        assert_eq!(history.load().unwrap(), None);

        // Clearing an absent value is fine
        history.clear().unwrap();
    }
}
