//! Durable per-chat settings.
//!
//! On disk this is a single JSON document:
//!
//! ```json
//! { "delete_original_by_chat": { "-1001234567890": true } }
//! ```
//!
//! Loaded once at startup; rewritten atomically (temp file + rename) on
//! every change. Unreadable files degrade to "no flags set".

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cleanlinks_core::error::Result;
use cleanlinks_core::outbound::ChatModes;
use cleanlinks_core::types::ChatId;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    delete_original_by_chat: BTreeMap<String, bool>,
}

/// Per-chat delete-original flags, persisted to `path`.
pub struct ChatSettings {
    path: PathBuf,
    delete_original: Mutex<HashMap<ChatId, bool>>,
}

impl ChatSettings {
    /// Load settings from `path`.
    ///
    /// A missing file is normal on first start. A file that cannot be read
    /// or parsed is logged and treated as empty; it is left on disk until
    /// the next successful save replaces it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let flags = match read_file(&path) {
            Ok(Some(file)) => parse_flags(file),
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings unreadable, starting empty");
                HashMap::new()
            }
        };
        info!(path = %path.display(), chats = flags.len(), "chat settings loaded");
        Self {
            path,
            delete_original: Mutex::new(flags),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the delete-original flag for `chat` and persist it.
    ///
    /// The in-memory flag only changes once the file has been written, so a
    /// failed save leaves both disk and memory as they were.
    pub fn set_delete_original(&self, chat: ChatId, enabled: bool) -> Result<()> {
        let mut flags = self.delete_original.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = flags.clone();
        next.insert(chat, enabled);
        if let Err(e) = write_file(&self.path, &to_file(&next)) {
            warn!(path = %self.path.display(), %chat, error = %e, "failed to save chat settings");
            return Err(e);
        }

        *flags = next;
        info!(%chat, enabled, "delete-original mode updated");
        Ok(())
    }
}

impl ChatModes for ChatSettings {
    fn delete_original(&self, chat: ChatId) -> bool {
        self.delete_original
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chat)
            .copied()
            .unwrap_or(false)
    }
}

fn read_file(path: &Path) -> Result<Option<SettingsFile>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

fn parse_flags(file: SettingsFile) -> HashMap<ChatId, bool> {
    file.delete_original_by_chat
        .into_iter()
        .filter_map(|(key, enabled)| match key.trim().parse::<i64>() {
            Ok(id) => Some((ChatId(id), enabled)),
            Err(_) => {
                warn!(key = %key, "ignoring non-numeric chat id in settings");
                None
            }
        })
        .collect()
}

fn to_file(flags: &HashMap<ChatId, bool>) -> SettingsFile {
    SettingsFile {
        delete_original_by_chat: flags
            .iter()
            .map(|(chat, enabled)| (chat.0.to_string(), *enabled))
            .collect(),
    }
}

/// Write `file` next to `path` and rename it into place.
fn write_file(path: &Path, file: &SettingsFile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let json = serde_json::to_string_pretty(file)?;
    let written = write_and_rename(&tmp, path, json.as_bytes());
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_and_rename(tmp: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let mut f = fs::File::create(tmp)?;
    f.write_all(contents)?;
    f.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_in(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("config.json")
    }

    #[test]
    fn missing_file_means_no_flags() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ChatSettings::load(settings_in(&dir));
        assert!(!settings.delete_original(ChatId(-100)));
    }

    #[test]
    fn corrupt_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_in(&dir);
        fs::write(&path, "{ not json").unwrap();

        let settings = ChatSettings::load(&path);
        assert!(!settings.delete_original(ChatId(-100)));
        // Left in place for inspection.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn existing_document_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_in(&dir);
        fs::write(
            &path,
            r#"{"delete_original_by_chat": {"-1001": true, "-1002": false, "oops": true}}"#,
        )
        .unwrap();

        let settings = ChatSettings::load(&path);
        assert!(settings.delete_original(ChatId(-1001)));
        assert!(!settings.delete_original(ChatId(-1002)));
        assert!(!settings.delete_original(ChatId(-1003)));
    }

    #[test]
    fn toggle_persists_and_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_in(&dir);

        let settings = ChatSettings::load(&path);
        settings.set_delete_original(ChatId(-42), true).unwrap();
        assert!(settings.delete_original(ChatId(-42)));

        let reloaded = ChatSettings::load(&path);
        assert!(reloaded.delete_original(ChatId(-42)));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["delete_original_by_chat"]["-42"], serde_json::json!(true));
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn toggle_off_is_stored_explicitly() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_in(&dir);
        let settings = ChatSettings::load(&path);

        settings.set_delete_original(ChatId(7), true).unwrap();
        settings.set_delete_original(ChatId(7), false).unwrap();

        assert!(!ChatSettings::load(&path).delete_original(ChatId(7)));
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("config.json");
        let settings = ChatSettings::load(&path);

        settings.set_delete_original(ChatId(1), true).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn failed_save_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = settings_in(&dir);
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let settings = ChatSettings::load(&path);
        assert!(settings.set_delete_original(ChatId(5), true).is_err());
        assert!(!settings.delete_original(ChatId(5)));
        assert!(!dir.path().join("config.json.tmp").exists());
    }
}
