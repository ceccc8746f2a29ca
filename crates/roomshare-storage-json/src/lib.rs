//! roomshare-storage-json
//!
//! Filesystem-backed JSON persistence for session collections and backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use roomshare_core::{
    storage::{SessionBackupInfo, SessionStorage},
    CoreError,
};
use roomshare_domain::{Expense, Roster, Session, SessionSnapshot, SettlementRecord};

pub const EXPENSES_FILE: &str = "expenses.json";
pub const ROSTER_FILE: &str = "roommates.json";
pub const SETTLEMENTS_FILE: &str = "settlements.json";

const JSON_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "session";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const BACKUP_SEQUENCE_MARK: char = '~';
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Directories used by [`JsonSessionStorage`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub session_root: PathBuf,
    pub backup_root: PathBuf,
}

/// Stores each session collection in its own JSON file.
#[derive(Clone)]
pub struct JsonSessionStorage {
    session_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonSessionStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.session_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            session_dir: paths.session_root,
            backups_dir: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn collection_path(&self, file_name: &str) -> PathBuf {
        self.session_dir.join(file_name)
    }

    pub fn delete_backup(&self, backup_id: &str) -> Result<(), CoreError> {
        let path = self.backups_dir.join(backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn load_collection<T>(
        &self,
        file_name: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.collection_path(file_name);
        if !path.exists() {
            debug!(path = %path.display(), "collection missing; using default");
            return Ok(default());
        }
        read_json(&path)
    }

    fn save_collection<T>(&self, file_name: &str, value: &T) -> Result<(), CoreError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.collection_path(file_name);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "collection saved");
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            debug!(backup = %entry.id, "pruning backup");
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl SessionStorage for JsonSessionStorage {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError> {
        self.load_collection(EXPENSES_FILE, Vec::new)
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        self.save_collection(EXPENSES_FILE, expenses)
    }

    fn load_roster(&self) -> Result<Roster, CoreError> {
        self.load_collection(ROSTER_FILE, Roster::default)
    }

    fn save_roster(&self, roster: &Roster) -> Result<(), CoreError> {
        self.save_collection(ROSTER_FILE, roster)
    }

    fn load_settlements(&self) -> Result<Vec<SettlementRecord>, CoreError> {
        self.load_collection(SETTLEMENTS_FILE, Vec::new)
    }

    fn save_settlements(&self, settlements: &[SettlementRecord]) -> Result<(), CoreError> {
        self.save_collection(SETTLEMENTS_FILE, settlements)
    }

    fn backup_session(
        &self,
        session: &Session,
        note: Option<&str>,
    ) -> Result<SessionBackupInfo, CoreError> {
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", BACKUP_PREFIX, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let mut file_name = format!("{}.{}", stem, JSON_EXTENSION);
        let mut sequence = 1u32;
        while self.backups_dir.join(&file_name).exists() {
            sequence += 1;
            file_name = format!(
                "{}{}{}.{}",
                stem, BACKUP_SEQUENCE_MARK, sequence, JSON_EXTENSION
            );
        }
        let path = self.backups_dir.join(&file_name);
        let snapshot = SessionSnapshot::capture(session, note);
        write_atomic(&path, &serde_json::to_string_pretty(&snapshot)?)?;
        info!(backup = %file_name, "session backup written");
        self.prune_backups()?;
        Ok(SessionBackupInfo {
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn list_backups(&self) -> Result<Vec<SessionBackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(JSON_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                if !file_name.starts_with(BACKUP_PREFIX) {
                    continue;
                }
                entries.push(SessionBackupInfo {
                    id: file_name.to_string(),
                    created_at: backup_timestamp_label(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| {
            Reverse(parse_backup_timestamp(&a.id))
                .cmp(&Reverse(parse_backup_timestamp(&b.id)))
                .then_with(|| backup_sequence(&b.id).cmp(&backup_sequence(&a.id)))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    fn restore_backup(&self, backup: &SessionBackupInfo) -> Result<Session, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::BackupNotFound(backup.id.clone()));
        }
        let snapshot: SessionSnapshot = read_json(&backup.path)?;
        self.save_session(&snapshot.session)?;
        info!(backup = %backup.id, "session restored from backup");
        Ok(snapshot.session)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Splits `session_<date>_<time>[_note][~N].json` into its stem and the
/// sequence number given to backups taken within the same minute.
fn backup_stem(name: &str) -> Option<(&str, u32)> {
    let stem = name.strip_suffix(&format!(".{}", JSON_EXTENSION))?;
    match stem.rsplit_once(BACKUP_SEQUENCE_MARK) {
        Some((base, raw)) => match raw.parse() {
            Ok(sequence) => Some((base, sequence)),
            Err(_) => Some((stem, 1)),
        },
        None => Some((stem, 1)),
    }
}

fn backup_sequence(name: &str) -> u32 {
    backup_stem(name).map(|(_, sequence)| sequence).unwrap_or(1)
}

/// Extracts `YYYYmmdd_HHMM` from a backup file name.
fn backup_timestamp_parts(name: &str) -> Option<(&str, &str)> {
    let (trimmed, _) = backup_stem(name)?;
    let mut segments = trimmed.split('_').skip(1);
    let date = segments.next()?;
    let time = segments.next()?;
    if is_digits(date, 8) && is_digits(time, 4) {
        Some((date, time))
    } else {
        None
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let (date, time) = backup_timestamp_parts(name)?;
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn backup_timestamp_label(name: &str) -> String {
    backup_timestamp_parts(name)
        .map(|(date, time)| format!("{}_{}", date, time))
        .unwrap_or_else(|| name.to_string())
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
