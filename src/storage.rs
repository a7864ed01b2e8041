use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    domain::{HabitList, HistoryRecord},
    error::{PentadError, Result},
};

pub const HISTORY_FILE: &str = "habits.json";
pub const HABIT_CONFIG_FILE: &str = "habit_config.json";

pub fn get_data_dir() -> PathBuf {
    let local_history = Path::new("./habits.json");
    let local_config = Path::new("./habit_config.json");
    if local_history.exists() || local_config.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "pentad", "pentad") {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn history_path() -> PathBuf {
    get_data_dir().join(HISTORY_FILE)
}

pub fn habit_config_path() -> PathBuf {
    get_data_dir().join(HABIT_CONFIG_FILE)
}

/// Loads the per-date history. A missing file is an empty history, and an
/// unparsable one loads as empty with a warning; the bad bytes stay on disk
/// until the next log rotates them into a backup.
pub fn load_history(path: &Path) -> Result<HistoryRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Ok(HistoryRecord::new());
        }
        Err(source) => return Err(persistence_error(path, source)),
    };

    match serde_json::from_str(&content) {
        Ok(record) => Ok(record),
        Err(e) => {
            eprintln!("Warning: could not parse {}: {}", path.display(), e);
            Ok(HistoryRecord::new())
        }
    }
}

pub fn save_history(path: &Path, record: &HistoryRecord) -> Result<()> {
    write_json_atomic(path, record)
}

pub fn load_habit_config(path: &Path) -> Result<HabitList> {
    if !path.exists() {
        return Err(PentadError::Configuration(format!(
            "no habit list configured at {}; run 'pentad init <names>' first",
            path.display()
        )));
    }

    let names: Vec<String> = match read_json(path) {
        Ok(names) => names,
        Err(PentadError::Encoding { path, source }) => {
            return Err(PentadError::Configuration(format!(
                "invalid habit config {}: {}",
                path.display(),
                source
            )));
        }
        Err(other) => return Err(other),
    };

    HabitList::new(names)
}

pub fn save_habit_config(path: &Path, habits: &HabitList) -> Result<()> {
    let names = habits.names().to_vec();
    write_json_atomic(path, &names)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| persistence_error(path, source))?;
    serde_json::from_str(&content).map_err(|source| PentadError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| PentadError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json)
}

pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| persistence_error(path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| persistence_error(path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| persistence_error(path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| persistence_error(path, e))?;
    Ok(())
}

pub fn create_backup(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| persistence_error(path, e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| persistence_error(path, e))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        while backups.len() > 10 {
            if let Some(oldest) = backups.first() {
                let _ = fs::remove_file(oldest.path());
                backups.remove(0);
            }
        }
    }

    Ok(())
}

fn persistence_error(path: &Path, source: io::Error) -> PentadError {
    PentadError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::SystemTime};

    use super::*;

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = PathBuf::from(format!("/tmp/{}_{}", prefix, now));
        fs::create_dir_all(&dir).unwrap();
        dir.join(format!("data.{}", extension))
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_history_round_trip() {
        let path = unique_path("pentad_history_roundtrip", "json");
        let mut record = HistoryRecord::new();
        record.insert(
            "2024-06-10".to_string(),
            vec!["Reading".to_string(), "Exercise".to_string()],
        );
        record.insert("2024-06-11".to_string(), vec![]);

        save_history(&path, &record).unwrap();
        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded, record);

        save_history(&path, &loaded).unwrap();
        assert_eq!(load_history(&path).unwrap(), record);

        cleanup(&path);
    }

    #[test]
    fn test_missing_history_loads_empty() {
        let path = unique_path("pentad_history_missing", "json");
        let loaded = load_history(&path).unwrap();
        assert!(loaded.is_empty());
        cleanup(&path);
    }

    #[test]
    fn test_unparsable_history_loads_empty() {
        let path = unique_path("pentad_history_garbage", "json");
        fs::write(&path, "not json at all {").unwrap();
        let loaded = load_history(&path).unwrap();
        assert!(loaded.is_empty());
        cleanup(&path);
    }

    #[test]
    fn test_empty_day_record_is_distinct_from_absent() {
        let path = unique_path("pentad_history_empty_day", "json");
        let mut record = HistoryRecord::new();
        record.insert("2024-06-12".to_string(), vec![]);

        save_history(&path, &record).unwrap();
        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded.get("2024-06-12"), Some(&Vec::new()));
        assert_eq!(loaded.get("2024-06-13"), None);

        cleanup(&path);
    }

    #[test]
    fn test_habit_config_round_trip() {
        let path = unique_path("pentad_config_roundtrip", "json");
        let habits = HabitList::new(vec!["A".to_string(), "B".to_string()]).unwrap();

        save_habit_config(&path, &habits).unwrap();
        let loaded = load_habit_config(&path).unwrap();
        assert_eq!(loaded.names(), habits.names());

        cleanup(&path);
    }

    #[test]
    fn test_missing_habit_config_is_configuration_error() {
        let path = unique_path("pentad_config_missing", "json");
        match load_habit_config(&path) {
            Err(PentadError::Configuration(message)) => {
                assert!(message.contains("pentad init"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
        cleanup(&path);
    }

    #[test]
    fn test_invalid_habit_config_is_configuration_error() {
        let path = unique_path("pentad_config_invalid", "json");
        fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        assert!(matches!(
            load_habit_config(&path),
            Err(PentadError::Configuration(_))
        ));
        cleanup(&path);
    }

    #[test]
    fn test_atomic_write_replaces_contents() {
        let path = unique_path("pentad_atomic", "json");
        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        cleanup(&path);
    }
}
