use shared_types::ApplicantRecord;
use std::path::PathBuf;
use std::sync::Mutex;

/// On-device copy of the record set, one JSON array in a file. This is the
/// fallback read source when the server is unreachable, refreshed after every
/// successful remote call. Mirror trouble is never fatal: a read problem is
/// an empty list, a write problem is a logged warning.
pub struct Mirror {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Mirror {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// `~/.local/share/qrhire/applicants.json` (platform equivalents apply),
    /// the same layout the historical local-storage entry used.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
        Ok(data_dir.join("qrhire").join("applicants.json"))
    }

    pub fn load(&self) -> Vec<ApplicantRecord> {
        let _guard = self.locked();
        if !self.path.exists() {
            return Vec::new();
        }
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read mirror {:?}: {}", self.path, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Corrupt mirror {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    pub fn replace(&self, records: &[ApplicantRecord]) {
        let _guard = self.locked();
        let raw = match serde_json::to_string_pretty(records) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode mirror: {}", e);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create mirror directory: {}", e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::warn!("Failed to write mirror {:?}: {}", self.path, e);
        }
    }

    pub fn append(&self, record: &ApplicantRecord) {
        let mut records = self.load();
        records.push(record.clone());
        self.replace(&records);
    }

    pub fn remove(&self, id: &str) {
        let mut records = self.load();
        records.retain(|r| r.id != id);
        self.replace(&records);
    }

    pub fn clear(&self) {
        self.replace(&[]);
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = Mirror::new(dir.path().join("applicants.json"));
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn append_remove_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = Mirror::new(dir.path().join("applicants.json"));

        let a = record("a", "Jane");
        let b = record("b", "John");
        mirror.append(&a);
        mirror.append(&b);
        assert_eq!(mirror.load().len(), 2);

        mirror.remove("a");
        let left = mirror.load();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "b");

        mirror.clear();
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applicants.json");
        std::fs::write(&path, "{not json").unwrap();

        let mirror = Mirror::new(path);
        assert!(mirror.load().is_empty());
    }
}
