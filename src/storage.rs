use crate::model::Workspace;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un workspace depuis un support.
    fn load(&self) -> anyhow::Result<Workspace>;
    /// Sauvegarde de manière atomique.
    fn save(&self, ws: &Workspace) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Charge le workspace, ou un workspace vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Workspace> {
        if !self.exists() {
            return Ok(Workspace::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Workspace> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let ws: Workspace = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(ws)
    }

    fn save(&self, ws: &Workspace) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(ws)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;

    #[test]
    fn save_then_load_keeps_roster() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("ws.json")).unwrap();
        assert!(storage.load_or_default().unwrap().employees.is_empty());

        let mut ws = Workspace::default();
        ws.employees.push(Employee::new("Martin", "Alice"));
        storage.save(&ws).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.employees, ws.employees);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws.json");
        fs::write(&path, "{ not json").unwrap();
        let storage = JsonStorage::open(&path).unwrap();
        assert!(storage.load_or_default().is_err());
    }
}
