use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::MirrorConfig;
use crate::domain::{Timestep, Year};
use crate::error::MirrorError;

pub const REDUNDANT_DIR: &str = "redundant";

/// Local data tree: `<root>/gpcp/data/{day|mon}/<version>/tmp/<year>/`.
#[derive(Debug, Clone)]
pub struct Layout {
    data_dir: Utf8PathBuf,
}

impl Layout {
    pub fn new(root_dir: &Utf8Path, timestep: Timestep) -> Self {
        let data_dir = root_dir
            .join("gpcp")
            .join("data")
            .join(timestep.local_dir())
            .join(timestep.version())
            .join("tmp");
        Self { data_dir }
    }

    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new(&config.root_dir, config.timestep)
    }

    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    pub fn year_dir(&self, year: &Year) -> Utf8PathBuf {
        self.data_dir.join(year.as_str())
    }

    /// Quarantine for superseded duplicates, a sibling of the year directories.
    pub fn redundant_dir(&self) -> Utf8PathBuf {
        self.data_dir.join(REDUNDANT_DIR)
    }

    pub fn local_path(&self, year: &Year, file_name: &str) -> Utf8PathBuf {
        self.year_dir(year).join(file_name)
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    pub fn ensure_year_dir(&self, year: &Year) -> Result<Utf8PathBuf, MirrorError> {
        let dir = self.year_dir(year);
        fs::create_dir_all(dir.as_std_path())
            .map_err(|err| MirrorError::Filesystem(format!("create {dir}: {err}")))?;
        Ok(dir)
    }

    pub fn ensure_redundant_dir(&self) -> Result<Utf8PathBuf, MirrorError> {
        let dir = self.redundant_dir();
        fs::create_dir_all(dir.as_std_path())
            .map_err(|err| MirrorError::Filesystem(format!("create {dir}: {err}")))?;
        Ok(dir)
    }

    /// Names of the regular files directly inside `dir`, sorted.
    pub fn list_files(dir: &Utf8Path) -> Result<Vec<String>, MirrorError> {
        let entries = fs::read_dir(dir.as_std_path())
            .map_err(|err| MirrorError::Filesystem(format!("read {dir}: {err}")))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| MirrorError::Filesystem(err.to_string()))?;
            let file_type = entry
                .file_type()
                .map_err(|err| MirrorError::Filesystem(err.to_string()))?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    tracing::warn!("skipping non-utf8 file name {}", name.to_string_lossy());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
