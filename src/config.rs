use camino::Utf8PathBuf;
use reqwest::Url;

use crate::domain::{Timestep, Year};
use crate::error::MirrorError;

pub const DEFAULT_ROOT_DIR: &str = "/g/data/ia39/aus-ref-clim-data-nci";
pub const ROOT_DIR_VAR: &str = "AUSREFDIR";
pub const USER_VAR: &str = "USER";

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub year: Year,
    pub timestep: Timestep,
    pub root_dir: Utf8PathBuf,
    pub user: String,
    pub base_url: Url,
}

impl MirrorConfig {
    pub fn from_env(year: Year, timestep: Timestep) -> Result<Self, MirrorError> {
        Self::from_lookup(year, timestep, |key| std::env::var(key).ok())
    }

    /// Builds the config reading environment variables through `lookup`.
    pub fn from_lookup<F>(year: Year, timestep: Timestep, lookup: F) -> Result<Self, MirrorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root_dir = lookup(ROOT_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_ROOT_DIR));
        let user = lookup(USER_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let base_url = base_url(timestep)?;

        Ok(Self {
            year,
            timestep,
            root_dir,
            user,
            base_url,
        })
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

pub fn base_url(timestep: Timestep) -> Result<Url, MirrorError> {
    let raw = format!(
        "https://www.ncei.noaa.gov/data/global-precipitation-climatology-project-gpcp-{}/access/",
        timestep.remote_segment()
    );
    Url::parse(&raw).map_err(|err| MirrorError::InvalidBaseUrl(format!("{raw}: {err}")))
}
