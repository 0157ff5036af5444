use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;

use crate::error::MirrorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Timestep {
    #[default]
    Daily,
    Monthly,
}

impl Timestep {
    /// Path segment used by the remote archive: `...-gpcp-{segment}/access/`.
    pub fn remote_segment(self) -> &'static str {
        match self {
            Timestep::Daily => "daily",
            Timestep::Monthly => "monthly",
        }
    }

    /// Directory under `gpcp/data` holding this timestep.
    pub fn local_dir(self) -> &'static str {
        match self {
            Timestep::Daily => "day",
            Timestep::Monthly => "mon",
        }
    }

    /// Dataset version directory mirrored for this timestep.
    pub fn version(self) -> &'static str {
        match self {
            Timestep::Daily => "v1-3",
            Timestep::Monthly => "v2-3",
        }
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remote_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Year(String);

impl Year {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Anchor text prefix of this year's subdirectories on the index page.
    pub fn subdir_prefix(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = MirrorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = normalized.len() == 4 && normalized.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(MirrorError::InvalidYear(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

/// Creation timestamp embedded in a data file name (`c20170530`).
///
/// Field order matters for the derived ordering: stamps that parse as a
/// datetime compare chronologically, ties fall back to the raw text, and
/// stamps that do not parse sort below every parsed one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CreationStamp {
    parsed: Option<NaiveDateTime>,
    raw: String,
}

impl CreationStamp {
    pub fn new(raw: &str) -> Self {
        Self {
            parsed: parse_stamp(raw),
            raw: raw.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.parsed
    }
}

fn parse_stamp(raw: &str) -> Option<NaiveDateTime> {
    let digits = raw.strip_prefix('c').unwrap_or(raw);
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    match digits.len() {
        8 => NaiveDate::parse_from_str(digits, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        14 => NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").ok(),
        _ => None,
    }
}

/// A GPCP file name split into the fields used for reconciliation,
/// e.g. `gpcp_v01r03_daily_d19961001_c20170530.nc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileName {
    name: String,
    day_id: String,
    created: CreationStamp,
}

impl DataFileName {
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Second-to-last underscore field: the day the data covers.
    pub fn day_id(&self) -> &str {
        &self.day_id
    }

    /// Last underscore field, extension stripped.
    pub fn created(&self) -> &CreationStamp {
        &self.created
    }
}

impl fmt::Display for DataFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for DataFileName {
    type Err = MirrorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stem = value.strip_suffix(".nc").unwrap_or(value);
        let fields = stem.split('_').collect::<Vec<_>>();
        let [.., day_id, created] = fields.as_slice() else {
            return Err(MirrorError::MalformedFileName(value.to_string()));
        };
        if day_id.is_empty() || created.is_empty() {
            return Err(MirrorError::MalformedFileName(value.to_string()));
        }
        Ok(Self {
            name: value.to_string(),
            day_id: day_id.to_string(),
            created: CreationStamp::new(created),
        })
    }
}
