use std::collections::BTreeMap;
use std::fs;

use crate::domain::{DataFileName, Year};
use crate::error::MirrorError;
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub file_name: String,
    pub day_id: String,
    /// File retained for the same day.
    pub kept: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationPlan {
    pub relocate: Vec<Relocation>,
    /// Names that could not be split into day and creation fields.
    pub malformed: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub relocated: Vec<Relocation>,
    /// Planned moves left in place because the quarantine already holds that name.
    pub skipped: Vec<String>,
    pub malformed: Vec<String>,
}

/// Groups `names` by day-identifier and selects every file but the newest
/// of each group for relocation.
///
/// The newest file is the one with the greatest creation stamp; equal stamps
/// are broken by the full name so the choice does not depend on input order.
pub fn plan_relocations<S: AsRef<str>>(names: &[S]) -> RelocationPlan {
    let mut groups = BTreeMap::<String, Vec<DataFileName>>::new();
    let mut plan = RelocationPlan::default();

    for name in names {
        match name.as_ref().parse::<DataFileName>() {
            Ok(parsed) => groups
                .entry(parsed.day_id().to_string())
                .or_default()
                .push(parsed),
            Err(_) => plan.malformed.push(name.as_ref().to_string()),
        }
    }

    for (day_id, mut files) in groups {
        if files.len() < 2 {
            continue;
        }
        tracing::info!("Found {} files for {day_id}", files.len());
        files.sort_by(|a, b| {
            a.created()
                .cmp(b.created())
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        let Some(newest) = files.pop() else {
            continue;
        };
        plan.relocate.extend(files.into_iter().map(|file| Relocation {
            file_name: file.as_str().to_string(),
            day_id: day_id.clone(),
            kept: newest.as_str().to_string(),
        }));
    }

    plan
}

/// Moves superseded same-day files out of the year directory into the
/// redundant directory. Hidden files (in-flight downloads) are ignored.
pub fn reconcile(layout: &Layout, year: &Year) -> Result<ReconcileReport, MirrorError> {
    let year_dir = layout.year_dir(year);
    if !layout.exists(&year_dir) {
        return Ok(ReconcileReport::default());
    }
    let names = Layout::list_files(&year_dir)?
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .collect::<Vec<_>>();
    let plan = plan_relocations(&names);

    for name in &plan.malformed {
        tracing::warn!("skipping {name}: cannot read day and creation fields");
    }
    let mut report = ReconcileReport {
        malformed: plan.malformed,
        ..ReconcileReport::default()
    };
    if plan.relocate.is_empty() {
        return Ok(report);
    }

    let redundant_dir = layout.ensure_redundant_dir()?;
    for relocation in plan.relocate {
        let source = year_dir.join(&relocation.file_name);
        let target = redundant_dir.join(&relocation.file_name);
        if layout.exists(&target) {
            tracing::warn!(
                "{} already present in {redundant_dir}, leaving it in place",
                relocation.file_name
            );
            report.skipped.push(relocation.file_name);
            continue;
        }
        fs::rename(source.as_std_path(), target.as_std_path())
            .map_err(|err| MirrorError::Filesystem(format!("move {source}: {err}")))?;
        tracing::info!(
            "Moved {} to redundant directory (keeping {})",
            relocation.file_name,
            relocation.kept
        );
        report.relocated.push(relocation);
    }

    Ok(report)
}
