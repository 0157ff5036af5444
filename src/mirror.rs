use std::time::Instant;

use crate::config::MirrorConfig;
use crate::domain::Year;
use crate::error::MirrorError;
use crate::layout::Layout;
use crate::listing::{FileFetcher, RemoteIndex, remote_file_url};
use crate::reconcile::{self, ReconcileReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    pub year: String,
    pub subdirs: usize,
    pub downloaded: Vec<String>,
    pub already_present: usize,
    pub failed: Vec<FailedFile>,
    pub reconcile: ReconcileReport,
}

impl MirrorReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Mirror<I: RemoteIndex, F: FileFetcher> {
    config: MirrorConfig,
    layout: Layout,
    index: I,
    fetcher: F,
}

impl<I: RemoteIndex, F: FileFetcher> Mirror<I, F> {
    pub fn new(config: MirrorConfig, index: I, fetcher: F) -> Self {
        let layout = Layout::from_config(&config);
        Self {
            config,
            layout,
            index,
            fetcher,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Downloads the year's missing files, then reconciles same-day duplicates.
    ///
    /// Only a failure to read the top-level index or the local tree aborts
    /// the run; individual subdirectory and file failures are recorded in the
    /// report and the batch continues.
    pub fn run(&self) -> Result<MirrorReport, MirrorError> {
        let year = &self.config.year;
        let today = chrono::Local::now().format("%Y-%m-%d");
        tracing::info!("Updated on {today} by {}", self.config.user);
        tracing::info!("Downloading files for {year}");

        let mut report = MirrorReport {
            year: year.to_string(),
            ..MirrorReport::default()
        };
        self.sync(year, &mut report)?;

        tracing::info!("Checking for redundant files");
        report.reconcile = reconcile::reconcile(&self.layout, year)?;
        tracing::info!("Download is complete");
        Ok(report)
    }

    fn sync(&self, year: &Year, report: &mut MirrorReport) -> Result<(), MirrorError> {
        self.layout.ensure_year_dir(year)?;

        let subdirs = self.index.year_subdirs(year)?;
        if subdirs.is_empty() {
            tracing::warn!(
                "no {} entry on {}; nothing to download",
                year.subdir_prefix(),
                self.config.base_url
            );
        }
        report.subdirs = subdirs.len();

        for subdir in subdirs {
            let files = match self.index.data_files(&subdir) {
                Ok(files) => files,
                Err(err) => {
                    tracing::error!("listing {subdir} failed: {err}");
                    report.failed.push(FailedFile {
                        file_name: subdir,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            tracing::debug!("{} data files listed in {subdir}", files.len());

            for file_name in files {
                let local_path = self.layout.local_path(year, &file_name);
                if self.layout.exists(&local_path) {
                    report.already_present += 1;
                    continue;
                }
                tracing::info!("{local_path} new");
                let start = Instant::now();
                let result = remote_file_url(&self.config.base_url, &subdir, &file_name)
                    .and_then(|url| self.fetcher.download(&url, local_path.as_std_path()));
                match result {
                    Ok(()) => {
                        tracing::debug!(
                            "{file_name} downloaded in {}ms",
                            start.elapsed().as_millis()
                        );
                        report.downloaded.push(file_name);
                    }
                    Err(err) => {
                        tracing::error!("download of {file_name} failed: {err}");
                        report.failed.push(FailedFile {
                            file_name,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
