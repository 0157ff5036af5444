use std::io::{self, Write};

use crate::mirror::MirrorReport;

pub struct TextOutput;

impl TextOutput {
    pub fn print_report(report: &MirrorReport) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        Self::write_report(&mut stdout, report)
    }

    pub fn write_report<W: Write>(out: &mut W, report: &MirrorReport) -> io::Result<()> {
        writeln!(out, "GPCP mirror summary for {}", report.year)?;
        writeln!(out, "  subdirectories scanned: {}", report.subdirs)?;
        writeln!(out, "  downloaded: {}", report.downloaded.len())?;
        writeln!(out, "  already present: {}", report.already_present)?;
        writeln!(out, "  failed: {}", report.failed.len())?;
        for failed in &report.failed {
            writeln!(out, "    {}: {}", failed.file_name, failed.reason)?;
        }
        writeln!(
            out,
            "  moved to redundant: {}",
            report.reconcile.relocated.len()
        )?;
        for moved in &report.reconcile.relocated {
            writeln!(out, "    {} (kept {})", moved.file_name, moved.kept)?;
        }
        if !report.reconcile.malformed.is_empty() {
            writeln!(
                out,
                "  unrecognised file names: {}",
                report.reconcile.malformed.len()
            )?;
        }
        Ok(())
    }
}
