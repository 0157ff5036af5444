use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use gpcp_mirror::config::MirrorConfig;
use gpcp_mirror::domain::{Timestep, Year};
use gpcp_mirror::error::MirrorError;
use gpcp_mirror::mirror::Mirror;
use gpcp_mirror::ncei::NceiHttpClient;
use gpcp_mirror::output::TextOutput;

#[derive(Parser, Debug)]
#[command(name = "gpcp-mirror")]
#[command(
    about = "Download GPCP daily or monthly data for one year from the NOAA/NCEI server",
    long_about = "Download GPCP daily or monthly data for one year from\n  \
        https://www.ncei.noaa.gov/data/global-precipitation-climatology-project-gpcp-{tstep}/access/\n\
        into $AUSREFDIR/gpcp/data, then move superseded same-day files to the redundant directory."
)]
#[command(version)]
struct Cli {
    /// Year to process
    #[arg(short, long)]
    year: Year,

    /// Timestep to mirror
    #[arg(short, long, value_enum, default_value_t = Timestep::Daily)]
    tstep: Timestep,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<MirrorError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &MirrorError) -> u8 {
    match error {
        MirrorError::InvalidYear(_) => 2,
        MirrorError::NceiHttp(_)
        | MirrorError::NceiStatus { .. }
        | MirrorError::Incomplete { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    let config = MirrorConfig::from_env(cli.year, cli.tstep)?;
    let client = NceiHttpClient::new(config.base_url.clone())?;
    let mirror = Mirror::new(config, client.clone(), client);

    let report = mirror.run()?;
    TextOutput::print_report(&report).into_diagnostic()?;

    if !report.is_complete() {
        return Err(MirrorError::Incomplete {
            failed: report.failed.len(),
        }
        .into());
    }
    Ok(())
}
