use clap::Parser;
use itf::{read_frames, write_frame_report, CardMap, DecodeOptions, DecodeSession, DecodeSummary};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Convert Itek ITF amplifier recordings into a per-channel text table")]
struct Cli {
    /// Recording to read
    data_file: PathBuf,

    /// Table to write; without it a frame report is printed instead
    output_file: Option<PathBuf>,

    /// Log progress at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Card governing each channel block, e.g. "1,0,2,3,4,5,6,7,8,9,10,11,12,13,14,15"
    #[arg(long, value_name = "LIST")]
    card_map: Option<String>,

    /// Require the first frame to pass the full marker check
    #[arg(long)]
    strict_alignment: bool,

    /// Write raw converter codes without calibration
    #[arg(long)]
    raw: bool,

    /// Card settings file to use instead of <data_file>.ita
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Leave out channels whose card is switched off
    #[arg(long)]
    enabled_cards_only: bool,

    /// Write per-frame record positions, flags and transmit register rows
    #[arg(long, value_name = "PATH")]
    frame_status: Option<PathBuf>,

    /// Write a JSON summary of the run
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn options(cli: &Cli) -> itf::Result<DecodeOptions> {
    let mut options = DecodeOptions::default()
        .with_strict_alignment(cli.strict_alignment)
        .with_calibration(!cli.raw)
        .with_enabled_cards_only(cli.enabled_cards_only);
    if let Some(list) = &cli.card_map {
        options = options.with_card_map(CardMap::parse(list)?);
    }
    if let Some(path) = &cli.config {
        options = options.with_config_path(path.clone());
    }
    Ok(options)
}

fn run(cli: &Cli) -> itf::Result<()> {
    let options = options(cli)?;

    let Some(output) = &cli.output_file else {
        let frame_set = read_frames(&cli.data_file, &options)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_frame_report(&mut out, &frame_set.frames)?;
        return out
            .flush()
            .map_err(|e| itf::Error::Io { path: PathBuf::from("<stdout>"), source: e });
    };

    let recording = DecodeSession::run(&cli.data_file, &options)?;
    recording.write_table(output)?;
    let summary = recording.summary();
    info!(
        "Wrote {} frames ({:.1} s, {} bad) to '{}'",
        summary.frames,
        summary.duration_seconds(),
        summary.bad_frames.len(),
        output.display()
    );

    if let Some(path) = &cli.frame_status {
        recording.write_frame_status(path)?;
    }
    if let Some(path) = &cli.summary {
        write_summary(&summary, path)?;
    }
    Ok(())
}

#[cfg(feature = "serde")]
fn write_summary(summary: &DecodeSummary, path: &Path) -> itf::Result<()> {
    summary.write_json(path)
}

#[cfg(not(feature = "serde"))]
fn write_summary(_summary: &DecodeSummary, path: &Path) -> itf::Result<()> {
    tracing::warn!(
        "Summary '{}' not written: built without the 'serde' feature",
        path.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
