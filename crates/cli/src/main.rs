use std::path::PathBuf;
use std::process;

use clap::Parser;

use hevconv_core::{TranscodeOptions, TranscodeUseCase};

/// Single-pass video transcoder to H.265 in an MP4 container.
#[derive(Parser)]
#[command(name = "hevconv")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output MP4 file.
    output: PathBuf,

    /// Encoder threads (0 = let the encoder decide).
    #[arg(long, default_value = "0")]
    threads: usize,

    /// x265 preset (ultrafast .. placebo).
    #[arg(long, default_value = "medium")]
    preset: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let use_case = TranscodeUseCase::new(TranscodeOptions {
        threads: cli.threads,
        preset: cli.preset,
    });
    let stats = use_case.execute(&cli.input, &cli.output)?;

    log::info!(
        "Transcoded {} frames ({} packets) to {}",
        stats.frames_decoded,
        stats.packets_written,
        cli.output.display()
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.input == cli.output {
        return Err("Input and output must be different files".into());
    }
    if cli.preset.is_empty() {
        return Err("Preset must not be empty".into());
    }
    Ok(())
}
