//! helm-valuesfrom - Resolve Flux HelmRelease valuesFrom into helm `-f` flags
//!
//! Prints ` -f <file> -f <file> ...` on stdout, one temp values file per
//! resolved ConfigMap/Secret reference, ready to splice into a
//! `helm template` invocation.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use valuesfrom_core::ValuesFromRun;

mod error;
mod exit_codes;

use error::Result;

#[derive(Parser)]
#[command(name = "helm-valuesfrom")]
#[command(version)]
#[command(about = "Resolve Flux HelmRelease valuesFrom references into helm -f flags", long_about = None)]
struct Cli {
    /// HelmRelease manifest
    manifest: PathBuf,

    /// Directory containing ConfigMap and Secret manifests
    #[arg(env = "VALUESFROM_VALUES_DIR")]
    values_dir: PathBuf,

    /// Directory receiving the resolved values files
    #[arg(env = "VALUESFROM_TEMP_DIR")]
    temp_dir: PathBuf,

    /// Enable debug output on stderr
    #[arg(long)]
    debug: bool,
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(&cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr; stdout carries only the flag string
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let output = ValuesFromRun::new(&cli.manifest, &cli.values_dir, &cli.temp_dir).execute()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.flags().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
