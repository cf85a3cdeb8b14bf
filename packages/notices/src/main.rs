//! CLI entry point for the notices client.

use kamar_notices::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::Cli::parse_args();

    // WARN by default (INFO with --debug so raw responses show), respecting RUST_LOG
    let default_level = if args.debug_enabled() { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
