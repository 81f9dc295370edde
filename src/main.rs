use chrono::Utc;
use clap::Parser;
use snapper::commands::{self, Cli};
use snapper::sysexits;
use std::process;

/// Entry point for the snapper CLI.
/// Parses the command line, takes one snapshot and exits with a status
/// describing how the run ended.
fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let (request, rsync) = match cli.into_request() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(sysexits::EX_CONFIG);
        }
    };

    if let Err(failure) = snapper::execute(&request, &rsync, Utc::now()) {
        eprintln!("error: {failure}");
        process::exit(failure.exit_code());
    }
}
