use std::process::ExitCode;

use clap::Parser;
use queryshift::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    let verbose = args.verbose();

    match queryshift::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            if verbose {
                eprintln!("Error: {:#}", err);
            } else {
                eprintln!("Error: {}", err);
            }
            ExitStatus::Error.into()
        }
    }
}
