use clap::Parser;
use mfdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let args = Cli::parse();

    // Log to the state-dir file when possible; stderr keeps working when not.
    if logging::init_logging(args.verbose).is_err() {
        logging::init_logging_stderr(args.verbose);
    }

    match cli::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mfdl error: {:#}", err);
            std::process::exit(1);
        }
    }
}
