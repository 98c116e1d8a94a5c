//! dupclean - content-based duplicate file cleaner
//!
//! Entry point for the dupclean CLI application.

use clap::Parser;
use dupclean::{
    cli::Cli,
    error::{ExitCode, StructuredError},
    logging,
};

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    logging::init_logging(cli.verbose, cli.quiet);

    match dupclean::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
