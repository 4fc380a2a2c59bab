//! Dancer CLI - Command-line interface for beat-synchronized motion scripts
//!
//! This binary provides commands for generating, calibrating, analyzing and
//! validating motion scripts from extracted audio features.

use std::process::ExitCode;

use clap::Parser;

use dancer_cli::cli_args::{Cli, Commands};
use dancer_cli::commands;
use dancer_cli::commands::generate::GenerateOptions;
use dancer_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            params,
            target,
            out,
            csv,
            automap,
            yes,
            json,
        } => commands::generate::run(&GenerateOptions {
            input,
            params,
            target,
            out,
            csv,
            automap,
            yes,
            json,
        }),
        Commands::Calibrate {
            input,
            params,
            target,
            save,
            json,
        } => commands::calibrate::run(&input, &params, &target, save, json),
        Commands::Analyze {
            input,
            params,
            threshold,
            json,
        } => commands::analyze::run(&input, &params, threshold, json),
        Commands::Validate {
            input,
            params,
            json,
        } => commands::validate::run(&input, &params, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
