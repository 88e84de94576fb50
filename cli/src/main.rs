use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use media_converter::cli::Cli;
use media_converter::menu::run_menu;
use media_converter::prompt::{self, Prompter, TermPrompter, CANCELLED_MESSAGE};
use media_converter::shell::ShellOutcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nUnexpected error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    prompt::exit_on_interrupt().context("failed to install Ctrl-C handler")?;

    let mut prompter = TermPrompter::new();
    let outcome = run_menu(&mut prompter, &cli.engine_config()).context("terminal I/O failed")?;

    if matches!(outcome, ShellOutcome::Cancelled) {
        prompter.say("");
        prompter.say(CANCELLED_MESSAGE);
    }

    log::debug!("Finished with {:?}", outcome);
    let code = u8::try_from(outcome.exit_code()).unwrap_or(1);
    Ok(ExitCode::from(code))
}
