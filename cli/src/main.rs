//! `setup` binary: parse arguments and run the requested action.
use std::process::ExitCode;
use std::sync::Arc;

use dotfiles_setup::cli::{self, Invocation};
use dotfiles_setup::{commands, error, logging};

#[allow(clippy::print_stdout)]
fn print_usage() {
    println!("{}", cli::USAGE);
}

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = match Invocation::parse_from(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Usage => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Invocation::Display(e) => e.exit(),
    };

    let action = args.action();
    let Some(command) = action.command_name() else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    let result = commands::prepare(&args.global, &log)
        .and_then(|mut ctx| commands::run(action, &args.global, &mut ctx, &log));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = error::exit_code_for(&e);
            if code == 0 {
                log.info("Quitting.");
            } else {
                log.error(&format!("{e:#}"));
            }
            ExitCode::from(code)
        }
    }
}
