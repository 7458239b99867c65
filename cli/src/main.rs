mod cli;

use bookmark_sync::config::env_lookup;
use bookmark_sync::{run_sync, SyncError, SyncOutcome};
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logger; progress lines are info level and go to stdout
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stdout)
        .init();

    if args.version {
        println!("bookmark-sync {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let result = run(&args);
    if let Err(e) = &result {
        report(e);
    }
    ExitCode::from(exit_status_for(&result))
}

fn run(args: &cli::Cli) -> bookmark_sync::Result<SyncOutcome> {
    let settings = args.settings()?;
    run_sync(&settings, &args.overrides(), env_lookup)
}

/// Finding no bookmarks is a success; every error exits with its code
fn exit_status_for(result: &bookmark_sync::Result<SyncOutcome>) -> u8 {
    match result {
        Ok(SyncOutcome::Written(_)) | Ok(SyncOutcome::Empty) => 0,
        Err(e) => e.exit_code(),
    }
}

/// Log the error and its source chain, one line each
fn report(err: &SyncError) {
    for line in err.to_string().lines() {
        log::error!("{}", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
