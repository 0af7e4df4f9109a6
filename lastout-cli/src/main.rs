use std::process::ExitCode;

use clap::Parser;
use lastout_cli::{Cli, attach, run, util};
use lastout_core::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config first: it may carry the log level.
    let config = Config::load(cli.config.as_deref());
    let configured_level = config.as_ref().ok().and_then(|c| c.log_level.clone());
    util::init_tracing(
        cli.log_level.map(|l| l.as_directive()),
        configured_level.as_deref(),
    );
    util::install_panic_hook();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            eprintln!("lastout: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = if cli.attach {
        attach(&cli, &config, &mut out).await.map(drop)
    } else {
        run(&cli, &config, &mut out).await.map(drop)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "lastout failed");
            eprintln!("lastout: {e:#}");
            ExitCode::FAILURE
        }
    }
}
