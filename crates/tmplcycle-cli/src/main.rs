mod cli;
mod cmd;
mod error;
mod format;
mod io;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::format::FormatterConfig;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug, `--quiet`
/// selects error, and the default is warn.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tmplcycle={level},tmplcycle_core={level}"))
    });

    let colors = format::colors_enabled(cli.no_color);
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(colors)
                .with_writer(std::io::stderr),
        )
        .try_init();
    if initialized.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet);
    match &cli.command {
        Command::Check { file, strict } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::check::run(&content, *strict, cli.format, &config)
        }
        Command::Order { file, strict } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::order::run(&content, *strict, cli.format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        tracing::debug!(exit_code = e.exit_code(), "command failed");
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}
