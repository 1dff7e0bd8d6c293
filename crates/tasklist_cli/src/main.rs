use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use tasklist_cli::cli::{Cli, collect_overrides};
use tasklist_cli::menu::Menu;
use tasklist_core::config::{load_config_with_fallback, merge_overrides};
use tasklist_core::error::AppError;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV_VAR: &str = "TASKLIST_DEBUG";
const DEFAULT_DEBUG_FILTER: &str = "tasklist_core=debug,tasklist_cli=debug";

fn init_tracing() {
    let Ok(value) = std::env::var(DEBUG_ENV_VAR) else {
        return;
    };

    let directives = value.trim();
    let filter = if directives.is_empty() || directives == "1" {
        EnvFilter::new(DEFAULT_DEBUG_FILTER)
    } else {
        EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DEBUG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid arguments").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override)?;
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {} - {}; using default configuration", err.code(), err);
    }
    let config = merge_overrides(&loaded.config, &overrides);

    let store_path = cli.file.unwrap_or_else(|| config.store_path());
    tracing::debug!(path = %store_path.display(), "using task file");

    let mut menu = Menu::new(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        store_path,
        config.palette(),
    );
    menu.run()
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let err = normalize_parse_error(err);
            eprintln!("ERROR: {} - {}", err.code(), err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {} - {}", err.code(), err);
        std::process::exit(1);
    }
}
