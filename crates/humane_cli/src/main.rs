//! `humane` command-line entry point.
//!
//! # Responsibility
//! - Parse commands and resolve which backup file to open.
//! - Route to the explorer, the listing or the merge flow.
//! - Map failures to exit code 1 with a one-line message on stderr.

mod error;
mod list;
mod merge;
mod prompt;
mod resolve;
mod tui;

use clap::{Parser, Subcommand};
use error::CliError;
use humane_core::{default_log_level, flush_logging, init_logging};
use merge::{run_merge, write_merged, MergeOutcome, MergeRequest};
use prompt::TerminalPrompts;
use resolve::load_data;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "humane",
    version,
    about = "Explore and manage Humane Tracker backup data",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Backup JSON file to explore when no command is given.
    file: Option<PathBuf>,

    /// Directory scanned for `humane-tracker-backup-*.json` when no file is given.
    #[arg(long, global = true, env = "HUMANE_BACKUP_DIR")]
    backup_dir: Option<PathBuf>,

    /// Write rotating log files to this directory.
    #[arg(long, global = true, env = "HUMANE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (default: debug in debug builds, info otherwise).
    #[arg(long, global = true, env = "HUMANE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive explorer.
    Explore {
        /// Backup JSON file.
        file: Option<PathBuf>,
    },
    /// List all habits grouped by category.
    List {
        /// Backup JSON file.
        file: Option<PathBuf>,
    },
    /// Merge several habits into one, keeping the maximum value per day.
    Merge {
        /// Backup JSON file.
        file: Option<PathBuf>,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target habit id; skips the target prompt.
        #[arg(long, value_name = "HABIT_ID")]
        into: Option<String>,

        /// Source habit id (repeatable); skips the source prompt.
        #[arg(long = "from", value_name = "HABIT_ID", requires = "into")]
        from: Vec<String>,

        /// Do not ask for confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    let code = match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=command module=cli status=error error={}", err);
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    };
    flush_logging();
    code
}

fn start_logging(cli: &Cli) {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return;
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let backup_dir = cli.backup_dir.as_deref();
    let mut stderr = io::stderr();
    let command = cli
        .command
        .unwrap_or(Command::Explore { file: cli.file });

    match command {
        Command::Explore { file } => {
            let data = load_data(file.as_deref(), backup_dir, &mut stderr)?;
            tui::run_explorer(&data)?;
        }
        Command::List { file } => {
            let data = load_data(file.as_deref(), backup_dir, &mut stderr)?;
            list::write_listing(&data, &mut io::stdout().lock())?;
        }
        Command::Merge {
            file,
            output,
            into,
            from,
            yes,
        } => {
            let data = load_data(file.as_deref(), backup_dir, &mut stderr)?;
            let request = MergeRequest {
                into,
                from,
                assume_yes: yes,
            };
            let mut prompter = TerminalPrompts::default();
            if let MergeOutcome::Merged { data: merged } =
                run_merge(&data, &request, &mut prompter)?
            {
                write_merged(
                    &merged,
                    output.as_deref(),
                    &mut io::stdout().lock(),
                    &mut stderr,
                )?;
            }
        }
    }
    Ok(())
}
