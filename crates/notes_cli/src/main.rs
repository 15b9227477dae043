//! `notes`: terminal host for the notes app.
//!
//! Renders pages as markup and reads navigation and form commands from
//! stdin. Notes persist in a SQLite file unless `--memory` is given.

mod shell;

use clap::Parser;
use notes_core::{
    init_logging, App, AppConfig, KeyValueStorage, MemoryHistory, MemoryMount, StorageError,
};
use shell::{execute, parse_command, Command, Flow};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notes", version, about = "Take short text notes from the terminal")]
struct Cli {
    /// SQLite file holding the notes.
    #[arg(long, default_value = notes_core::config::DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Keep notes in memory only; nothing is written to disk.
    #[arg(long, conflicts_with = "data")]
    memory: bool,

    /// Reject writes once stored data would exceed this many bytes.
    #[arg(long)]
    quota_bytes: Option<usize>,

    /// Storage key holding the serialized notes.
    #[arg(long, default_value = notes_core::DEFAULT_STORAGE_KEY)]
    key: String,

    /// trace|debug|info|warn|error
    #[arg(long, default_value = notes_core::default_log_level())]
    log_level: String,

    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Path rendered on start.
    #[arg(long, default_value = "/")]
    start: String,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            storage_key: self.key,
            quota_bytes: self.quota_bytes,
            data_path: (!self.memory).then_some(self.data),
            log_level: self.log_level,
            log_dir: self.log_dir,
            start_path: self.start,
        }
    }
}

fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("failed to initialize logging: {err}");
            return ExitCode::FAILURE;
        }
    }

    let storage: Box<dyn KeyValueStorage> = if config.data_path.is_some() {
        match config.open_sqlite() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                eprintln!("failed to open notes database: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(config.memory_storage())
    };

    let store = config
        .build_store(storage)
        .with_alert(|_: &StorageError| eprintln!("Storage full! Please delete some notes."));
    let mut app = App::new(
        store,
        MemoryHistory::new(config.start_path.as_str()),
        MemoryMount::new(),
    );
    app.start();

    match run(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("i/o error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: &mut App<Box<dyn KeyValueStorage>, MemoryHistory, MemoryMount>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    execute(app, Command::Show, &mut stdout)?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        match parse_command(&line?) {
            Ok(Some(command)) => {
                if execute(app, command, &mut stdout)? == Flow::Exit {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(message) => writeln!(stdout, "{message}")?,
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}
