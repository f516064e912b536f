// src/main.rs
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use jason_scout_lib::config::{init_logging, Args, Config};
use jason_scout_lib::error::AppError;
use jason_scout_lib::file::{self, Document};
use jason_scout_lib::output;
use jason_scout_lib::repl::{self, EditorLines, PathHelper, ScriptedLines};
use jason_scout_lib::state::{session_timestamp, Session};
use jason_scout_lib::store::SessionStore;

fn load_document(config: &Config) -> std::result::Result<Document, AppError> {
    match &config.json_file {
        Some(path) => file::open_file(path),
        None if !io::stdin().is_terminal() => file::open_reader(io::stdin().lock()),
        None => Err(AppError::NoInput),
    }
}

fn browse(config: &Config, doc: &Document) -> Result<()> {
    let store_dir = config.store_dir.clone().unwrap_or_else(|| doc.store_dir.clone());
    let store = SessionStore::new(store_dir, &doc.source_name, &session_timestamp());
    tracing::info!(store = %store.file().display(), "session started");

    let mut session = Session::new(&doc.root, store);
    let mut out = io::stdout().lock();

    if config.interactive() {
        println!("{}", output::help());
        let paths = session.address_space().paths().map(str::to_string).collect();
        let mut lines = EditorLines::new(PathHelper::new(paths), config.history_file.clone())
            .context("failed to start line editor")?;
        repl::run(&mut session, &mut lines, &mut out)?;
    } else {
        let mut lines = ScriptedLines::new(config.commands.iter().cloned());
        repl::run(&mut session, &mut lines, &mut out)?;
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let config = Config::from(Args::parse());
    if !config.color {
        colored::control::set_override(false);
    }
    init_logging(&config.log_level);

    let doc = match load_document(&config) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    match browse(&config, &doc) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("An unexpected error occurred: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}
