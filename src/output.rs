//! Terminal rendering for session output

use colored::Colorize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::command::COMMANDS;
use crate::search::highlight;
use crate::tree::render_value;
use crate::types::SearchRecord;

/// Indented JSON text; `indent` is the number of spaces per level.
pub fn pretty(value: &Value, indent: usize) -> String {
    let spaces = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&spaces));
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

pub fn path_line(path: &str) -> String {
    path.blue().to_string()
}

pub fn highlighted_path(path: &str, word: &str, case_sensitive: bool) -> String {
    highlight(path, word, case_sensitive, |m| m.red().bold().to_string())
}

pub fn node(value: &Value) -> String {
    pretty(value, 4).cyan().to_string()
}

/// One `/k` hit: the summary block followed by the full node.
pub fn search_hit(record: &SearchRecord, term: &str) -> String {
    let value = highlight(&render_value(&record.value), term, false, |m| m.red().bold().to_string());
    format!(
        "{} {}\n{} {}\n{} {}\n\n{}",
        "Path:".blue(),
        record.path.blue(),
        "Tag:".blue(),
        record.tag.blue(),
        "Value:".blue(),
        value,
        node(&record.value)
    )
}

pub fn saved_record(record: &SearchRecord) -> String {
    format!(
        "{}\n{}\n{}\n",
        format!("Path: {}", record.path).blue(),
        format!("Tag: {}", record.tag).green(),
        format!("Value: {}", pretty(&record.value, 2)).yellow()
    )
}

pub fn error(message: &str) -> String {
    message.red().to_string()
}

pub fn notice(message: &str) -> String {
    message.yellow().to_string()
}

pub const PROMPT: &str = "Enter command or path: ";

pub fn help() -> String {
    let mut lines = vec![
        String::new(),
        "Available commands:".to_string(),
        format!("{:<10} : List all top-level nodes.", "?"),
        format!("{:<10} : List nodes starting with the specified prefix.", "prefix?"),
        format!("{:<10} : Expand two levels (add `?.` for each extra level).", "?.?"),
        format!("{:<10} : Recursively expand all paths.", "??"),
    ];
    for info in COMMANDS {
        lines.push(format!("{:<10} : {}", info.usage, info.summary));
    }
    lines.push(format!("{:<10} : Exit the program.", "%"));
    lines.push(String::new());
    lines.push("Use TAB for autocompletion of paths and commands.".to_string());
    lines.join("\n").yellow().to_string()
}
