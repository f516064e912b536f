//! Command loop and line editing

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};

use crate::command::{self, COMMANDS};
use crate::error::Result;
use crate::output;
use crate::state::{Session, FAREWELL};
use crate::types::{Flow, Input};

/// Where command lines come from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// Read, execute and render commands until `%` or end of input.
pub fn run<S: LineSource, W: Write>(session: &mut Session<'_>, source: &mut S, out: &mut W) -> Result<()> {
    loop {
        let line = match source.read_line(output::PROMPT)? {
            Input::Line(line) => line,
            Input::Interrupted => {
                writeln!(out, "^C")?;
                continue;
            }
            Input::Eof => {
                writeln!(out, "\n{}", output::notice("EOF detected. Exiting."))?;
                break;
            }
        };
        tracing::debug!(line = %line, "command");
        if session.execute(command::parse(&line), out)? == Flow::Exit {
            break;
        }
    }
    writeln!(out, "{}", FAREWELL.green())?;
    Ok(())
}

/// Fixed list of commands, used for `-c` runs.
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I: IntoIterator<Item = String>>(lines: I) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, _prompt: &str) -> Result<Input> {
        Ok(self.lines.pop_front().map_or(Input::Eof, Input::Line))
    }
}

/// Completion of commands and document paths.
pub struct PathHelper {
    paths: Vec<String>,
}

impl PathHelper {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    fn candidates(&self, text: &str) -> Vec<Pair> {
        if text.starts_with('/') {
            COMMANDS
                .iter()
                .filter(|info| info.name.starts_with(text))
                .map(|info| Pair {
                    display: format!("{:<4} {}", info.name, info.summary.yellow()),
                    replacement: info.name.to_string(),
                })
                .collect()
        } else {
            self.paths
                .iter()
                .filter(|path| path.starts_with(text))
                .map(|path| Pair {
                    display: path.clone(),
                    replacement: path.clone(),
                })
                .collect()
        }
    }
}

impl Completer for PathHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        Ok((start, self.candidates(&line[start..])))
    }
}

impl Hinter for PathHelper {
    type Hint = String;
}

impl Highlighter for PathHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, _default: bool) -> Cow<'b, str> {
        Cow::Owned(prompt.green().to_string())
    }
}

impl Validator for PathHelper {}

impl Helper for PathHelper {}

/// Interactive line source backed by rustyline, with history.
pub struct EditorLines {
    editor: Editor<PathHelper, FileHistory>,
    history_file: PathBuf,
}

impl EditorLines {
    pub fn new(helper: PathHelper, history_file: PathBuf) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(helper));
        if let Err(e) = editor.load_history(&history_file) {
            tracing::debug!(error = %e, "no history loaded");
        }

        Ok(Self { editor, history_file })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %e, "history entry not added");
                    }
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for EditorLines {
    fn drop(&mut self) {
        if let Err(e) = self.editor.save_history(&self.history_file) {
            tracing::debug!(error = %e, "history not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionStore;
    use serde_json::json;
    use tempfile::tempdir;

    fn transcript(doc: &serde_json::Value, lines: &[&str]) -> String {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let mut session = Session::new(doc, SessionStore::new(dir.path(), "doc", "ts"));
        let mut source = ScriptedLines::new(lines.iter().map(|l| l.to_string()));
        let mut out = Vec::new();
        run(&mut session, &mut source, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn exit_command_ends_loop_early() {
        let doc = json!({"a": 1, "b": 2});
        let text = transcript(&doc, &["?", "%", "b"]);
        assert_eq!(text, format!("a\nb\nExiting.\n{FAREWELL}\n"));
    }

    #[test]
    fn end_of_input_is_a_normal_exit() {
        let doc = json!({"a": 1});
        let text = transcript(&doc, &["a"]);
        assert_eq!(text, format!("1\n\nEOF detected. Exiting.\n{FAREWELL}\n"));
    }

    struct Interrupting(Vec<Input>);

    impl LineSource for Interrupting {
        fn read_line(&mut self, _prompt: &str) -> Result<Input> {
            Ok(if self.0.is_empty() { Input::Eof } else { self.0.remove(0) })
        }
    }

    #[test]
    fn interrupt_is_echoed_and_loop_continues() {
        colored::control::set_override(false);
        let doc = json!({"a": 1});
        let dir = tempdir().unwrap();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));
        let mut source = Interrupting(vec![Input::Interrupted, Input::Line("a".into())]);
        let mut out = Vec::new();
        run(&mut session, &mut source, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("^C\n1\n\nEOF detected. Exiting.\n{FAREWELL}\n")
        );
    }

    #[test]
    fn completes_paths_by_prefix() {
        let helper = PathHelper::new(vec!["alpha".into(), "alpha.beta".into(), "gamma".into()]);
        let names: Vec<String> = helper.candidates("al").into_iter().map(|p| p.replacement).collect();
        assert_eq!(names, vec!["alpha", "alpha.beta"]);
        assert!(helper.candidates("zzz").is_empty());
    }

    #[test]
    fn completes_commands_with_help() {
        colored::control::set_override(false);
        let helper = PathHelper::new(Vec::new());
        let pairs = helper.candidates("/k");
        let names: Vec<&str> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(names, vec!["/k", "/ks", "/kl"]);
        assert!(pairs[1].display.contains("Save the results"));
    }
}
