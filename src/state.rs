use std::io::{self, Write};

use serde_json::Value;

use crate::command::Command;
use crate::filter;
use crate::output;
use crate::path::resolve;
use crate::search::search;
use crate::store::SessionStore;
use crate::tree::{index, AddressSpace};
use crate::types::{Flow, SearchRecord};

pub const FAREWELL: &str = "JSON browser session ended.";

/// Format of the session timestamp embedded in store file names.
pub const SESSION_TS_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn session_timestamp() -> String {
    chrono::Local::now().format(SESSION_TS_FORMAT).to_string()
}

// latest `/k` results, until `/ks`
#[derive(Debug, Default)]
struct PendingSearch {
    term: String,
    records: Vec<SearchRecord>,
}

/// Everything one interactive run works on. The document is borrowed and
/// never changes; the address space is built once.
pub struct Session<'a> {
    root: &'a Value,
    space: AddressSpace<'a>,
    store: SessionStore,
    pending: Option<PendingSearch>,
}

impl<'a> Session<'a> {
    pub fn new(root: &'a Value, store: SessionStore) -> Self {
        Self {
            root,
            space: index(root),
            store,
            pending: None,
        }
    }

    pub fn address_space(&self) -> &AddressSpace<'a> {
        &self.space
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn pending_term(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.term.as_str())
    }

    /// Run one command, writing everything it shows to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Exit => {
                writeln!(out, "{}", output::notice("Exiting."))?;
                return Ok(Flow::Exit);
            }
            Command::Help => writeln!(out, "{}", output::help())?,
            Command::Depth(depth) => {
                let paths = filter::at_depth(&self.space, depth);
                list_paths(out, &paths)?;
            }
            Command::All => {
                let paths = filter::all(&self.space);
                list_paths(out, &paths)?;
            }
            Command::Prefix(prefix) => {
                let paths = filter::with_prefix(&self.space, &prefix);
                list_paths(out, &paths)?;
            }
            Command::Filter { word, case_sensitive } => {
                let paths = filter::filter(&self.space, &word, case_sensitive);
                if paths.is_empty() {
                    writeln!(out, "{}", output::error("No matching results."))?;
                }
                for path in paths {
                    writeln!(out, "{}", output::highlighted_path(path, &word, case_sensitive))?;
                }
            }
            Command::Search(term) => self.search(term, out)?,
            Command::SaveSearch => self.save_search(out)?,
            Command::ListSaved => self.list_saved(out)?,
            Command::Print(path) => match resolve(self.root, &path) {
                Some(value) => writeln!(out, "{}", output::node(value))?,
                None => writeln!(out, "{}", output::error("Invalid path."))?,
            },
            Command::Usage(usage) => {
                writeln!(out, "{}", output::error(&format!("Usage: {usage}")))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn search<W: Write>(&mut self, term: String, out: &mut W) -> io::Result<()> {
        let records = search(&self.space, &term);
        if records.is_empty() {
            writeln!(out, "{}", output::error("No matching results."))?;
        }
        for record in &records {
            writeln!(out, "{}", output::search_hit(record, &term))?;
        }
        self.pending = Some(PendingSearch { term, records });
        Ok(())
    }

    fn save_search<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(pending) = self.pending.take().filter(|p| !p.records.is_empty()) else {
            writeln!(out, "{}", output::error("No search results to save. Run /k TERM first."))?;
            return Ok(());
        };

        match self.store.append(&pending.records) {
            Ok(total) => {
                let message = format!(
                    "Saved {} result(s) for '{}' to {} ({} total).",
                    pending.records.len(),
                    pending.term,
                    self.store.file().display(),
                    total
                );
                writeln!(out, "{}", output::notice(&message))?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not save search results");
                writeln!(out, "{}", output::error(&e.to_string()))?;
                self.pending = Some(pending);
            }
        }
        Ok(())
    }

    fn list_saved<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.store.load() {
            Ok(Some(records)) => {
                for record in &records {
                    writeln!(out, "{}", output::saved_record(record))?;
                }
            }
            Ok(None) => {
                writeln!(out, "{}", output::error("No saved JSON data found for the current session."))?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved data is unreadable");
                writeln!(out, "{}", output::error(&e.to_string()))?;
            }
        }
        Ok(())
    }
}

fn list_paths<W: Write>(out: &mut W, paths: &[&str]) -> io::Result<()> {
    if paths.is_empty() {
        writeln!(out, "{}", output::error("No matching results."))?;
    }
    for path in paths {
        writeln!(out, "{}", output::path_line(path))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn run(session: &mut Session<'_>, line: &str) -> (Flow, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let flow = session.execute(parse(line), &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    fn fixture() -> (Value, TempDir) {
        (json!({"a": {"b": [1, 2, {"c": "foo"}]}, "name": "Foo Bar"}), tempdir().unwrap())
    }

    #[test]
    fn lists_by_depth_and_prefix() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));
        assert_eq!(run(&mut session, "?").1, "a\nname\n");
        assert_eq!(run(&mut session, "?.?").1, "a\na.b\na.b[0]\na.b[1]\na.b[2]\nname\n");
        assert_eq!(run(&mut session, "a.b[2]?").1, "a.b[2]\na.b[2].c\n");
        assert_eq!(run(&mut session, "zzz?").1, "No matching results.\n");
    }

    #[test]
    fn prints_resolved_values_and_rejects_bad_paths() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));
        assert_eq!(run(&mut session, "/p a.b[2]").1, "{\n    \"c\": \"foo\"\n}\n");
        assert_eq!(run(&mut session, "a.b[0]").1, "1\n");
        let (flow, text) = run(&mut session, "a.b[5]");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(text, "Invalid path.\n");
    }

    #[test]
    fn search_is_only_persisted_on_save() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));

        let (_, text) = run(&mut session, "/k foo");
        assert!(text.contains("Path: a.b[2].c"));
        assert!(text.contains("Path: name"));
        assert_eq!(session.pending_term(), Some("foo"));
        assert!(!session.store().file().exists());

        let (_, text) = run(&mut session, "/ks");
        assert!(text.starts_with("Saved 5 result(s) for 'foo'"));
        assert_eq!(session.store().load().unwrap().unwrap().len(), 5);

        let (_, text) = run(&mut session, "/ks");
        assert!(text.starts_with("No search results to save."));
        assert_eq!(session.store().load().unwrap().unwrap().len(), 5);
    }

    #[test]
    fn list_saved_replays_store() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));

        assert_eq!(
            run(&mut session, "/kl").1,
            "No saved JSON data found for the current session.\n"
        );
        run(&mut session, "/k bar");
        run(&mut session, "/ks");
        assert_eq!(
            run(&mut session, "/kl").1,
            "Path: name\nTag: name\nValue: \"Foo Bar\"\n\n"
        );
    }

    #[test]
    fn corrupt_store_does_not_end_session() {
        let (doc, dir) = fixture();
        let store = SessionStore::new(dir.path(), "doc", "ts");
        std::fs::write(store.file(), "[{").unwrap();
        let mut session = Session::new(&doc, store);

        let (flow, text) = run(&mut session, "/kl");
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("is not valid"));

        run(&mut session, "/k foo");
        let (flow, text) = run(&mut session, "/ks");
        assert_eq!(flow, Flow::Continue);
        assert!(text.contains("is not valid"));
        assert_eq!(session.pending_term(), Some("foo"));
    }

    #[test]
    fn filters_highlight_without_color() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));
        assert_eq!(run(&mut session, "/f B").1, "a.b\na.b[0]\na.b[1]\na.b[2]\na.b[2].c\n");
        assert_eq!(run(&mut session, "/F B").1, "No matching results.\n");
    }

    #[test]
    fn exit_command_stops() {
        let (doc, dir) = fixture();
        let mut session = Session::new(&doc, SessionStore::new(dir.path(), "doc", "ts"));
        assert_eq!(run(&mut session, "%"), (Flow::Exit, "Exiting.\n".to_string()));
    }
}
