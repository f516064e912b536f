//! One input line to one command.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Depth(usize), // `?`, `?.?`, ...
    All,          // `??`
    Prefix(String),
    Filter { word: String, case_sensitive: bool },
    Search(String),
    SaveSearch,
    ListSaved,
    Print(String),
    Usage(&'static str), // argument missing
    Empty,
}

pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo { name: "/f", usage: "/f WORD", summary: "Case-insensitive filter paths by WORD and list them." },
    CommandInfo { name: "/F", usage: "/F WORD", summary: "Case-sensitive filter paths by WORD and list them." },
    CommandInfo { name: "/k", usage: "/k TERM", summary: "Search for TERM in values, print matching paths and the containing node." },
    CommandInfo { name: "/ks", usage: "/ks", summary: "Save the results of the previous /k search to the session file." },
    CommandInfo { name: "/kl", usage: "/kl", summary: "List the content of the session file." },
    CommandInfo { name: "/p", usage: "/p PATH", summary: "Print the JSON at PATH." },
    CommandInfo { name: "/h", usage: "/h", summary: "Display this help message." },
];

pub fn parse(line: &str) -> Command {
    let line = line.trim();

    match line {
        "" => return Command::Empty,
        "%" => return Command::Exit,
        "/h" => return Command::Help,
        "?" => return Command::Depth(1),
        "??" => return Command::All,
        "/ks" => return Command::SaveSearch,
        "/kl" => return Command::ListSaved,
        _ => {}
    }

    for (name, case_sensitive, usage) in [("/f", false, "/f WORD"), ("/F", true, "/F WORD")] {
        if let Some(word) = argument(line, name) {
            return match word {
                "" => Command::Usage(usage),
                _ => Command::Filter { word: word.to_string(), case_sensitive },
            };
        }
    }
    if let Some(term) = argument(line, "/k") {
        return match term {
            "" => Command::Usage("/k TERM"),
            _ => Command::Search(term.to_string()),
        };
    }
    if let Some(path) = argument(line, "/p") {
        return match path {
            "" => Command::Usage("/p PATH"),
            _ => Command::Print(path.to_string()),
        };
    }

    let expansions = line.matches("?.").count();
    if expansions > 0 {
        return Command::Depth(expansions + 1);
    }
    if let Some(prefix) = line.strip_suffix('?') {
        return Command::Prefix(prefix.to_string());
    }

    Command::Print(line.to_string())
}

// `Some("")` for a bare `name`
fn argument<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix(char::is_whitespace).map(str::trim)
}
