use regex::RegexBuilder;

use crate::tree::{render_value, tag, text_matches, AddressSpace};
use crate::types::SearchRecord;

/// Every entry whose rendered value contains `term`, ignoring case.
///
/// Containers render as their full content, so a hit deep inside a value is
/// reported at the leaf and again at every ancestor path that contains it.
pub fn search(space: &AddressSpace<'_>, term: &str) -> Vec<SearchRecord> {
    let results: Vec<SearchRecord> = space
        .iter()
        .filter(|(_, value)| text_matches(&render_value(value), term, false))
        .map(|(path, value)| SearchRecord {
            path: path.to_string(),
            tag: tag(path).to_string(),
            value: value.clone(),
        })
        .collect();
    tracing::debug!(term, matches = results.len(), "value search");
    results
}

/// Wrap each occurrence of `term` in `text` with `paint`. Display only.
pub fn highlight<F>(text: &str, term: &str, case_sensitive: bool, paint: F) -> String
where
    F: Fn(&str) -> String,
{
    if term.is_empty() {
        return text.to_string();
    }
    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        out.push_str(&paint(m.as_str()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}
