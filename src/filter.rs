//! Path listings over an address space. Results keep traversal order.

use crate::tree::{depth, text_matches, AddressSpace};

/// Paths containing `word`, optionally ignoring case.
pub fn filter<'s>(space: &'s AddressSpace<'_>, word: &str, case_sensitive: bool) -> Vec<&'s str> {
    space
        .paths()
        .filter(|path| text_matches(path, word, case_sensitive))
        .collect()
}

/// Paths with at most `max_depth` dot-separated segments.
pub fn at_depth<'s>(space: &'s AddressSpace<'_>, max_depth: usize) -> Vec<&'s str> {
    space.paths().filter(|path| depth(path) <= max_depth).collect()
}

pub fn with_prefix<'s>(space: &'s AddressSpace<'_>, prefix: &str) -> Vec<&'s str> {
    space.paths().filter(|path| path.starts_with(prefix)).collect()
}

pub fn all<'s>(space: &'s AddressSpace<'_>) -> Vec<&'s str> {
    space.paths().collect()
}
