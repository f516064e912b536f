use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Field(String), // object key
    Index(usize),  // array position
}

/// A search hit, and the unit persisted to the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub path: String, // dotted/bracketed address
    pub tag: String,  // last `.` segment of the path
    pub value: Value, // the unmodified node at `path`
}

/// What a line source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted, // ^C, the loop keeps going
    Eof,
}

/// Result of executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}
