//! Interactive path explorer for JSON documents.
//!
//! A document is flattened once into an [`tree::AddressSpace`] of dotted and
//! bracketed paths (`users[0].name`). Paths can be listed by depth or prefix,
//! filtered by substring, resolved back to values, and values can be searched
//! with results saved to a per-session file.

pub mod command;
pub mod config;
pub mod error;
pub mod file;
pub mod filter;
pub mod output;
pub mod path;
pub mod repl;
pub mod search;
pub mod state;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{AppError, PathError, StoreError};
pub use path::resolve;
pub use search::search;
pub use state::Session;
pub use store::SessionStore;
pub use tree::{index, AddressSpace};
pub use types::{Flow, Input, SearchRecord, Step};
