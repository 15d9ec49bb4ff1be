//! Deterministic per-SP command-script fixture generation.
//!
//! A fixture set is one command script per simulated service point. The
//! content of every script is a pure function of the node count, so the same
//! layout always produces byte-identical files.
//!
//! - [`NodeLayout`] validates the node count and derives the quarter starts
//! - [`generate`] builds one SP's [`Script`](script::Script)
//! - [`write_fixtures`] writes `<dir>/<prefix><i>` for every SP
//! - [`check_fixtures`] reads a set back and reports [`Finding`]s
//!
//! # Example
//!
//! ```
//! use fixture::{generate, NodeLayout};
//! use script::SpId;
//!
//! let layout = NodeLayout::default();
//! let script = generate(&layout, SpId::new(5)).unwrap();
//! let text = script.to_string();
//! assert!(text.starts_with("Frame 1, To SP 2\nFrame 2, To SP 9\n"));
//! ```

mod check;
mod error;
mod files;
mod generate;
mod layout;

pub use check::{check_fixtures, CheckReport, Finding};
pub use error::{FixtureError, FixtureResult};
pub use files::{
    read_fixtures, read_script, write_fixtures, FileNaming, FixtureSummary, DEFAULT_PREFIX,
};
pub use generate::{generate, generate_all, GREETING};
pub use layout::{NodeLayout, DEFAULT_NODE_COUNT, MAX_NODE_COUNT, MIN_NODE_COUNT};
