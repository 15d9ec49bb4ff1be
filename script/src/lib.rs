//! Command-script line format for simulated SP frame traffic.
//!
//! Every simulated service point (SP) reads a plain-text command script that
//! tells it when to wait for incoming frames and which frames to send. This
//! crate models one script as an ordered list of [`Command`]s and can:
//!
//! - Render commands in their canonical text form
//! - Parse scripts with bounded line and payload sizes
//! - Check that frame sequence numbers form a contiguous `1..=n` run
//! - Summarise a script with [`ScriptStats`]
//!
//! # Design Principles
//!
//! - **Strict grammar** - A line either matches a directive exactly or is an error.
//! - **Bounded parsing** - Line and payload lengths are checked against [`ScriptLimits`].
//! - **No layout knowledge** - This crate does not know how many SPs exist.
//!
//! # Example
//!
//! ```
//! use script::{Command, Script, ScriptLimits, SpId};
//!
//! let script = Script::parse(
//!     "Wait for receiving 2 frames\nFrame 1, To SP 4 hallo\n",
//!     &ScriptLimits::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(script.commands()[0], Command::wait(2));
//! assert_eq!(script.commands()[1], Command::frame_with_text(1, SpId::new(4), "hallo"));
//! assert!(script.check_sequence().is_ok());
//! ```

mod command;
mod error;
mod limits;
mod script;

pub use command::{Command, Payload, SpId};
pub use error::{ParseErrorKind, ScriptError, ScriptResult, SequenceError};
pub use limits::ScriptLimits;
pub use script::{Script, ScriptStats};
