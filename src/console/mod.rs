//! Line-oriented text front-end
//!
//! This module drives a [`Chess`](crate::chess::Chess) game from text
//! commands and never reaches past its public API.

pub mod protocol;

pub use protocol::{Console, ConsoleView};
