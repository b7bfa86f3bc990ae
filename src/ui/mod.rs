//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer turns the portfolio and the core scroll state into cells on
//! the terminal.  It owns no scroll logic of its own.

pub mod layout;
pub mod nav;
pub mod page;
pub mod theme;
