//! Interactive frontends

pub mod terminal;

pub use terminal::TerminalBackend;
