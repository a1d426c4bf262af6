//! Subcommand implementations.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check;
mod quote;
mod teleport;

pub use check::Check;
pub use quote::Quote;
pub use teleport::Teleport;
