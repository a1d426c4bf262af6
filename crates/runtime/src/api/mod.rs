//! Public API surface of the runtime.

mod errors;
mod providers;

pub use errors::{ExecutorError, Result, RuntimeError};
pub use providers::{CommandExecutor, PositionProvider, ResourceProvider};
