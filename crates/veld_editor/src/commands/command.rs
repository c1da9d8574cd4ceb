//! Command trait and result types.

use thiserror::Error;

use crate::core::Guid;
use crate::editor::Editor;

/// Result type for command execution.
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution.
///
/// Expected protocol races (unknown targets of inbound notifications,
/// duplicate confirmations) never surface here - they are handled as logged
/// no-ops on the reconciliation path. These errors mark misuse of the
/// command layer itself.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Command referenced an object the mirror does not hold.
    #[error("object not found: {0}")]
    UnknownObject(Guid),
    /// Invalid operation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// A unit of undoable work with a forward and inverse action.
///
/// Commands are the only way the UI mutates engine-facing state: forward
/// actions publish requests to the engine and/or adjust local state, and the
/// inverse reverts exactly that. `execute` may run more than once across
/// redo; `undo` is only ever called after a matching `execute` (the
/// history's stack discipline guarantees this, not the command).
pub trait Command: Send + Sync {
    /// Human-readable label for the undo/redo menu.
    fn description(&self) -> &str;

    /// Perform the forward action.
    fn execute(&mut self, editor: &mut Editor) -> CommandResult;

    /// Perform the exact inverse of the forward action.
    fn undo(&mut self, editor: &mut Editor) -> CommandResult;
}
