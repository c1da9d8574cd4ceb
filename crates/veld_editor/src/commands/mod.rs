//! Command pattern implementation for undo/redo support.
//!
//! Every mutation the local user originates goes through a command, so the
//! history can replay it forward and backward. Inbound engine notifications
//! bypass commands entirely - they are applied by the reconciler.

mod blueprint_commands;
mod bulk;
mod command;
mod mutation_commands;

pub use blueprint_commands::{
    DestroyBlueprintCommand, DisableBlueprintCommand, EnableBlueprintCommand,
    SpawnBlueprintCommand,
};
pub use bulk::BulkCommand;
pub use command::{Command, CommandError, CommandResult};
pub use mutation_commands::{SetNameCommand, SetTransformCommand, SetVariationCommand};
