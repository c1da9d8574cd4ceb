//! Veld Editor Core
//!
//! Client-side state-synchronization core of a visual level editor. The
//! editor does not own the authoritative simulation: it mirrors the object
//! graph of a remote running engine from asynchronous, possibly
//! out-of-order notifications, while local mutations are dispatched back to
//! the engine as requests and undone/redone locally.
//!
//! ## Architecture
//!
//! ```text
//! User action ──> Command ──> History ──> EngineRequest ──> transport
//! transport ──> EngineMessage ──> Dispatcher ──> Editor/SceneGraph
//!                                        └──> EditorNotification ──> UI
//! ```
//!
//! The scene graph tolerates children arriving before their parents (the
//! pending-parent buffer), duplicate spawn notifications, and mutations of
//! objects the mirror has not learned about yet. The rendering layer, UI
//! widget tree, real transport, and blueprint catalog are external
//! collaborators reached only through the message types in [`messages`].

pub mod commands;
pub mod core;
pub mod dispatcher;
pub mod editor;
pub mod emulator;
pub mod messages;
pub mod scene;
pub mod transfer;

// Re-export commonly used types
pub use crate::core::{Guid, HighlightGroup, History, PlayerId, SelectionGroup, Transform};
pub use commands::{
    BulkCommand, Command, CommandError, CommandResult, DestroyBlueprintCommand,
    DisableBlueprintCommand, EnableBlueprintCommand, SetNameCommand, SetTransformCommand,
    SetVariationCommand, SpawnBlueprintCommand,
};
pub use dispatcher::Dispatcher;
pub use editor::Editor;
pub use emulator::EngineEmulator;
pub use messages::{EditorNotification, EngineMessage, EngineRequest, MessageMeta};
pub use scene::{ObjectNode, SceneError, SceneGraph, SpatialEntity};
pub use transfer::{Aabb, Blueprint, BlueprintRef, EntityRecord, ParentLink, TransferRecord};

/// Editor core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
