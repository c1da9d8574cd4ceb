//! Boundary events between the core and its external collaborators.
//!
//! Inbound [`EngineMessage`]s arrive from the transport layer as
//! confirmations of engine-side mutations; outbound [`EngineRequest`]s are
//! picked up by the transport and forwarded to the engine process;
//! [`EditorNotification`]s go the other way, to the render/UI layer. The
//! wire encoding of requests and messages is the transport's business -
//! everything here is plain serde data.

use serde::{Deserialize, Serialize};

use crate::core::{Guid, PlayerId, Transform};
use crate::transfer::TransferRecord;

/// Metadata attached to every inbound notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageMeta {
    /// Player whose action caused the mutation.
    pub origin: PlayerId,
    /// Name of the peer that sent the confirmation.
    pub sender: String,
}

impl MessageMeta {
    pub fn from_player(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            origin: PlayerId::new(name.clone()),
            sender: name,
        }
    }
}

/// Notification from the engine, applied by the reconciler in arrival order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineMessage {
    SpawnedBlueprint {
        record: TransferRecord,
        meta: MessageMeta,
    },
    DestroyedBlueprint {
        guid: Guid,
        meta: MessageMeta,
    },
    EnabledBlueprint {
        guid: Guid,
        meta: MessageMeta,
    },
    DisabledBlueprint {
        guid: Guid,
        meta: MessageMeta,
    },
    ObjectNameChanged {
        guid: Guid,
        name: String,
        meta: MessageMeta,
    },
    ObjectTransformChanged {
        guid: Guid,
        transform: Transform,
        meta: MessageMeta,
    },
    ObjectVariationChanged {
        guid: Guid,
        variation: u32,
        meta: MessageMeta,
    },
    /// Ack that the engine accepted a spawn request; logged only.
    BlueprintSpawnInvoked {
        guid: Guid,
        name: String,
    },
}

/// Mutation request published by commands for the transport to forward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineRequest {
    SpawnBlueprint { record: TransferRecord },
    DestroyBlueprint { guid: Guid },
    EnableBlueprint { guid: Guid },
    DisableBlueprint { guid: Guid },
    SetObjectName { guid: Guid, name: String },
    MoveObject { guid: Guid, transform: Transform },
    SetVariation { guid: Guid, variation: u32 },
}

/// Change event published for the render/UI layer.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorNotification {
    ObjectSpawned(Guid),
    ObjectDestroyed(Guid),
    ObjectFocused(Guid),
    SelectionChanged,
    HighlightChanged,
    RenderInvalidated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{Blueprint, ParentLink};

    #[test]
    fn test_message_json_tagging() {
        let msg = EngineMessage::DestroyedBlueprint {
            guid: Guid::new(),
            meta: MessageMeta::from_player("LocalPlayer"),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"DestroyedBlueprint\""));

        let back: EngineMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn test_request_round_trip() {
        let bp = Blueprint::new("Crate_01");
        let record = TransferRecord::for_spawn(&bp, Transform::IDENTITY, 0, ParentLink::root());
        let req = EngineRequest::SpawnBlueprint { record };

        let json = serde_json::to_string(&req).unwrap();
        let back: EngineRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
